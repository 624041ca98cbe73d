//! Error types for the translation pipeline.

use std::fmt;

use thiserror::Error;

/// Category of a failure reported inside a fragment stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamErrorKind {
    /// Connection, TLS, timeout or mid-stream read failure.
    Transport,
    /// The provider rejected the credential (401/403).
    Auth,
    /// The provider throttled the request (429).
    RateLimit,
    /// Any other error reported by the provider.
    Api,
}

impl fmt::Display for StreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transport => "transport",
            Self::Auth => "authentication",
            Self::RateLimit => "rate limit",
            Self::Api => "api",
        };
        f.write_str(name)
    }
}

/// A failure delivered in-band as the last item of a fragment stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {message}")]
pub struct StreamError {
    pub kind: StreamErrorKind,
    pub message: String,
}

impl StreamError {
    pub fn new(kind: StreamErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl fmt::Display) -> Self {
        Self::new(StreamErrorKind::Transport, message.to_string())
    }

    /// Classifies an HTTP error status returned by a provider.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let kind = match status {
            401 | 403 => StreamErrorKind::Auth,
            429 => StreamErrorKind::RateLimit,
            _ => StreamErrorKind::Api,
        };
        Self::new(kind, format!("HTTP {status}: {}", message.into()))
    }
}

impl From<reqwest::Error> for StreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::transport(format!("request timed out: {err}"))
        } else {
            Self::transport(err)
        }
    }
}

/// Language identification produced no guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("language detection failed")]
pub struct DetectionFailed;

/// A language code outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Unsupported language: '{0}'\n\n\
     Supported codes: {codes}\n\
     Run 'lu --support' to see the full table.",
    codes = super::language::supported_codes()
)]
pub struct UnsupportedLanguage(pub String);

/// Configuration problems detected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown provider '{0}' (expected one of: openai, dashscope, custom)")]
    UnknownProvider(String),

    #[error("API key is not configured for provider '{0}'")]
    MissingApiKey(String),

    #[error("Base URL is required for provider '{0}'")]
    MissingBaseUrl(String),

    #[error("Configuration file not found: {0}")]
    NotFound(String),
}
