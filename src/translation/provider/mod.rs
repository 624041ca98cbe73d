//! LLM backends and the fragment stream they produce.
//!
//! Every adapter turns a [`Prompt`] into a lazy [`FragmentStream`]: nothing
//! is sent until the stream is first polled, and dropping the stream drops
//! the HTTP response, which releases the connection.

use std::fmt;
use std::pin::Pin;
use std::str::FromStr;
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;

use super::error::{ConfigError, StreamError};
use super::prompt::{Prompt, SYSTEM_PROMPT};
use super::sse_parser::sse_to_text_stream;

mod custom;
mod dashscope;
mod openai;

pub use custom::CustomAdapter;
pub use dashscope::{CumulativeText, DashScopeAdapter, dashscope_sse_to_text_stream};
pub use openai::OpenAiAdapter;

/// One streamed piece of output, or the failure that ended the stream.
pub type Fragment = Result<String, StreamError>;

/// Ordered, finite, non-restartable sequence of fragments.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Fragment> + Send>>;

/// Sampling temperature used for every provider.
pub const TEMPERATURE: f64 = 0.3;

/// Default connect and read timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The closed set of supported backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// OpenAI chat completions.
    OpenAi,
    /// Alibaba DashScope native generation API (Qwen models).
    DashScope,
    /// Any OpenAI-compatible endpoint.
    Custom,
}

impl Provider {
    pub const ALL: [Self; 3] = [Self::OpenAi, Self::DashScope, Self::Custom];

    /// Identifier used in the config file.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::DashScope => "dashscope",
            Self::Custom => "custom",
        }
    }

    /// Human-readable name used in prompts and listings.
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI (GPT models)",
            Self::DashScope => "DashScope (Qwen models)",
            Self::Custom => "Custom OpenAI-compatible API",
        }
    }

    pub const fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi | Self::Custom => "gpt-3.5-turbo",
            Self::DashScope => "qwen-turbo",
        }
    }

    /// Models offered by `lu init`; empty means free-text entry.
    pub const fn known_models(self) -> &'static [&'static str] {
        match self {
            Self::OpenAi => &["gpt-3.5-turbo", "gpt-4", "gpt-4-turbo", "gpt-4o", "gpt-4o-mini"],
            Self::DashScope => &["qwen-turbo", "qwen-plus", "qwen-max", "qwen-max-longcontext"],
            Self::Custom => &[],
        }
    }

    pub const fn default_base_url(self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some(openai::DEFAULT_BASE_URL),
            Self::DashScope => Some(dashscope::DEFAULT_BASE_URL),
            Self::Custom => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "dashscope" => Ok(Self::DashScope),
            "custom" => Ok(Self::Custom),
            _ => Err(ConfigError::UnknownProvider(s.to_string())),
        }
    }
}

/// Fully resolved model settings for one provider.
///
/// Callers must run [`ModelConfig::validate`] before streaming: adapters
/// assume a non-empty API key and, for [`Provider::Custom`], a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey(self.provider.to_string()));
        }
        if self.provider == Provider::Custom
            && self.base_url.as_deref().is_none_or(|url| url.trim().is_empty())
        {
            return Err(ConfigError::MissingBaseUrl(self.provider.to_string()));
        }
        Ok(())
    }

    /// Configured base URL, else the provider default, without a trailing `/`.
    pub fn effective_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.provider.default_base_url())
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_string()
    }
}

/// Builds the HTTP client shared by all adapters.
///
/// Only connect and read timeouts are set: a total timeout would cut off
/// long streamed answers.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .connect_timeout(timeout)
        .read_timeout(timeout)
        .build()
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    role: &'static str,
    content: String,
}

/// System persona followed by the prompt as the user message.
pub(crate) fn chat_messages(prompt: &Prompt) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system",
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: "user",
            content: prompt.as_str().to_string(),
        },
    ]
}

/// Request body for OpenAI-style `/chat/completions`.
#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    temperature: f64,
}

impl ChatCompletionRequest {
    pub(crate) fn streaming(model: &str, prompt: &Prompt) -> Self {
        Self {
            model: model.to_string(),
            messages: chat_messages(prompt),
            stream: true,
            temperature: TEMPERATURE,
        }
    }
}

/// Sends an OpenAI-style streaming request and yields its delta fragments.
///
/// A non-success status becomes a single `Err` fragment whose message is
/// taken from the response body by `error_message`.
pub(crate) fn stream_chat_completions(
    request: RequestBuilder,
    url: String,
    error_message: fn(&str) -> String,
) -> FragmentStream {
    Box::pin(async_stream::stream! {
        tracing::debug!(%url, "opening chat completion stream");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                yield Err(StreamError::from(e));
                return;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, "chat completion request rejected");
            yield Err(StreamError::from_status(status.as_u16(), error_message(&body)));
            return;
        }

        let mut fragments = std::pin::pin!(sse_to_text_stream(response.bytes_stream()));
        while let Some(fragment) = fragments.next().await {
            yield fragment;
        }
    })
}

/// The adapter selected for a [`ModelConfig`].
#[derive(Debug, Clone)]
pub enum Adapter {
    OpenAi(OpenAiAdapter),
    DashScope(DashScopeAdapter),
    Custom(CustomAdapter),
}

impl Adapter {
    pub fn for_config(client: Client, config: &ModelConfig) -> Self {
        let base_url = config.effective_base_url();
        match config.provider {
            Provider::OpenAi => Self::OpenAi(OpenAiAdapter::new(
                client,
                base_url,
                config.api_key.clone(),
                config.model.clone(),
            )),
            Provider::DashScope => Self::DashScope(DashScopeAdapter::new(
                client,
                base_url,
                config.api_key.clone(),
                config.model.clone(),
            )),
            Provider::Custom => Self::Custom(CustomAdapter::new(
                client,
                base_url,
                config.api_key.clone(),
                config.model.clone(),
            )),
        }
    }

    pub const fn provider(&self) -> Provider {
        match self {
            Self::OpenAi(_) => Provider::OpenAi,
            Self::DashScope(_) => Provider::DashScope,
            Self::Custom(_) => Provider::Custom,
        }
    }

    pub fn stream(&self, prompt: &Prompt) -> FragmentStream {
        match self {
            Self::OpenAi(adapter) => adapter.stream(prompt),
            Self::DashScope(adapter) => adapter.stream(prompt),
            Self::Custom(adapter) => adapter.stream(prompt),
        }
    }
}
