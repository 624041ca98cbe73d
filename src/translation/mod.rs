//! The translation pipeline: classification, language policy, prompt
//! rendering and provider streaming.

mod classify;
mod dispatcher;
mod error;
mod language;
mod prompt;
pub mod provider;
pub mod sse_parser;

pub use classify::{TextClass, classify};
pub use dispatcher::{PreparedTranslation, TranslationRequest, Translator};
pub use error::{
    ConfigError, DetectionFailed, StreamError, StreamErrorKind, UnsupportedLanguage,
};
pub use language::{
    AUTO_LANGUAGE, LanguageDetector, SUPPORTED_LANGUAGES, TargetResolution, display_name,
    native_name, print_languages, resolve_target, target_candidates, validate_language,
};
pub use prompt::{Prompt, SYSTEM_PROMPT, build_prompt};
pub use provider::{Fragment, FragmentStream, ModelConfig, Provider, build_http_client};
