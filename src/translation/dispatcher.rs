use reqwest::Client;

use super::classify::{TextClass, classify};
use super::language::LanguageDetector;
use super::prompt::{Prompt, build_prompt};
use super::provider::{Adapter, FragmentStream, ModelConfig, Provider};

/// A single translation to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
    pub primary_lang: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, primary_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_lang: None,
            target_lang: None,
            primary_lang: primary_lang.into(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = Some(source_lang.into());
        self
    }

    #[must_use]
    pub fn with_target(mut self, target_lang: impl Into<String>) -> Self {
        self.target_lang = Some(target_lang.into());
        self
    }
}

/// Everything decided before the network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTranslation {
    pub source_lang: String,
    pub target_lang: String,
    pub class: TextClass,
    pub prompt: Prompt,
}

/// Routes translation requests to the configured provider.
#[derive(Debug, Clone)]
pub struct Translator {
    adapter: Adapter,
    detector: LanguageDetector,
}

impl Translator {
    /// Creates a translator for an already validated [`ModelConfig`].
    pub fn new(client: Client, model_config: &ModelConfig) -> Self {
        Self {
            adapter: Adapter::for_config(client, model_config),
            detector: LanguageDetector::new(),
        }
    }

    pub const fn provider(&self) -> Provider {
        self.adapter.provider()
    }

    /// Resolves languages, classifies the text and renders the prompt.
    ///
    /// A missing source is detected (or `"auto"`); a missing target becomes
    /// the primary language for English input and English otherwise.
    pub fn prepare(&self, request: &TranslationRequest) -> PreparedTranslation {
        let source_lang = request
            .source_lang
            .clone()
            .unwrap_or_else(|| self.detector.detect_or_auto(&request.text));

        let target_lang = request.target_lang.clone().unwrap_or_else(|| {
            if source_lang == "en" {
                request.primary_lang.clone()
            } else {
                "en".to_string()
            }
        });

        let class = classify(&request.text);
        let prompt = build_prompt(
            &request.text,
            &source_lang,
            &target_lang,
            class,
            &request.primary_lang,
        );

        PreparedTranslation {
            source_lang,
            target_lang,
            class,
            prompt,
        }
    }

    /// Streams the translation of `request` as ordered text fragments.
    ///
    /// The returned stream is lazy; provider failures arrive as a final
    /// `Err` item rather than as an error from this call.
    pub fn translate_streaming(&self, request: &TranslationRequest) -> FragmentStream {
        let prepared = self.prepare(request);
        tracing::debug!(
            provider = %self.provider(),
            source = %prepared.source_lang,
            target = %prepared.target_lang,
            class = %prepared.class,
            "dispatching translation"
        );
        self.adapter.stream(&prepared.prompt)
    }
}
