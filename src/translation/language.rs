//! Supported languages, language detection and target-language policy.

use anyhow::Result;
use whatlang::{Detector, Lang};

use super::error::{DetectionFailed, UnsupportedLanguage};
use crate::ui::Style;

/// Supported target language codes and their native names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("zh-cn", "简体中文"),
    ("zh-tw", "繁體中文（台灣）"),
    ("zh-hk", "繁體中文（香港）"),
    ("en", "English"),
    ("de", "Deutsch"),
    ("fr", "Français"),
    ("ja", "日本語"),
    ("es", "Español"),
    ("ko", "한국어"),
    ("nl", "Nederlands"),
    ("pl", "Polski"),
    ("ru", "Русский"),
    ("pt", "Português"),
    ("ar", "العربية"),
];

/// English names used inside prompts.
const PROMPT_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("zh-cn", "Simplified Chinese"),
    ("zh-tw", "Traditional Chinese (Taiwan)"),
    ("zh-hk", "Traditional Chinese (Hong Kong)"),
    ("zh", "Chinese"),
    ("de", "German"),
    ("fr", "French"),
    ("ja", "Japanese"),
    ("es", "Spanish"),
    ("ko", "Korean"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("ru", "Russian"),
    ("pt", "Portuguese"),
    ("ar", "Arabic"),
];

/// Marker used as the source language when detection fails.
pub const AUTO_LANGUAGE: &str = "auto";

/// Returns the English display name for a tag, or the tag itself if unknown.
pub fn display_name(tag: &str) -> &str {
    PROMPT_NAMES
        .iter()
        .find(|(code, _)| *code == tag)
        .map_or(tag, |(_, name)| name)
}

/// Returns the native name of a supported language.
pub fn native_name(tag: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(code, _)| *code == tag)
        .map(|(_, name)| *name)
}

/// Prints all supported language codes to stdout.
pub fn print_languages(header: &str, code_label: &str, name_label: &str) {
    println!("{}", Style::header(header));
    println!(
        "  {}  {}",
        Style::label(format!("{code_label:6}")),
        Style::label(name_label)
    );
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {}  {}", Style::code(format!("{code:6}")), name);
    }
}

/// Comma-separated list of the supported codes.
pub fn supported_codes() -> String {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, _)| *code)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validates that the given language code is supported.
pub fn validate_language(lang: &str) -> Result<()> {
    if SUPPORTED_LANGUAGES.iter().any(|(code, _)| *code == lang) {
        Ok(())
    } else {
        Err(UnsupportedLanguage(lang.to_string()).into())
    }
}

/// Languages the detector chooses between; all map onto supported tags.
const DETECTABLE_LANGS: [Lang; 12] = [
    Lang::Eng,
    Lang::Cmn,
    Lang::Deu,
    Lang::Fra,
    Lang::Jpn,
    Lang::Spa,
    Lang::Kor,
    Lang::Nld,
    Lang::Pol,
    Lang::Rus,
    Lang::Por,
    Lang::Ara,
];

/// Trigram-based language identification.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageDetector;

impl LanguageDetector {
    pub const fn new() -> Self {
        Self
    }

    /// Detects the language of `text` as a tag from the supported table.
    ///
    /// Only supported languages are considered and the top guess is taken,
    /// so detection fails only for text without any letters.
    pub fn detect(&self, text: &str) -> Result<String, DetectionFailed> {
        let info = Detector::with_allowlist(DETECTABLE_LANGS.to_vec())
            .detect(text)
            .ok_or(DetectionFailed)?;
        tracing::debug!(
            lang = info.lang().code(),
            confidence = info.confidence(),
            "detected language"
        );
        Ok(lang_tag(info.lang()).to_string())
    }

    /// Detects the source language, falling back to [`AUTO_LANGUAGE`].
    pub fn detect_or_auto(&self, text: &str) -> String {
        self.detect(text)
            .unwrap_or_else(|DetectionFailed| AUTO_LANGUAGE.to_string())
    }
}

fn lang_tag(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "en",
        Lang::Cmn => "zh-cn",
        Lang::Deu => "de",
        Lang::Fra => "fr",
        Lang::Jpn => "ja",
        Lang::Spa => "es",
        Lang::Kor => "ko",
        Lang::Nld => "nl",
        Lang::Pol => "pl",
        Lang::Rus => "ru",
        Lang::Por => "pt",
        Lang::Ara => "ar",
        other => other.code(),
    }
}

/// Outcome of the smart target-language policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetResolution {
    /// Translate into this language.
    Target(String),
    /// The text is already in the primary language; the user must choose
    /// among these candidates.
    AskUser { candidates: Vec<&'static str> },
}

/// Decides the target language when none was given explicitly.
///
/// Non-primary content goes to the primary language. Primary-language
/// content (same tag, or same base tag such as `zh` for `zh-cn`) is handed
/// back to the caller with every other supported language as candidates.
pub fn resolve_target(
    detected: Result<&str, DetectionFailed>,
    primary_lang: &str,
) -> TargetResolution {
    let Ok(detected) = detected else {
        return TargetResolution::Target(primary_lang.to_string());
    };

    let primary_base = primary_lang.split('-').next().unwrap_or(primary_lang);
    let detected_base = detected.split('-').next().unwrap_or(detected);
    if detected == primary_lang || detected_base == primary_base {
        TargetResolution::AskUser {
            candidates: target_candidates(primary_lang),
        }
    } else {
        TargetResolution::Target(primary_lang.to_string())
    }
}

/// All supported languages except the primary one.
pub fn target_candidates(primary_lang: &str) -> Vec<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, _)| *code)
        .filter(|code| *code != primary_lang)
        .collect()
}
