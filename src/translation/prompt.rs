use std::fmt;

use super::classify::TextClass;
use super::language::display_name;

/// System message sent with every request.
pub const SYSTEM_PROMPT: &str = "You are a professional translator and language teacher. \
     Provide detailed, accurate translations with educational context.";

const WORD_TEMPLATE: &str = "Translate the word \"{text}\" from {source} to {target}. Include:\n\
     - the translation\n\
     - pronunciation and part of speech\n\
     - example sentences\n\
     If the word has several common meanings, list every one of them and give each \
     meaning its own translation, pronunciation, part of speech and examples in the same layout.\n";

const PHRASE_TEMPLATE: &str = "Translate the phrase \"{text}\" from {source} to {target}. Include:\n\
     - the translation\n\
     - a brief note on context, if needed\n\
     - usage examples\n\
     If the phrase has several common meanings, list every one of them and give each \
     meaning its own translation, context note and examples in the same layout.\n";

const SENTENCE_TEMPLATE: &str = "Translate the sentence \"{text}\" from {source} to {target}. Include:\n\
     - an accurate translation\n\
     - a grammatical analysis of the original sentence\n\
     - usage examples\n";

const FORMAT_RULES: &str = "\nRequirements:\n\
     1. The output is shown in a terminal: keep it tidy and readable; emoji and simple \
     symbols may be used as decoration.\n\
     2. Write every explanation in {primary}.\n\
     3. Do not use Markdown or any other markup.\n\
     4. Do not use code blocks.\n";

/// An instruction ready to be sent as the user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders the instruction for `text` using the template for its class.
#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_prompt(
    text: &str,
    source_lang: &str,
    target_lang: &str,
    class: TextClass,
    primary_lang: &str,
) -> Prompt {
    // {text}, {source}, ... are placeholders for string replacement, not format arguments
    let template = match class {
        TextClass::Word => WORD_TEMPLATE,
        TextClass::Phrase => PHRASE_TEMPLATE,
        TextClass::Sentence => SENTENCE_TEMPLATE,
    };

    // Substitute the user text last so braces inside it are never expanded.
    let body = template
        .replace("{source}", display_name(source_lang))
        .replace("{target}", display_name(target_lang))
        .replace("{text}", text);
    let rules = FORMAT_RULES.replace("{primary}", display_name(primary_lang));

    Prompt(body + &rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_prompt_contents() {
        let prompt = build_prompt("hello", "en", "zh-cn", TextClass::Word, "zh-cn");
        let text = prompt.as_str();
        assert!(text.contains("\"hello\""));
        assert!(text.contains("from English to Simplified Chinese"));
        assert!(text.contains("pronunciation and part of speech"));
        assert!(text.contains("several common meanings"));
        assert!(text.contains("Write every explanation in Simplified Chinese."));
        assert!(!text.contains("```"));
    }

    #[test]
    fn test_phrase_prompt_contents() {
        let prompt = build_prompt("break the ice", "en", "ja", TextClass::Phrase, "en");
        let text = prompt.as_str();
        assert!(text.contains("the phrase \"break the ice\""));
        assert!(text.contains("context"));
        assert!(text.contains("several common meanings"));
        assert!(text.contains("Write every explanation in English."));
    }

    #[test]
    fn test_sentence_prompt_has_no_multi_sense_branch() {
        let prompt = build_prompt("How are you?", "en", "zh-cn", TextClass::Sentence, "zh-cn");
        let text = prompt.as_str();
        assert!(text.contains("grammatical analysis"));
        assert!(!text.contains("several common meanings"));
        assert!(text.contains("Do not use code blocks."));
    }

    #[test]
    fn test_unknown_tags_used_raw() {
        let prompt = build_prompt("hola", "auto", "xx", TextClass::Word, "zh-cn");
        assert!(prompt.as_str().contains("from auto to xx"));
    }

    #[test]
    fn test_placeholders_in_user_text_are_kept() {
        let prompt = build_prompt("{target}", "en", "ja", TextClass::Phrase, "en");
        assert!(prompt.as_str().contains("\"{target}\""));
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let a = build_prompt("cat", "en", "de", TextClass::Word, "zh-cn");
        let b = build_prompt("cat", "en", "de", TextClass::Word, "zh-cn");
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_markdown_fences_in_any_template() {
        for class in [TextClass::Word, TextClass::Phrase, TextClass::Sentence] {
            let prompt = build_prompt("x", "en", "zh-cn", class, "zh-cn");
            assert!(!prompt.as_str().contains("```"));
        }
    }
}
