//! Heuristic word / phrase / sentence classification.

use std::fmt;

/// Shape of the input text, used to pick a prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextClass {
    Word,
    Phrase,
    Sentence,
}

impl fmt::Display for TextClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Word => "word",
            Self::Phrase => "phrase",
            Self::Sentence => "sentence",
        };
        f.write_str(name)
    }
}

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];
const MAX_PHRASE_TOKENS: usize = 5;

/// Classifies text by token count and punctuation.
///
/// This is not a language-aware parse: tokens are whitespace-delimited and
/// "alphabetic" means the Unicode alphabetic property.
pub fn classify(text: &str) -> TextClass {
    let text = text.trim();
    let token_count = text.split_whitespace().count();

    if token_count == 1 && text.chars().all(char::is_alphabetic) {
        TextClass::Word
    } else if token_count <= MAX_PHRASE_TOKENS && !text.contains(SENTENCE_TERMINATORS) {
        TextClass::Phrase
    } else {
        TextClass::Sentence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_alphabetic_token_is_word() {
        assert_eq!(classify("hello"), TextClass::Word);
        assert_eq!(classify("  serendipity \n"), TextClass::Word);
    }

    #[test]
    fn test_non_latin_alphabetic_is_word() {
        assert_eq!(classify("こんにちは"), TextClass::Word);
        assert_eq!(classify("你好"), TextClass::Word);
        assert_eq!(classify("Straße"), TextClass::Word);
    }

    #[test]
    fn test_single_token_with_digits_is_phrase() {
        assert_eq!(classify("mp3"), TextClass::Phrase);
        assert_eq!(classify("e-mail"), TextClass::Phrase);
    }

    #[test]
    fn test_single_token_with_terminator_is_sentence() {
        assert_eq!(classify("Hi!"), TextClass::Sentence);
    }

    #[test]
    fn test_short_group_is_phrase() {
        assert_eq!(classify("break the ice"), TextClass::Phrase);
        assert_eq!(classify("one two three four five"), TextClass::Phrase);
    }

    #[test]
    fn test_six_tokens_is_sentence() {
        assert_eq!(classify("one two three four five six"), TextClass::Sentence);
    }

    #[test]
    fn test_punctuation_makes_sentence() {
        assert_eq!(classify("How are you?"), TextClass::Sentence);
        assert_eq!(classify("I am fine."), TextClass::Sentence);
        assert_eq!(classify("Watch out!"), TextClass::Sentence);
    }

    #[test]
    fn test_empty_text_is_phrase() {
        assert_eq!(classify("   "), TextClass::Phrase);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let text = "a piece of cake";
        assert_eq!(classify(text), classify(text));
    }
}
