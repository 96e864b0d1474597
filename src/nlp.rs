//! Sentence segmentation and word tagging.
//!
//! The humanizer only needs two capabilities from a language toolkit:
//! splitting running text into sentences and turning a sentence into a
//! sequence of tagged tokens. [`LanguageBackend`] names that seam so an NLP
//! library can be plugged in; [`RuleBasedBackend`] is the built-in
//! implementation.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// A word together with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub token: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(token: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            tag: tag.into(),
        }
    }
}

/// Errors raised by a language backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NlpError {
    /// The text could not be split into sentences.
    SegmentationFailed(String),
    /// A sentence could not be tokenized or tagged.
    TaggingFailed { sentence: String, reason: String },
}

impl fmt::Display for NlpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NlpError::SegmentationFailed(reason) => {
                write!(f, "sentence segmentation failed: {}", reason)
            }
            NlpError::TaggingFailed { sentence, reason } => {
                write!(f, "tagging failed for {:?}: {}", sentence, reason)
            }
        }
    }
}

impl std::error::Error for NlpError {}

/// The language capabilities the pipeline delegates to.
pub trait LanguageBackend {
    /// Splits `text` into non-empty sentences, in order, covering all of its
    /// non-whitespace content.
    fn segment_sentences(&self, text: &str) -> Result<Vec<String>, NlpError>;

    /// Tokenizes and tags one sentence using the model for `language`.
    fn tag_tokens(&self, sentence: &str, language: &str) -> Result<Vec<TaggedToken>, NlpError>;
}

impl<B: LanguageBackend + ?Sized> LanguageBackend for &B {
    fn segment_sentences(&self, text: &str) -> Result<Vec<String>, NlpError> {
        (**self).segment_sentences(text)
    }

    fn tag_tokens(&self, sentence: &str, language: &str) -> Result<Vec<TaggedToken>, NlpError> {
        (**self).tag_tokens(sentence, language)
    }
}

/// Abbreviations that end in a period without ending a sentence.
static ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "mt.", "vs.", "etc.", "e.g.",
    "i.e.", "a.m.", "p.m.", "fig.", "inc.", "ltd.", "co.", "corp.", "dept.", "approx.",
    "jan.", "feb.", "mar.", "apr.", "jun.", "jul.", "aug.", "sep.", "sept.", "oct.", "nov.",
    "dec.", "u.s.", "u.k.",
];

static ABBREVIATIONS_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ABBREVIATIONS.iter().copied().collect());

/// Abbreviations that are also ordinary words; they only count as
/// abbreviations in front of a number (`No. 5`).
static NUMERAL_ABBREVIATIONS: &[&str] = &["no.", "nos."];

/// Terminal punctuation (possibly repeated, possibly followed by closing
/// quotes or brackets) and the whitespace after it.
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.?!\u{2026}]+["'\u{201D}\u{2019})\]]*\s+"#).unwrap());

/// Words with inner apostrophes or hyphens kept together (`don't`, `well-known`).
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]+(?:['\u{2019}-][\p{L}\p{N}_]+)*").unwrap());

/// Regex-driven segmentation and lexicon-free tagging.
///
/// Sentences end at terminal punctuation followed by whitespace, unless the
/// word carrying the period is a known abbreviation. Tokens are words;
/// punctuation is dropped. Tags follow the default categories of a Brill
/// tagger without a lexicon: `CD` for numbers, `NNP` for capitalized words,
/// `N` for everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedBackend;

impl RuleBasedBackend {
    fn ends_with_abbreviation(chunk: &str, rest: &str) -> bool {
        let last_word = chunk.split_whitespace().last().unwrap_or("").to_lowercase();
        if NUMERAL_ABBREVIATIONS.contains(&last_word.as_str()) {
            return rest.chars().next().is_some_and(|c| c.is_ascii_digit());
        }
        ABBREVIATIONS_SET.contains(last_word.as_str())
    }

    fn tag_for(token: &str) -> &'static str {
        if token.chars().all(|c| c.is_numeric()) {
            "CD"
        } else if token.chars().next().is_some_and(|c| c.is_uppercase()) {
            "NNP"
        } else {
            "N"
        }
    }
}

impl LanguageBackend for RuleBasedBackend {
    fn segment_sentences(&self, text: &str) -> Result<Vec<String>, NlpError> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in SENTENCE_END.find_iter(text) {
            let candidate = text[start..boundary.end()].trim();
            let rest = &text[boundary.end()..];
            if candidate.is_empty() || Self::ends_with_abbreviation(candidate, rest) {
                continue;
            }
            sentences.push(candidate.to_string());
            start = boundary.end();
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }

        Ok(sentences)
    }

    fn tag_tokens(&self, sentence: &str, _language: &str) -> Result<Vec<TaggedToken>, NlpError> {
        Ok(WORD
            .find_iter(sentence)
            .map(|m| TaggedToken::new(m.as_str(), Self::tag_for(m.as_str())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Vec<String> {
        RuleBasedBackend.segment_sentences(text).unwrap()
    }

    fn tokens(sentence: &str) -> Vec<String> {
        RuleBasedBackend
            .tag_tokens(sentence, "EN")
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_segment_basic() {
        assert_eq!(
            segment("The sun rose. Birds sang! Did you hear them?"),
            vec!["The sun rose.", "Birds sang!", "Did you hear them?"]
        );
    }

    #[test]
    fn test_segment_skips_abbreviations() {
        assert_eq!(
            segment("Mr. Smith arrived at 5 p.m. on Monday. He left early."),
            vec!["Mr. Smith arrived at 5 p.m. on Monday.", "He left early."]
        );
    }

    #[test]
    fn test_segment_splits_after_the_word_no() {
        assert_eq!(
            segment("The answer was no. We moved on."),
            vec!["The answer was no.", "We moved on."]
        );
    }

    #[test]
    fn test_segment_keeps_numbered_abbreviation() {
        assert_eq!(
            segment("See item No. 5 below. It is short."),
            vec!["See item No. 5 below.", "It is short."]
        );
    }

    #[test]
    fn test_segment_keeps_closing_quotes() {
        assert_eq!(
            segment("She said \"Stop!\" Then she left."),
            vec!["She said \"Stop!\"", "Then she left."]
        );
    }

    #[test]
    fn test_segment_without_terminal_punctuation() {
        assert_eq!(segment("  no punctuation here  "), vec!["no punctuation here"]);
    }

    #[test]
    fn test_segment_empty() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\t ").is_empty());
    }

    #[test]
    fn test_segment_covers_paragraphs() {
        assert_eq!(
            segment("First paragraph.\n\nSecond paragraph."),
            vec!["First paragraph.", "Second paragraph."]
        );
    }

    #[test]
    fn test_tokens_drop_punctuation() {
        assert_eq!(
            tokens("Hello, world! It's a well-known fact."),
            vec!["Hello", "world", "It's", "a", "well-known", "fact"]
        );
    }

    #[test]
    fn test_tags() {
        let tagged = RuleBasedBackend.tag_tokens("Alice owns 3 cats", "EN").unwrap();
        assert_eq!(
            tagged,
            vec![
                TaggedToken::new("Alice", "NNP"),
                TaggedToken::new("owns", "N"),
                TaggedToken::new("3", "CD"),
                TaggedToken::new("cats", "N"),
            ]
        );
    }

    #[test]
    fn test_backend_by_reference() {
        let backend = RuleBasedBackend;
        let by_ref: &dyn LanguageBackend = &backend;
        assert_eq!(by_ref.segment_sentences("A. B.").unwrap(), vec!["A.", "B."]);
    }
}
