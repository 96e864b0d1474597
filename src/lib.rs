//! Humanizer rewrites English prose so it reads less like machine-generated
//! text: it contracts expanded phrases, varies sentence length by joining
//! neighbouring sentences, and shifts vocabulary toward a chosen tone.
//!
//! # Example
//!
//! ```
//! use humanizer::{Humanizer, Options, Tone};
//!
//! let options = Options {
//!     tone: Some(Tone::Formal),
//!     ..Options::default()
//! };
//! let mut humanizer = Humanizer::seeded(options, 7);
//! let output = humanizer.humanize("He's not happy and he can't go.").unwrap();
//! assert_eq!(output, "He is not happy and he cannot go.");
//! ```

pub mod config;
pub mod generic;
pub mod lexicon;
pub mod nlp;
pub mod rules;
pub mod tone;

#[cfg(feature = "wasm")]
pub mod wasm;

use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

pub use generic::DEFAULT_MERGE_PROBABILITY;
pub use nlp::{LanguageBackend, NlpError, RuleBasedBackend, TaggedToken};
pub use tone::{Tone, ToneError, apply_tone, apply_tone_named};

/// Separator placed between reconstituted sentences.
const SENTENCE_SEPARATOR: &str = ". ";

/// Options for a humanization run.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Tone applied last. `None` skips the tone pass. Default: casual.
    pub tone: Option<Tone>,

    /// Language code handed to the tagger. Default: `EN`.
    pub language: String,

    /// Probability of each sentence-merge coin toss, clamped to [0, 1].
    /// NaN falls back to the default of 0.5.
    pub merge_probability: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tone: Some(Tone::Casual),
            language: "EN".to_string(),
            merge_probability: DEFAULT_MERGE_PROBABILITY,
        }
    }
}

/// Runs the full pipeline: segmentation, tagging, generic humanization and
/// the tone pass.
///
/// The language backend and the random source are injected so callers can
/// swap in another tagger or make sentence merging reproducible.
pub struct Humanizer<B = RuleBasedBackend, R = ThreadRng> {
    backend: B,
    rng: R,
    options: Options,
}

impl Humanizer {
    /// A humanizer using the built-in backend and the thread-local RNG.
    pub fn new(options: Options) -> Self {
        Self::with_parts(RuleBasedBackend, rand::rng(), options)
    }
}

impl Humanizer<RuleBasedBackend, ChaCha8Rng> {
    /// A humanizer whose sentence merging is reproducible for a given seed.
    pub fn seeded(options: Options, seed: u64) -> Self {
        Self::with_parts(RuleBasedBackend, ChaCha8Rng::seed_from_u64(seed), options)
    }
}

impl<B: LanguageBackend, R: Rng> Humanizer<B, R> {
    pub fn with_parts(backend: B, rng: R, options: Options) -> Self {
        Self {
            backend,
            rng,
            options,
        }
    }

    /// Humanizes `text`.
    ///
    /// Empty or whitespace-only input yields an empty string. A failure to
    /// segment the text or to tag any one sentence fails the whole call; no
    /// partial output is produced.
    ///
    /// Reconstituted sentences are the tagger's tokens joined by single
    /// spaces, so punctuation inside a sentence is not preserved. Sentences
    /// are rejoined with `". "`, and the input's final terminal punctuation
    /// is restored at the end.
    pub fn humanize(&mut self, text: &str) -> Result<String, HumanizeError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let sentences = self
            .backend
            .segment_sentences(text)
            .map_err(HumanizeError::Segmentation)?;
        debug!(sentences = sentences.len(), "segmented input");
        if sentences.is_empty() {
            return Ok(String::new());
        }

        let mut rebuilt = Vec::with_capacity(sentences.len());
        for sentence in &sentences {
            let tokens = self
                .backend
                .tag_tokens(sentence, &self.options.language)
                .map_err(HumanizeError::Tagging)?;
            let words: Vec<&str> = tokens.iter().map(|t| t.token.as_str()).collect();
            if !words.is_empty() {
                rebuilt.push(words.join(" "));
            }
        }

        let mut joined = rebuilt.join(SENTENCE_SEPARATOR);
        if !joined.is_empty()
            && let Some(terminal) = final_terminal(text)
        {
            joined.push(terminal);
        }

        let varied =
            generic::humanize_generic(&joined, &mut self.rng, self.options.merge_probability);
        let output = match self.options.tone {
            Some(tone) => {
                debug!(%tone, "applying tone");
                apply_tone(&varied, tone)
            }
            None => varied,
        };
        Ok(output)
    }
}

/// The terminal punctuation mark ending `text`, if any.
fn final_terminal(text: &str) -> Option<char> {
    text.trim_end()
        .chars()
        .last()
        .filter(|c| matches!(c, '.' | '?' | '!'))
}

/// Humanizes `text` in the tone called `tone`, tagging with the model for
/// `language`.
///
/// An unrecognized tone name skips the tone pass instead of failing.
///
/// The call completes synchronously and is all-or-nothing: it returns the
/// fully rewritten text, or the first segmentation or tagging error with no
/// partial output.
pub fn humanize_input_text(
    text: &str,
    tone: &str,
    language: &str,
) -> Result<String, HumanizeError> {
    let tone = match tone.parse::<Tone>() {
        Ok(tone) => Some(tone),
        Err(err) => {
            tracing::warn!("{err}; skipping tone pass");
            None
        }
    };
    let options = Options {
        tone,
        language: language.to_string(),
        ..Options::default()
    };
    Humanizer::new(options).humanize(text)
}

/// Errors that can occur while humanizing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HumanizeError {
    /// The backend failed to split the input into sentences.
    Segmentation(NlpError),
    /// The backend failed to tag one of the sentences.
    Tagging(NlpError),
}

impl std::fmt::Display for HumanizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HumanizeError::Segmentation(err) | HumanizeError::Tagging(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for HumanizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HumanizeError::Segmentation(err) | HumanizeError::Tagging(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generic::tests::ScriptedCoins;

    /// Fails to tag any sentence containing `poison`.
    struct FailingBackend;

    impl LanguageBackend for FailingBackend {
        fn segment_sentences(&self, text: &str) -> Result<Vec<String>, NlpError> {
            RuleBasedBackend.segment_sentences(text)
        }

        fn tag_tokens(
            &self,
            sentence: &str,
            language: &str,
        ) -> Result<Vec<TaggedToken>, NlpError> {
            if sentence.contains("poison") {
                return Err(NlpError::TaggingFailed {
                    sentence: sentence.to_string(),
                    reason: "unknown word".to_string(),
                });
            }
            RuleBasedBackend.tag_tokens(sentence, language)
        }
    }

    /// Segments into nothing at all.
    struct SilentBackend;

    impl LanguageBackend for SilentBackend {
        fn segment_sentences(&self, _text: &str) -> Result<Vec<String>, NlpError> {
            Ok(Vec::new())
        }

        fn tag_tokens(
            &self,
            _sentence: &str,
            _language: &str,
        ) -> Result<Vec<TaggedToken>, NlpError> {
            Ok(Vec::new())
        }
    }

    fn humanize_with(text: &str, tone: Option<Tone>, coins: &[bool]) -> String {
        let options = Options {
            tone,
            ..Options::default()
        };
        Humanizer::with_parts(RuleBasedBackend, ScriptedCoins::new(coins), options)
            .humanize(text)
            .unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(humanize_input_text("", "casual", "EN").unwrap(), "");
        assert_eq!(humanize_input_text("  \n ", "formal", "EN").unwrap(), "");
    }

    #[test]
    fn test_formal_scenario() {
        assert_eq!(
            humanize_with("He's not happy and he can't go.", Some(Tone::Formal), &[]),
            "He is not happy and he cannot go."
        );
    }

    #[test]
    fn test_formal_text_round_trips_through_pipeline() {
        // generic pass contracts, formal pass expands again
        assert_eq!(
            humanize_with("He is not happy and he cannot go.", Some(Tone::Formal), &[]),
            "He is not happy and he cannot go."
        );
    }

    #[test]
    fn test_sentences_rejoined_with_period() {
        assert_eq!(
            humanize_with("Wait, really? Yes!", None, &[]),
            "Wait really. Yes!"
        );
    }

    #[test]
    fn test_word_no_still_ends_a_sentence() {
        assert_eq!(
            humanize_with("The answer was no. We moved on.", None, &[]),
            "The answer was no. We moved on."
        );
    }

    #[test]
    fn test_typographic_apostrophes_through_pipeline() {
        let input = "He\u{2019}s not happy and he can\u{2019}t go.";
        assert_eq!(
            humanize_with(input, Some(Tone::Formal), &[]),
            "He is not happy and he cannot go."
        );
    }

    #[test]
    fn test_nan_merge_probability_does_not_panic() {
        let options = Options {
            tone: None,
            merge_probability: f64::NAN,
            ..Options::default()
        };
        let output = Humanizer::with_parts(RuleBasedBackend, ScriptedCoins::new(&[true]), options)
            .humanize("One here. Two there.")
            .unwrap();
        assert_eq!(output, "One here, and Two there.");
    }

    #[test]
    fn test_merge_then_casual() {
        assert_eq!(
            humanize_with("It is not ready. We do not know.", Some(Tone::Casual), &[true]),
            "It isn't ready, and We don't know."
        );
    }

    #[test]
    fn test_tone_skipped_when_none() {
        assert_eq!(humanize_with("This is great!", None, &[]), "This is great!");
        assert_eq!(
            humanize_with("This is great!", Some(Tone::Enthusiastic), &[]),
            "This is fantastic!!!!!!"
        );
    }

    #[test]
    fn test_unknown_tone_is_pass_through() {
        let output = humanize_input_text("I do not know", "grumpy", "EN").unwrap();
        assert_eq!(output, "I don't know");
    }

    #[test]
    fn test_tagging_failure_fails_whole_call() {
        let mut humanizer = Humanizer::with_parts(
            FailingBackend,
            ScriptedCoins::new(&[]),
            Options::default(),
        );
        let err = humanizer
            .humanize("This is fine. This is poison. This is fine too.")
            .unwrap_err();
        assert_eq!(
            err,
            HumanizeError::Tagging(NlpError::TaggingFailed {
                sentence: "This is poison.".to_string(),
                reason: "unknown word".to_string(),
            })
        );
        assert!(err.to_string().contains("unknown word"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_zero_sentences_yield_empty_output() {
        let mut humanizer =
            Humanizer::with_parts(SilentBackend, ScriptedCoins::new(&[]), Options::default());
        assert_eq!(humanizer.humanize("Something here.").unwrap(), "");
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let text = "One day. Two days. Three days. Four days. Five days.";
        let a = Humanizer::seeded(Options::default(), 3).humanize(text).unwrap();
        let b = Humanizer::seeded(Options::default(), 3).humanize(text).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_final_terminal() {
        assert_eq!(final_terminal("Done.  "), Some('.'));
        assert_eq!(final_terminal("Done?"), Some('?'));
        assert_eq!(final_terminal("Done"), None);
    }
}
