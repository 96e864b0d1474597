//! Tone-independent humanization: contractions plus sentence-length
//! variation.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::lexicon::CONTRACTIONS;
use crate::rules::{CaseMode, RuleSet};

/// Default probability of each merge coin toss.
pub const DEFAULT_MERGE_PROBABILITY: f64 = 0.5;

static CONTRACTION_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::from_pairs(CONTRACTIONS.iter().copied(), CaseMode::Insensitive)
        .expect("contraction table compiles")
});

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([.?!])\s+").unwrap());

/// Replaces every expanded phrase with its contraction, in table order.
pub fn replace_contractions(text: &str) -> String {
    CONTRACTION_RULES.apply(text)
}

/// One sentence body and the terminal punctuation that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fragment<'a> {
    body: &'a str,
    terminator: &'a str,
}

/// Splits at terminal punctuation followed by whitespace and an uppercase
/// letter. The punctuation is kept apart from the body; the whitespace is
/// dropped.
fn split_fragments(text: &str) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::new();
    let mut start = 0;
    for caps in SENTENCE_BREAK.captures_iter(text) {
        let (Some(whole), Some(punct)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let next_is_upper = text[whole.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase());
        if !next_is_upper {
            continue;
        }
        fragments.push(Fragment {
            body: &text[start..punct.start()],
            terminator: punct.as_str(),
        });
        start = whole.end();
    }
    fragments.push(Fragment {
        body: &text[start..],
        terminator: "",
    });
    fragments
}

/// Randomly joins neighbouring sentences to vary sentence length.
///
/// For each sentence that has a successor, one coin toss decides whether to
/// join the successor with `", and "`; failing that, a second toss decides
/// whether to join with `", but "`. A joined successor is consumed and its
/// terminal punctuation closes the merged sentence. Sentences are then
/// rejoined with single spaces.
///
/// `merge_probability` is clamped to [0, 1]; NaN falls back to
/// [`DEFAULT_MERGE_PROBABILITY`]. Merging only ever lowers the sentence
/// count. The result depends on `rng`.
pub fn vary_sentence_length<R: Rng + ?Sized>(
    text: &str,
    rng: &mut R,
    merge_probability: f64,
) -> String {
    let probability = if merge_probability.is_nan() {
        DEFAULT_MERGE_PROBABILITY
    } else {
        merge_probability.clamp(0.0, 1.0)
    };
    let fragments = split_fragments(text);
    let mut sentences = Vec::with_capacity(fragments.len());
    let mut i = 0;

    while i < fragments.len() {
        let current = &fragments[i];
        let next = fragments.get(i + 1);
        let connector = match next {
            Some(_) if rng.random_bool(probability) => Some(", and "),
            Some(_) if rng.random_bool(probability) => Some(", but "),
            _ => None,
        };

        match (connector, next) {
            (Some(connector), Some(next)) => {
                tracing::trace!(connector, index = i, "merging sentences");
                sentences.push(format!(
                    "{}{}{}{}",
                    current.body,
                    connector,
                    next.body.trim(),
                    next.terminator
                ));
                i += 2;
            }
            _ => {
                sentences.push(format!("{}{}", current.body, current.terminator));
                i += 1;
            }
        }
    }

    sentences.join(" ")
}

/// Applies [`replace_contractions`] followed by [`vary_sentence_length`].
pub fn humanize_generic<R: Rng + ?Sized>(
    text: &str,
    rng: &mut R,
    merge_probability: f64,
) -> String {
    let contracted = replace_contractions(text);
    vary_sentence_length(&contracted, rng, merge_probability)
}
