//! Tone-specific rewrite pass.
//!
//! Each [`Tone`] selects one ordered rule table; a single engine
//! ([`RuleSet`]) applies whichever table is selected. The formal and casual
//! tables come from [`crate::lexicon`] and match case-insensitively; the
//! enthusiastic and authoritative tables match their phrases exactly.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::lexicon::{CONTRACTIONS, FORMALIZATIONS};
use crate::rules::{CaseMode, RuleSet};

/// The register the output text is rewritten into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Tone {
    /// Expand contractions.
    Formal,
    /// Contract expanded phrases.
    Casual,
    /// Intensify adjectives and triple exclamation marks.
    Enthusiastic,
    /// Replace hedging with confident phrasing.
    Authoritative,
}

impl Tone {
    pub const ALL: [Tone; 4] = [
        Tone::Formal,
        Tone::Casual,
        Tone::Enthusiastic,
        Tone::Authoritative,
    ];

    /// The lowercase name used in configuration files and bindings.
    pub fn name(self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Enthusiastic => "enthusiastic",
            Tone::Authoritative => "authoritative",
        }
    }

    fn rules(self) -> &'static RuleSet {
        match self {
            Tone::Formal => &FORMAL_RULES,
            Tone::Casual => &CASUAL_RULES,
            Tone::Enthusiastic => &ENTHUSIASTIC_RULES,
            Tone::Authoritative => &AUTHORITATIVE_RULES,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tone {
    type Err = ToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|tone| tone.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ToneError::Unknown(s.to_string()))
    }
}

/// Errors from parsing a tone name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToneError {
    /// The name is not one of the supported tones.
    Unknown(String),
}

impl fmt::Display for ToneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToneError::Unknown(name) => write!(f, "unknown tone: {:?}", name),
        }
    }
}

impl std::error::Error for ToneError {}

/// Intensifiers, in application order. `amazing` is both a target and a
/// source, so `good` ends up as `spectacular`.
const ENTHUSIASTIC: &[(&str, &str)] = &[
    ("I am", "I'm so"),
    ("very", "incredibly"),
    ("great", "fantastic"),
    ("good", "amazing"),
    ("happy", "thrilled"),
    ("excited", "super excited"),
    ("love", "absolutely love"),
    ("really", "truly"),
    ("amazing", "spectacular"),
    ("wonderful", "wonderful!"),
    ("fantastic", "fantastic!"),
    ("excellent", "excellent!"),
    ("great", "great!"),
    ("awesome", "awesome!"),
    ("stunning", "stunning!"),
];

/// First-person hedges, then modal verbs.
const AUTHORITATIVE: &[(&str, &str)] = &[
    ("I think", "I am confident"),
    ("maybe", "definitely"),
    ("perhaps", "certainly"),
    ("I feel", "I believe"),
    ("I guess", "I am sure"),
    ("I hope", "I expect"),
    ("I suppose", "I know"),
    ("I might", "I will"),
    ("should", "must"),
    ("can", "will"),
    ("could", "will"),
];

static FORMAL_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::from_pairs(
        FORMALIZATIONS
            .iter()
            .map(|(contracted, expansion)| (*contracted, expansion.canonical())),
        CaseMode::Insensitive,
    )
    .expect("formalization table compiles")
});

static CASUAL_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::from_pairs(CONTRACTIONS.iter().copied(), CaseMode::Insensitive)
        .expect("contraction table compiles")
});

static ENTHUSIASTIC_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::from_pairs(ENTHUSIASTIC.iter().copied(), CaseMode::Sensitive)
        .expect("enthusiastic table compiles")
});

static AUTHORITATIVE_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::from_pairs(AUTHORITATIVE.iter().copied(), CaseMode::Sensitive)
        .expect("authoritative table compiles")
});

/// Rewrites `text` into the given tone.
pub fn apply_tone(text: &str, tone: Tone) -> String {
    let rewritten = tone.rules().apply(text);
    match tone {
        Tone::Enthusiastic => rewritten.replace('!', "!!!"),
        _ => rewritten,
    }
}

/// Rewrites `text` into the tone called `name`.
///
/// Unknown names leave the text unchanged.
pub fn apply_tone_named(text: &str, name: &str) -> String {
    match name.parse::<Tone>() {
        Ok(tone) => apply_tone(text, tone),
        Err(err) => {
            tracing::warn!("{err}; leaving text unchanged");
            text.to_string()
        }
    }
}
