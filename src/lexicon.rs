//! Static phrase tables mapping expanded English phrases to their contracted
//! forms and back.
//!
//! Both tables are ordered: the substitution passes in [`crate::generic`] and
//! [`crate::tone`] walk them in declaration order, and a later entry may act
//! on the output of an earlier one.

use std::sync::LazyLock;

use indexmap::IndexMap;

/// The expanded form(s) a contraction stands for.
///
/// Ambiguous contractions such as `it's` list every reading; the first one is
/// the canonical choice used by the formal tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// Exactly one expanded form.
    Single(&'static str),
    /// Several readings, canonical first.
    Ambiguous(&'static [&'static str]),
}

impl Expansion {
    /// The expansion chosen when no context is available.
    pub fn canonical(&self) -> &'static str {
        match *self {
            Expansion::Single(phrase) => phrase,
            Expansion::Ambiguous(candidates) => candidates[0],
        }
    }

    /// Every reading of the contraction, canonical first.
    pub fn candidates(&self) -> &[&'static str] {
        match self {
            Expansion::Single(phrase) => std::slice::from_ref(phrase),
            Expansion::Ambiguous(candidates) => candidates,
        }
    }

    /// Whether the contraction has more than one reading.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Expansion::Ambiguous(_))
    }
}

use Expansion::{Ambiguous, Single};

/// Expanded phrase to contraction, keys lowercase.
pub const CONTRACTIONS: &[(&str, &str)] = &[
    ("are not", "aren't"),
    ("cannot", "can't"),
    ("could not", "couldn't"),
    ("did not", "didn't"),
    ("do not", "don't"),
    ("does not", "doesn't"),
    ("had not", "hadn't"),
    ("has not", "hasn't"),
    ("have not", "haven't"),
    ("he is", "he's"),
    ("he will", "he'll"),
    ("he would", "he'd"),
    ("he had", "he'd"),
    ("he has", "he's"),
    ("i am", "I'm"),
    ("i have", "I've"),
    ("i will", "I'll"),
    ("i would", "I'd"),
    ("i had", "I'd"),
    ("i has", "I've"),
    ("is not", "isn't"),
    ("it is", "it's"),
    ("let us", "let's"),
    ("must not", "mustn't"),
    ("shall not", "shan't"),
    ("she is", "she's"),
    ("she will", "she'll"),
    ("she would", "she'd"),
    ("she had", "she'd"),
    ("she has", "she's"),
    ("should not", "shouldn't"),
    ("that is", "that's"),
    ("there is", "there's"),
    ("they are", "they're"),
    ("they have", "they've"),
    ("they will", "they'll"),
    ("they would", "they'd"),
    ("they had", "they'd"),
    ("they has", "they've"),
    ("we are", "we're"),
    ("we have", "we've"),
    ("we will", "we'll"),
    ("we would", "we'd"),
    ("we had", "we'd"),
    ("we has", "we've"),
    ("were not", "weren't"),
    ("will not", "won't"),
    ("would not", "wouldn't"),
    ("you are", "you're"),
    ("you have", "you've"),
    ("you will", "you'll"),
    ("you would", "you'd"),
    ("you had", "you'd"),
    ("you has", "you've"),
    ("was not", "wasn't"),
    ("it has", "it's"),
    ("who is", "who's"),
    ("who will", "who'll"),
    ("who would", "who'd"),
    ("who had", "who'd"),
    ("who has", "who's"),
    ("what is", "what's"),
    ("what will", "what'll"),
    ("what would", "what'd"),
    ("what had", "what'd"),
    ("what has", "what's"),
    ("where is", "where's"),
    ("where will", "where'll"),
    ("where would", "where'd"),
    ("where had", "where'd"),
    ("where has", "where's"),
    ("when is", "when's"),
    ("when will", "when'll"),
    ("when would", "when'd"),
    ("when had", "when'd"),
    ("when has", "when's"),
    ("why is", "why's"),
    ("why will", "why'll"),
    ("why would", "why'd"),
    ("why had", "why'd"),
    ("why has", "why's"),
    ("how is", "how's"),
    ("how will", "how'll"),
    ("how would", "how'd"),
    ("how had", "how'd"),
    ("how has", "how's"),
];

/// Contraction to expanded phrase(s), keys lowercase.
pub const FORMALIZATIONS: &[(&str, Expansion)] = &[
    ("aren't", Single("are not")),
    ("can't", Single("cannot")),
    ("couldn't", Single("could not")),
    ("didn't", Single("did not")),
    ("doesn't", Single("does not")),
    ("don't", Single("do not")),
    ("hadn't", Single("had not")),
    ("hasn't", Single("has not")),
    ("haven't", Single("have not")),
    ("he's", Single("he is")),
    ("he'll", Single("he will")),
    ("he'd", Ambiguous(&["he would", "he had"])),
    ("i'm", Single("I am")),
    ("i've", Single("I have")),
    ("i'll", Single("I will")),
    ("i'd", Ambiguous(&["I would", "I had"])),
    ("isn't", Single("is not")),
    ("it's", Ambiguous(&["it is", "it has"])),
    ("let's", Single("let us")),
    ("mustn't", Single("must not")),
    ("shan't", Single("shall not")),
    ("she's", Single("she is")),
    ("she'll", Single("she will")),
    ("she'd", Ambiguous(&["she would", "she had"])),
    ("shouldn't", Single("should not")),
    ("that's", Single("that is")),
    ("there's", Single("there is")),
    ("they're", Single("they are")),
    ("they've", Single("they have")),
    ("they'll", Single("they will")),
    ("they'd", Ambiguous(&["they would", "they had"])),
    ("we're", Single("we are")),
    ("we've", Single("we have")),
    ("we'll", Single("we will")),
    ("we'd", Ambiguous(&["we would", "we had"])),
    ("weren't", Single("were not")),
    ("won't", Single("will not")),
    ("wouldn't", Single("would not")),
    ("you're", Single("you are")),
    ("you've", Single("you have")),
    ("you'll", Single("you will")),
    ("you'd", Ambiguous(&["you would", "you had"])),
    ("wasn't", Single("was not")),
    ("who's", Ambiguous(&["who is", "who has"])),
    ("who'll", Single("who will")),
    ("who'd", Ambiguous(&["who would", "who had"])),
    ("what's", Ambiguous(&["what is", "what has"])),
    ("what'll", Single("what will")),
    ("what'd", Ambiguous(&["what would", "what had"])),
    ("where's", Ambiguous(&["where is", "where has"])),
    ("where'll", Single("where will")),
    ("where'd", Ambiguous(&["where would", "where had"])),
    ("when's", Ambiguous(&["when is", "when has"])),
    ("when'll", Single("when will")),
    ("when'd", Ambiguous(&["when would", "when had"])),
    ("why's", Ambiguous(&["why is", "why has"])),
    ("why'll", Single("why will")),
    ("why'd", Ambiguous(&["why would", "why had"])),
    ("how's", Ambiguous(&["how is", "how has"])),
    ("how'll", Single("how will")),
    ("how'd", Ambiguous(&["how would", "how had"])),
];

static CONTRACTION_INDEX: LazyLock<IndexMap<&'static str, &'static str>> =
    LazyLock::new(|| CONTRACTIONS.iter().copied().collect());

static FORMALIZATION_INDEX: LazyLock<IndexMap<&'static str, Expansion>> =
    LazyLock::new(|| FORMALIZATIONS.iter().copied().collect());

/// Normalizes a lookup key: lowercase, inner whitespace collapsed, and curly
/// apostrophes folded to straight ones.
fn lookup_key(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\u{2019}', "'")
        .to_lowercase()
}

/// Looks up the contracted form of an expanded phrase (`"do not"` → `"don't"`).
///
/// Matching is case-insensitive on the whole phrase. Returns `None` when the
/// phrase has no contraction.
pub fn contract(phrase: &str) -> Option<&'static str> {
    CONTRACTION_INDEX.get(lookup_key(phrase).as_str()).copied()
}

/// Looks up the expanded form(s) of a contraction (`"it's"` → `it is` / `it has`).
///
/// Matching is case-insensitive on the whole phrase. Returns `None` when the
/// phrase is not a known contraction.
pub fn expand(phrase: &str) -> Option<Expansion> {
    FORMALIZATION_INDEX.get(lookup_key(phrase).as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_simple() {
        assert_eq!(contract("do not"), Some("don't"));
        assert_eq!(contract("cannot"), Some("can't"));
    }

    #[test]
    fn test_contract_is_case_insensitive() {
        assert_eq!(contract("Do Not"), Some("don't"));
        assert_eq!(contract("I AM"), Some("I'm"));
    }

    #[test]
    fn test_contract_multi_word_keys() {
        assert_eq!(contract("let us"), Some("let's"));
        assert_eq!(contract("where would"), Some("where'd"));
        assert_eq!(contract("where  would"), Some("where'd"));
    }

    #[test]
    fn test_contract_unknown_phrase() {
        assert_eq!(contract("hello world"), None);
        assert_eq!(contract(""), None);
        assert_eq!(contract("do"), None);
    }

    #[test]
    fn test_expand_single() {
        let expansion = expand("can't").unwrap();
        assert_eq!(expansion, Expansion::Single("cannot"));
        assert!(!expansion.is_ambiguous());
        assert_eq!(expansion.candidates(), &["cannot"]);
    }

    #[test]
    fn test_expand_ambiguous_prefers_first_candidate() {
        let expansion = expand("it's").unwrap();
        assert!(expansion.is_ambiguous());
        assert_eq!(expansion.canonical(), "it is");
        assert_eq!(expansion.candidates(), &["it is", "it has"]);
    }

    #[test]
    fn test_expand_is_case_insensitive() {
        assert_eq!(expand("I'M").map(|e| e.canonical()), Some("I am"));
        assert_eq!(expand("Won't").map(|e| e.canonical()), Some("will not"));
    }

    #[test]
    fn test_expand_accepts_curly_apostrophe() {
        assert_eq!(expand("don\u{2019}t").map(|e| e.canonical()), Some("do not"));
    }

    #[test]
    fn test_expand_unknown_phrase() {
        assert_eq!(expand("do not"), None);
        assert_eq!(expand("ain't"), None);
    }

    #[test]
    fn test_table_keys_are_lowercase() {
        for (key, _) in CONTRACTIONS {
            assert_eq!(*key, key.to_lowercase());
        }
        for (key, _) in FORMALIZATIONS {
            assert_eq!(*key, key.to_lowercase());
        }
    }

    #[test]
    fn test_formalization_keys_are_unique() {
        assert_eq!(FORMALIZATION_INDEX.len(), FORMALIZATIONS.len());
        assert_eq!(CONTRACTION_INDEX.len(), CONTRACTIONS.len());
    }

    #[test]
    fn test_canonical_round_trip() {
        // contracting the canonical expansion and expanding again is stable
        for (key, expansion) in FORMALIZATIONS {
            let canonical = expansion.canonical();
            let Some(contracted) = contract(canonical) else {
                continue;
            };
            assert_eq!(contracted.to_lowercase(), *key, "{canonical}");
            assert_eq!(expand(contracted).map(|e| e.canonical()), Some(canonical));
        }
    }
}
