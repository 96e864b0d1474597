//! Ordered phrase-substitution engine shared by every rewrite pass.
//!
//! A [`RuleSet`] is a list of whole-word [`Rule`]s applied one after another
//! over the full text. Order matters: a rule sees the output of every rule
//! declared before it.

use regex::{Captures, Regex};

/// How a rule matches its phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    /// The phrase must appear exactly as written.
    Sensitive,
    /// The phrase matches in any letter case. The first letter of the
    /// replacement is capitalized when the matched text starts with a
    /// capital, so sentence-initial words keep their capital.
    Insensitive,
}

/// A single whole-word substitution.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    replacement: String,
    mode: CaseMode,
}

impl Rule {
    /// Builds a rule replacing `phrase` wherever it occurs between word
    /// boundaries. An apostrophe in `phrase` also matches the typographic
    /// apostrophe (U+2019).
    pub fn new(phrase: &str, replacement: &str, mode: CaseMode) -> Result<Self, regex::Error> {
        let flags = match mode {
            CaseMode::Sensitive => "",
            CaseMode::Insensitive => "(?i)",
        };
        let phrase = regex::escape(phrase).replace('\'', "['\u{2019}]");
        let pattern = Regex::new(&format!(r"{}\b{}\b", flags, phrase))?;
        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
            mode,
        })
    }

    /// Applies the rule to every match in `text`.
    pub fn apply(&self, text: &str) -> String {
        match self.mode {
            CaseMode::Sensitive => self
                .pattern
                .replace_all(text, regex::NoExpand(&self.replacement))
                .into_owned(),
            CaseMode::Insensitive => self
                .pattern
                .replace_all(text, |caps: &Captures<'_>| {
                    match_case(&caps[0], &self.replacement)
                })
                .into_owned(),
        }
    }
}

/// Carries the capitalization of the matched text's first letter over to
/// the replacement. Lowercase matches keep the replacement as declared, so
/// `I'm` stays capitalized.
fn match_case(matched: &str, replacement: &str) -> String {
    let starts_upper = matched.chars().next().is_some_and(|c| c.is_uppercase());
    if !starts_upper {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// An ordered list of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compiles a rule set from `(phrase, replacement)` pairs in order.
    pub fn from_pairs<'a, I>(pairs: I, mode: CaseMode) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rules = pairs
            .into_iter()
            .map(|(phrase, replacement)| Rule::new(phrase, replacement, mode))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Runs every rule over the text in declaration order.
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}
