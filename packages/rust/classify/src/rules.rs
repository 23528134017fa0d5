//! Ordered "first match wins" rule tables.
//!
//! A [`RuleSet`] is plain data: a list of `(pattern, unless, outcome)` rules
//! evaluated top to bottom. Precedence is the order of the list, so reordering
//! or swapping a table never touches control flow.

use regex::{Regex, RegexBuilder};

use jobnote_shared::{JobNoteError, Result};

fn compile(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| JobNoteError::parse(format!("invalid rule pattern '{pattern}': {e}")))
}

/// One classification rule. Patterns are case-insensitive.
#[derive(Debug, Clone)]
pub struct Rule<T> {
    pattern: Regex,
    unless: Option<Regex>,
    outcome: T,
}

impl<T> Rule<T> {
    pub fn new(pattern: &str, outcome: T) -> Result<Self> {
        Ok(Self {
            pattern: compile(pattern)?,
            unless: None,
            outcome,
        })
    }

    /// Skip occurrences where `pattern` matches at the same position
    /// (e.g. "junior" but not the "junior" of "junior+").
    pub fn unless(mut self, pattern: &str) -> Result<Self> {
        self.unless = Some(compile(pattern)?);
        Ok(self)
    }

    pub fn matches(&self, text: &str) -> bool {
        let Some(unless) = &self.unless else {
            return self.pattern.is_match(text);
        };
        self.pattern.find_iter(text).any(|m| {
            !unless
                .find_at(text, m.start())
                .is_some_and(|u| u.start() == m.start())
        })
    }

    pub fn outcome(&self) -> &T {
        &self.outcome
    }
}

/// Rules evaluated in order; the first matching rule decides.
#[derive(Debug, Clone)]
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleSet<T> {
    pub fn new(rules: Vec<Rule<T>>) -> Self {
        Self { rules }
    }

    /// Build from `(pattern, outcome)` pairs.
    pub fn from_pairs<I, P>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
    {
        let rules = pairs
            .into_iter()
            .map(|(p, o)| Rule::new(p.as_ref(), o))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(rules))
    }

    pub fn first_match(&self, text: &str) -> Option<&T> {
        self.rules.iter().find(|r| r.matches(text)).map(Rule::outcome)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_rule_wins() {
        let rules = RuleSet::from_pairs([("ml", "first"), ("ml engineer", "second")]).unwrap();
        assert_eq!(rules.first_match("Senior ML Engineer"), Some(&"first"));
        assert_eq!(rules.first_match("analyst"), None);
    }

    #[test]
    fn unless_suppresses_rule() {
        let rules = RuleSet::new(vec![
            Rule::new(r"\bjunior\b", 1).unwrap().unless(r"junior\s*\+").unwrap(),
            Rule::new(r"junior\s*\+", 2).unwrap(),
        ]);
        assert_eq!(rules.first_match("Junior analyst"), Some(&1));
        assert_eq!(rules.first_match("Junior+ analyst"), Some(&2));
    }

    #[test]
    fn unless_only_covers_its_own_occurrence() {
        let rules = RuleSet::new(vec![
            Rule::new(r"\bjunior\b", 1).unwrap().unless(r"junior\s*\+").unwrap(),
            Rule::new(r"junior\s*\+", 2).unwrap(),
        ]);
        assert_eq!(rules.first_match("Junior analyst, рост до junior+"), Some(&1));
        assert_eq!(rules.first_match("Junior+ analyst, not a junior role"), Some(&1));
        assert_eq!(rules.first_match("junior +"), Some(&2));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = Rule::new("(unclosed", ()).unwrap_err();
        assert!(err.to_string().contains("invalid rule pattern"));
    }
}
