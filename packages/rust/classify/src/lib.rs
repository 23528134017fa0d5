//! Rule-based classification of vacancy text: role, level, work mode, salary.
//!
//! All tables come from a [`Lexicon`]; [`Classifier`] pairs one with a
//! [`SalaryPolicy`]. The free functions use the built-in defaults.

pub mod level;
pub mod lexicon;
pub mod rules;
pub mod salary;

use std::sync::LazyLock;

use jobnote_shared::{Level, WorkMode};
use jobnote_text::clean_text;

pub use lexicon::Lexicon;
pub use rules::{Rule, RuleSet};
pub use salary::{Currency, OUTPUT_CURRENCY, SalaryEstimate, SalaryPolicy};

/// Lexicon + salary policy. Every method is pure and infallible.
#[derive(Debug, Clone)]
pub struct Classifier {
    lexicon: Lexicon,
    salary_policy: SalaryPolicy,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Lexicon::builtin().clone(), SalaryPolicy::default())
    }
}

impl Classifier {
    pub fn new(lexicon: Lexicon, salary_policy: SalaryPolicy) -> Self {
        Self {
            lexicon,
            salary_policy,
        }
    }

    pub fn with_salary_policy(mut self, policy: SalaryPolicy) -> Self {
        self.salary_policy = policy;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn salary_policy(&self) -> &SalaryPolicy {
        &self.salary_policy
    }

    /// Canonical role category, or the cleaned title when nothing matches.
    pub fn normalize_role(&self, role: &str) -> String {
        match self.lexicon.roles.first_match(role) {
            Some(canonical) => canonical.clone(),
            None => clean_text(role),
        }
    }

    pub fn level_from_hint(&self, hint: &str) -> Option<Level> {
        level::level_from_hint(hint, &self.lexicon)
    }

    pub fn infer_level(&self, role: &str, text: &str, level_hint: &str) -> Option<Level> {
        level::infer_level(role, text, level_hint, &self.lexicon)
    }

    pub fn infer_work_mode(&self, text: &str) -> Option<WorkMode> {
        self.lexicon.work_modes.first_match(text).copied()
    }

    pub fn parse_salary(&self, text: &str) -> SalaryEstimate {
        salary::parse_salary(text, &self.lexicon, &self.salary_policy)
    }
}

fn default_classifier() -> &'static Classifier {
    static DEFAULT: LazyLock<Classifier> = LazyLock::new(Classifier::default);
    &DEFAULT
}

pub fn normalize_role(role: &str) -> String {
    default_classifier().normalize_role(role)
}

pub fn infer_level(role: &str, text: &str, level_hint: &str) -> Option<Level> {
    default_classifier().infer_level(role, text, level_hint)
}

pub fn infer_work_mode(text: &str) -> Option<WorkMode> {
    default_classifier().infer_work_mode(text)
}

/// Minimum net monthly salary in RUB with the default policy.
pub fn parse_salary_min_net_and_currency(text: &str) -> SalaryEstimate {
    default_classifier().parse_salary(text)
}
