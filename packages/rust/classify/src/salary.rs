//! Salary normalization: minimum net monthly amount in roubles.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use jobnote_shared::SalaryConfig;

use crate::lexicon::Lexicon;

/// Currency the normalized amount is always expressed in.
pub const OUTPUT_CURRENCY: &str = "RUB";

/// Currency detected in a salary string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Rub,
    Eur,
    Usd,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rub => "RUB",
            Self::Eur => "EUR",
            Self::Usd => "USD",
        })
    }
}

/// Conversion constants.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryPolicy {
    pub usd_rate: f64,
    pub eur_rate: f64,
    /// Gross → net multiplier.
    pub net_factor: f64,
    /// Rounding step.
    pub round_to: u64,
}

impl Default for SalaryPolicy {
    fn default() -> Self {
        Self::from(&SalaryConfig::default())
    }
}

impl From<&SalaryConfig> for SalaryPolicy {
    fn from(config: &SalaryConfig) -> Self {
        Self {
            usd_rate: config.usd_rate,
            eur_rate: config.eur_rate,
            net_factor: config.net_factor,
            round_to: config.round_to.max(1),
        }
    }
}

impl SalaryPolicy {
    fn to_rub(&self, amount: f64, currency: Currency) -> f64 {
        match currency {
            Currency::Rub => amount,
            Currency::Usd => amount * self.usd_rate,
            Currency::Eur => amount * self.eur_rate,
        }
    }

    fn round(&self, amount: f64) -> f64 {
        let step = self.round_to as f64;
        (amount / step).round() * step
    }
}

/// Normalized salary fields of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryEstimate {
    /// Rounded minimum net amount in RUB, or `""`.
    pub salary_min_net: String,
    /// Always `"RUB"`.
    pub salary_currency: String,
    /// Currency the source text was stated in.
    #[serde(skip)]
    pub detected_currency: Currency,
}

impl SalaryEstimate {
    fn empty(detected_currency: Currency) -> Self {
        Self {
            salary_min_net: String::new(),
            salary_currency: OUTPUT_CURRENCY.to_string(),
            detected_currency,
        }
    }
}

/// Numbers in `text`, with space/NBSP thousands separators folded in.
pub(crate) fn numeric_values(text: &str) -> Vec<u64> {
    static NUM_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\d[\d\s]*\d|\d").expect("valid regex"));

    NUM_RE
        .find_iter(text)
        .filter_map(|m| {
            let digits: String = m.as_str().chars().filter(char::is_ascii_digit).collect();
            digits.parse::<u64>().ok()
        })
        .collect()
}

pub(crate) fn parse_salary(text: &str, lexicon: &Lexicon, policy: &SalaryPolicy) -> SalaryEstimate {
    let currency = lexicon
        .currencies
        .first_match(text)
        .copied()
        .unwrap_or_default();

    let Some(min) = numeric_values(text).into_iter().min() else {
        return SalaryEstimate::empty(currency);
    };

    let mut amount = policy.to_rub(min as f64, currency);

    let gross = lexicon.gross_marker.is_match(text);
    let net = lexicon.net_marker.is_match(text);
    if gross && !net {
        amount *= policy.net_factor;
    }

    let rounded = policy.round(amount);
    if rounded <= 0.0 {
        return SalaryEstimate::empty(currency);
    }

    SalaryEstimate {
        salary_min_net: format!("{}", rounded as u64),
        salary_currency: OUTPUT_CURRENCY.to_string(),
        detected_currency: currency,
    }
}
