//! Rule tables for Russian/English vacancy text.
//!
//! Everything language-specific lives here, so another region only needs
//! another [`Lexicon`].

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use jobnote_shared::{JobNoteError, Level, Result, WorkMode};

use crate::rules::{Rule, RuleSet};
use crate::salary::Currency;

/// Every table the classifier consults.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Role category by title, most specific first.
    pub roles: RuleSet<String>,
    /// Keywords in a structured level label (checked before anything else).
    pub level_hints: RuleSet<Level>,
    /// Explicit level words in title + description.
    pub level_words: RuleSet<Level>,
    /// Experience ranges: captures `min` and `max` years.
    pub experience_range: Regex,
    /// Experience lower bounds: captures `min` years.
    pub experience_min: Regex,
    /// Word that has to sit near a lower bound for it to count as experience.
    pub experience_anchor: Regex,
    /// Work mode phrases, conditional remote before plain remote.
    pub work_modes: RuleSet<WorkMode>,
    /// Currency by symbol or word.
    pub currencies: RuleSet<Currency>,
    /// Salary stated before tax.
    pub gross_marker: Regex,
    /// Salary stated after tax.
    pub net_marker: Regex,
}

fn ci(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| JobNoteError::parse(format!("invalid lexicon pattern '{pattern}': {e}")))
}

const YEARS: &str = r"(?:год|года|лет|years?)";

impl Lexicon {
    /// The built-in Russian + English lexicon.
    pub fn builtin() -> &'static Self {
        static BUILTIN: LazyLock<Lexicon> = LazyLock::new(|| {
            Lexicon::russian_english().expect("built-in lexicon patterns are valid")
        });
        &BUILTIN
    }

    pub fn russian_english() -> Result<Self> {
        let roles = RuleSet::from_pairs([
            (
                r"data\s*analyst|аналитик\s*данных|дата[\s-]*аналитик|обработк\w*\s*данных|специалист\s*по\s*обработк\w*\s*данных",
                "Data Analyst".to_string(),
            ),
            (
                r"product\s*analyst|продуктов(?:ый|ая|ого)\s*аналитик",
                "Product Analyst".to_string(),
            ),
            (
                r"bi[\s-]*(?:analyst|аналитик)|аналитик\s*bi|power\s*bi|business\s*intelligence",
                "BI Analyst".to_string(),
            ),
            // plain "ml" is too broad for this one
            (
                r"data[\s-]*scientist|data\s*science|дата\s*сайентист",
                "Data Scientist".to_string(),
            ),
            (
                r"ml\s*engineer|machine\s*learning\s*engineer|\bmle\b",
                "ML Engineer".to_string(),
            ),
            (
                r"data\s*engineer|инженер\s*данных|dwh\s*engineer?|airflow",
                "Data Engineer".to_string(),
            ),
        ])?;

        let level_hints = RuleSet::from_pairs([
            (r"junior|младш", Level::Junior),
            (r"middle|средн", Level::Middle),
            (r"senior|старш", Level::Senior),
            (r"intern|стаж", Level::Intern),
        ])?;

        let junior_plus = r"(?:\bjunior|\bджун\w*)\s*\+";
        let level_words = RuleSet::new(vec![
            Rule::new(
                r"\b(?:intern|internship|стаж[её]р\w*|стажировк\w*)\b",
                Level::Intern,
            )?,
            Rule::new(r"\b(?:junior|джун\w*|младш(?:ий|ая|его|ей))\b", Level::Junior)?
                .unless(junior_plus)?,
            Rule::new(junior_plus, Level::JuniorPlus)?,
            Rule::new(r"\b(?:middle|mid|мидл|средн(?:ий|яя|его|ей))\b", Level::Middle)?,
            Rule::new(
                r"\b(?:senior|lead|principal|синьор|сеньор|старш(?:ий|ая|его|ей)|ведущ(?:ий|ая|его|ей))\b",
                Level::Senior,
            )?,
        ]);

        let experience_range = ci(&format!(
            r"(?:от\s*)?(?P<min>\d{{1,2}})\s*(?:[-–—]|до)\s*(?P<max>\d{{1,2}})\s*{YEARS}"
        ))?;
        let experience_min = ci(&format!(
            r"(?:(?:от|более|больше|свыше|не\s*менее|минимум|at\s*least|from)\s*(?P<min>\d{{1,2}})(?:\s*-?\s*(?:х|ти|ух|ех))?\s*\+?\s*(?:и\s*более\s*)?{YEARS}|(?P<plus>\d{{1,2}})\s*\+\s*{YEARS})"
        ))?;

        let experience_anchor = ci(r"опыт\w*|experience|стаж(?:а|ем)?\b")?;

        let work_modes = RuleSet::from_pairs([
            (r"можно\s*удал[её]нн?о|возможн\w*\s*удал[её]нн\w*", WorkMode::Hybrid),
            (
                r"удал[её]нн?о|удал[её]нн(?:ая|ый|ой)\s*(?:работ|формат)|удал[её]нк|дистанционн|remote",
                WorkMode::Remote,
            ),
            (r"гибрид|hybrid", WorkMode::Hybrid),
            (
                r"офис|office|на\s*месте|on-?site|очн(?:ый|о|ая)\b",
                WorkMode::Office,
            ),
        ])?;

        let currencies = RuleSet::from_pairs([
            (r"₽|руб|\brub\b", Currency::Rub),
            (r"€|eur", Currency::Eur),
            (r"\$|usd", Currency::Usd),
        ])?;

        Ok(Self {
            roles,
            level_hints,
            level_words,
            experience_range,
            experience_min,
            experience_anchor,
            work_modes,
            currencies,
            gross_marker: ci(r"до\s*вычета|\bgross\b|до\s*налогов|before\s*tax")?,
            net_marker: ci(r"на\s*руки|\bnet\b|после\s*вычета|after\s*tax")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lexicon_builds() {
        let lex = Lexicon::builtin();
        assert_eq!(lex.roles.len(), 6);
        assert_eq!(lex.level_words.len(), 5);
        assert_eq!(lex.work_modes.len(), 4);
    }

    #[test]
    fn experience_patterns_capture_years() {
        let lex = Lexicon::builtin();

        let caps = lex.experience_range.captures("Опыт работы: 1–3 года").unwrap();
        assert_eq!((&caps["min"], &caps["max"]), ("1", "3"));

        let caps = lex.experience_min.captures("от 2-х лет").unwrap();
        assert_eq!(&caps["min"], "2");

        let caps = lex.experience_min.captures("от 2 и более лет").unwrap();
        assert_eq!(&caps["min"], "2");

        let caps = lex.experience_min.captures("3+ года").unwrap();
        assert_eq!(&caps["plus"], "3");

        assert!(lex.experience_anchor.is_match("Опыт работы"));
        assert!(lex.experience_anchor.is_match("years of experience"));
        assert!(!lex.experience_anchor.is_match("стажёр"));
    }
}
