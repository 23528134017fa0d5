//! Note filenames: `"{company} {role abbrev} -{level abbrev}.md"`.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use jobnote_shared::VacancyRecord;
use jobnote_text::{DEFAULT_MAX_LEN, sanitize_filename_component};

const UNKNOWN: &str = "Unknown";

/// Role category substrings (lowercase) and their abbreviations, checked in order.
const ROLE_ABBREV: &[(&str, &str)] = &[
    ("data analyst", "DA"),
    ("product analyst", "PA"),
    ("bi analyst", "BI"),
    ("data scientist", "DS"),
    ("ml engineer", "MLE"),
    ("data engineer", "DE"),
];

fn ci(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("valid regex")
}

static EMPLOYER_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| ci(r"^(?:Прямой\s+работодатель|Direct\s+employer)\s+"));

static URL_IN_PARENS_RE: LazyLock<Regex> =
    LazyLock::new(|| ci(r"\s*\([^)]*(?:www\.|https?://)[^)]*\)"));

static LEGAL_FORM_RE: LazyLock<Regex> = LazyLock::new(|| {
    ci(r"[,\s]+(?:(?:ООО|ОАО|ЗАО|ПАО|АО|ИП|Ltd|LLC|Inc|GmbH|Corp|Co|LTD)\b\.?|S\.A\.)")
});

static LEADING_LEGAL_FORM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:ООО|ОАО|ЗАО|ПАО|АО|ИП)\s+").expect("valid regex"));

fn is_wrapping(c: char) -> bool {
    matches!(c, '"' | '\'' | '«' | '»') || c.is_whitespace()
}

/// Company name without employer badges, legal forms, URLs and quotes.
pub fn clean_company_name(name: &str) -> String {
    let s = name.trim();
    let s = EMPLOYER_PREFIX_RE.replace(s, "");
    let s = URL_IN_PARENS_RE.replace_all(&s, "");
    let s = LEGAL_FORM_RE.replace_all(&s, "");
    let s = LEADING_LEGAL_FORM_RE.replace(s.trim_matches(is_wrapping), "");

    let cleaned = s
        .trim_matches(is_wrapping)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.is_empty() {
        UNKNOWN.to_string()
    } else {
        cleaned
    }
}

/// Short role tag: table lookup on the normalized role, else initials.
pub fn role_abbrev(role: &str, role_norm: &str) -> String {
    let source = if role_norm.trim().is_empty() { role } else { role_norm };
    let lower = source.to_lowercase();

    if let Some((_, abbrev)) = ROLE_ABBREV.iter().find(|(full, _)| lower.contains(full)) {
        return (*abbrev).to_string();
    }

    let words: Vec<&str> = source.split_whitespace().collect();
    match words.as_slice() {
        [] => "__".to_string(),
        [word] => word.chars().take(2).collect::<String>().to_uppercase(),
        [first, second, ..] => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}

/// Filename for a record's note, `.md` included.
pub fn generate_filename(record: &VacancyRecord) -> String {
    let company =
        sanitize_filename_component(&clean_company_name(&record.company), DEFAULT_MAX_LEN);
    let mut parts = vec![company, role_abbrev(&record.role, &record.role_norm)];

    if let Some(abbrev) = record.level.and_then(|level| level.abbrev()) {
        parts.push(format!("-{abbrev}"));
    }

    format!(
        "{}.md",
        sanitize_filename_component(&parts.join(" "), DEFAULT_MAX_LEN)
    )
}
