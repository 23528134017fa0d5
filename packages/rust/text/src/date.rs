//! Publication date parsing (`YYYY-MM-DD` output, `""` when unknown).

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::clean::clean_text;

/// Genitive month names as they appear in "23 декабря 2025".
const RUSSIAN_MONTHS: &[(&str, u32)] = &[
    ("января", 1),
    ("февраля", 2),
    ("марта", 3),
    ("апреля", 4),
    ("мая", 5),
    ("июня", 6),
    ("июля", 7),
    ("августа", 8),
    ("сентября", 9),
    ("октября", 10),
    ("ноября", 11),
    ("декабря", 12),
];

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse "23 декабря 2025" or "23 декабря" (year defaults to `default_year`).
///
/// Scans left to right and takes the first "day month" pair that names a
/// real month and a valid calendar day.
pub fn parse_russian_date(text: &str, default_year: i32) -> String {
    static RU_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(\d{1,2})\s*([а-яё]+)(?:\s+(\d{4}))?").expect("valid regex")
    });

    let s = clean_text(text).to_lowercase();

    for caps in RU_DATE_RE.captures_iter(&s) {
        let Some(month) = RUSSIAN_MONTHS
            .iter()
            .find(|(name, _)| *name == &caps[2])
            .map(|(_, m)| *m)
        else {
            continue;
        };
        let Ok(day) = caps[1].parse::<u32>() else {
            continue;
        };
        let year = caps
            .get(3)
            .and_then(|y| y.as_str().parse::<i32>().ok())
            .unwrap_or(default_year);

        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return format_date(date);
        }
    }

    String::new()
}

/// Parse an ISO datetime ("2025-12-20T09:27:04+03:00") or date ("2025-12-20").
///
/// Datetimes keep the calendar date of their own offset.
pub fn parse_iso_date(text: &str) -> String {
    let s = text.trim();
    if s.is_empty() {
        return String::new();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return format_date(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return format_date(dt.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return format_date(date);
    }

    String::new()
}

/// Try ISO first, then the Russian long form.
pub fn parse_publish_date(text: &str, default_year: i32) -> String {
    let iso = parse_iso_date(text);
    if !iso.is_empty() {
        return iso;
    }
    parse_russian_date(text, default_year)
}
