//! Plain-text cleanup helpers shared by adapters, classifier and renderer.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Normalize scraped text: NBSP to space, runs of spaces/tabs to one space,
/// 3+ newlines to exactly two, then trim.
///
/// Idempotent: `clean_text(&clean_text(s)) == clean_text(s)`.
pub fn clean_text(s: &str) -> String {
    static HSPACE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid regex"));
    static MULTI_NL_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

    let s = s.replace('\u{00A0}', " ");
    let s = HSPACE_RE.replace_all(&s, " ");
    let s = MULTI_NL_RE.replace_all(&s, "\n\n");
    s.trim().to_string()
}

/// Deduplicate by case-insensitive, trimmed key, keeping the first occurrence.
///
/// Entries whose key is empty are dropped. Kept entries are trimmed.
pub fn dedupe_array<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for item in items {
        let trimmed = item.as_ref().trim();
        let key = trimmed.to_lowercase();
        if key.is_empty() || !seen.insert(key) {
            continue;
        }
        out.push(trimmed.to_string());
    }

    out
}

/// Everything in `text` before the first `marker` (the whole text if absent).
pub fn cut_before<'a>(text: &'a str, marker: &str) -> &'a str {
    match text.find(marker) {
        Some(i) => &text[..i],
        None => text,
    }
}

/// Double-quoted YAML scalar: backslash, quote and line breaks escaped.
pub fn to_yaml_string(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\r', "\\r")
        .replace('\n', "\\n");
    format!("\"{escaped}\"")
}

/// Render items as a YAML/JSON-style inline list: `["a", "b \"c\""]`.
pub fn to_yaml_inline_array<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|x| to_yaml_string(x.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// Human-readable location line: `"City — Metro"`, or whichever part exists.
pub fn build_location_display(city: &str, metro: &str) -> String {
    let city = clean_text(city);
    let metro = clean_text(metro);
    match (city.is_empty(), metro.is_empty()) {
        (false, false) => format!("{city} — {metro}"),
        (false, true) => city,
        (true, _) => metro,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_spaces_and_nbsp() {
        let input = "  Data\u{00A0}\u{00A0}Analyst \t in\tMoscow  ";
        assert_eq!(clean_text(input), "Data Analyst in Moscow");
    }

    #[test]
    fn clean_text_collapses_newlines_to_two() {
        let input = "Line 1\n\n\n\n\nLine 2\n\nLine 3";
        assert_eq!(clean_text(input), "Line 1\n\nLine 2\n\nLine 3");
    }

    #[test]
    fn clean_text_is_idempotent() {
        let samples = [
            "",
            "   ",
            "a\u{00A0}\n\n\n\n b \t c",
            "\n\n\nПривет,\u{00A0}мир\n \n \n\nend\t",
            "x \n\n\n\t\u{00A0}\n\n\n y",
        ];
        for s in samples {
            let once = clean_text(s);
            assert_eq!(clean_text(&once), once, "not idempotent for {s:?}");
            assert!(!once.contains('\u{00A0}'));
            assert!(!once.contains("\n\n\n"));
        }
    }

    #[test]
    fn dedupe_keeps_first_casing() {
        let items = ["SQL", " sql ", "Python", "", "  ", "PYTHON", "Power BI"];
        let out = dedupe_array(&items);
        assert_eq!(out, vec!["SQL", "Python", "Power BI"]);
        assert!(out.len() <= items.len());
    }

    #[test]
    fn dedupe_output_keys_are_unique() {
        let items = ["a", "A", " a", "b", "B ", "c"];
        let out = dedupe_array(&items);
        let keys: HashSet<String> = out.iter().map(|s| s.trim().to_lowercase()).collect();
        assert_eq!(keys.len(), out.len());
    }

    #[test]
    fn cut_before_marker() {
        assert_eq!(cut_before("Описание\nПохожие вакансии\n...", "Похожие вакансии"), "Описание\n");
        assert_eq!(cut_before("no marker", "Похожие вакансии"), "no marker");
    }

    #[test]
    fn yaml_inline_array_escapes_quotes() {
        let items = ["python", r#"say "hi""#, r"back\slash"];
        assert_eq!(
            to_yaml_inline_array(&items),
            r#"["python", "say \"hi\"", "back\\slash"]"#
        );
        assert_eq!(to_yaml_inline_array::<&str>(&[]), "[]");
    }

    #[test]
    fn yaml_string_escapes() {
        assert_eq!(to_yaml_string(r#"АО "Банк""#), r#""АО \"Банк\"""#);
        assert_eq!(to_yaml_string(r"C:\temp"), r#""C:\\temp""#);
        assert_eq!(to_yaml_string("a\nb"), r#""a\nb""#);
        assert_eq!(to_yaml_string(""), r#""""#);
    }

    #[test]
    fn location_display_variants() {
        assert_eq!(build_location_display("Москва", "Арбатская"), "Москва — Арбатская");
        assert_eq!(build_location_display(" Москва ", ""), "Москва");
        assert_eq!(build_location_display("", "Арбатская"), "Арбатская");
        assert_eq!(build_location_display("", ""), "");
    }
}
