//! Seniority inference.

use regex::{Captures, Match};
use tracing::trace;

use jobnote_shared::Level;

use crate::lexicon::Lexicon;

/// Level from a structured label such as "Junior (до 1 года)" or "Старший".
pub(crate) fn level_from_hint(hint: &str, lexicon: &Lexicon) -> Option<Level> {
    let hint = hint.trim();
    if hint.is_empty() {
        return None;
    }
    lexicon.level_hints.first_match(hint).copied()
}

pub(crate) fn infer_level(
    role: &str,
    text: &str,
    level_hint: &str,
    lexicon: &Lexicon,
) -> Option<Level> {
    if let Some(level) = level_from_hint(level_hint, lexicon) {
        trace!(%level, "level from hint");
        return Some(level);
    }

    let combined = format!("{role}\n{text}");

    if let Some(level) = lexicon.level_words.first_match(&combined).copied() {
        trace!(%level, "level from explicit word");
        return Some(level);
    }

    let level = level_from_experience(&combined, lexicon);
    if let Some(level) = level {
        trace!(%level, "level from experience");
    }
    level
}

fn years(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name)?.as_str().parse().ok()
}

fn level_from_experience(text: &str, lexicon: &Lexicon) -> Option<Level> {
    if let Some(caps) = lexicon.experience_range.captures(text) {
        if let (Some(min), Some(max)) = (years(&caps, "min"), years(&caps, "max")) {
            return Some(match (min, max) {
                (1.., ..=3) => Level::JuniorPlus,
                (3.., ..=5) => Level::Middle,
                _ => level_from_lower_bound(min),
            });
        }
    }

    lexicon
        .experience_min
        .captures_iter(text)
        .filter(|caps| caps.get(0).is_some_and(|m| near_anchor(text, m, lexicon)))
        .find_map(|caps| years(&caps, "min").or_else(|| years(&caps, "plus")))
        .map(level_from_lower_bound)
}

/// Chars around a lower bound searched for an experience word.
const ANCHOR_BEFORE: usize = 40;
const ANCHOR_AFTER: usize = 25;

const SENTENCE_END: [char; 4] = ['.', ';', '!', '\n'];

/// "на рынке более 20 лет" is company age, "опыт от 2 лет" is experience.
/// The experience word has to be in the same sentence as the number.
fn near_anchor(text: &str, m: Match<'_>, lexicon: &Lexicon) -> bool {
    let before = &text[..m.start()];
    let before = before
        .rfind(SENTENCE_END)
        .map_or(before, |i| &before[i + 1..]);
    let from = before
        .char_indices()
        .rev()
        .nth(ANCHOR_BEFORE - 1)
        .map_or(0, |(i, _)| i);

    let after = &text[m.end()..];
    let after = after.find(SENTENCE_END).map_or(after, |i| &after[..i]);
    let to = after
        .char_indices()
        .nth(ANCHOR_AFTER)
        .map_or(after.len(), |(i, _)| i);

    lexicon.experience_anchor.is_match(&before[from..])
        || lexicon.experience_anchor.is_match(&after[..to])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infer(role: &str, text: &str, hint: &str) -> Option<Level> {
        infer_level(role, text, hint, Lexicon::builtin())
    }

    #[test]
    fn hint_wins_over_text() {
        assert_eq!(infer("Senior Data Analyst", "", "Младший специалист"), Some(Level::Junior));
        assert_eq!(infer("", "", "Middle"), Some(Level::Middle));
        assert_eq!(infer("", "", "Стажёр"), Some(Level::Intern));
        assert_eq!(infer("", "", "   "), None);
    }

    #[test]
    fn explicit_words_in_order() {
        assert_eq!(infer("Стажёр-аналитик", "", ""), Some(Level::Intern));
        assert_eq!(infer("Junior Data Analyst", "", ""), Some(Level::Junior));
        assert_eq!(infer("Junior+ Data Analyst", "", ""), Some(Level::JuniorPlus));
        assert_eq!(infer("Ведущий аналитик", "", ""), Some(Level::Senior));
        assert_eq!(infer("Data Analyst", "Ищем middle специалиста", ""), Some(Level::Middle));
    }

    #[test]
    fn experience_range_maps_to_level() {
        assert_eq!(
            infer("Data Analyst", "опыт работы от 3 до 5 лет", ""),
            Some(Level::Middle)
        );
        assert_eq!(infer("Analyst", "Опыт работы: 1–3 года", ""), Some(Level::JuniorPlus));
        assert_eq!(infer("Analyst", "опыт 0-1 год", ""), Some(Level::Junior));
        assert_eq!(infer("Analyst", "опыт 5-7 лет", ""), Some(Level::Senior));
    }

    #[test]
    fn experience_lower_bound_maps_to_level() {
        assert_eq!(infer("Analyst", "опыт от 2-х лет", ""), Some(Level::JuniorPlus));
        assert_eq!(infer("Analyst", "опыт более 4 лет", ""), Some(Level::MiddlePlus));
        assert_eq!(infer("Analyst", "at least 6 years of experience", ""), Some(Level::Senior));
        assert_eq!(infer("Analyst", "опыт: 3+ года в SQL", ""), Some(Level::Middle));
    }

    #[test]
    fn lower_bound_needs_experience_context() {
        assert_eq!(infer("Analyst", "Компания на рынке более 20 лет", ""), None);
        assert_eq!(
            infer("Analyst", "Мы на рынке более 20 лет. Нужен опыт от 2-х лет", ""),
            Some(Level::JuniorPlus)
        );
    }

    #[test]
    fn junior_plus_elsewhere_keeps_junior() {
        assert_eq!(
            infer("Junior Data Analyst", "Через год рост до junior+", ""),
            Some(Level::Junior)
        );
    }

    #[test]
    fn nothing_to_go_on() {
        assert_eq!(infer("Data Analyst", "Пишем SQL и строим дашборды", ""), None);
    }
}
