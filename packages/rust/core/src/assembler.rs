//! Vacancy record assembler.
//!
//! Takes the partial record an adapter scraped from a page and produces the
//! canonical, fully classified [`VacancyRecord`]. Assembly is pure: the clock
//! is passed in and nothing touches the filesystem.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local};
use tracing::{debug, info, instrument};
use url::Url;

use jobnote_classify::{Classifier, SalaryPolicy};
use jobnote_shared::{
    AppConfig, JobNoteError, Level, PartialRecord, Result, VacancyRecord, WorkMode,
};
use jobnote_techstack::{DEFAULT_MAX_STACK_ITEMS, TechStack, pick_stack};
use jobnote_text::{
    build_location_display, clean_text, dedupe_array, parse_publish_date, strip_tracking_params,
};

use crate::filename::generate_filename;

/// Turns partial records into canonical ones.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    classifier: Classifier,
    tech_stack: TechStack,
    max_stack_items: usize,
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new(
            Classifier::default(),
            TechStack::builtin().clone(),
            DEFAULT_MAX_STACK_ITEMS,
        )
    }
}

impl RecordAssembler {
    pub fn new(classifier: Classifier, tech_stack: TechStack, max_stack_items: usize) -> Self {
        Self {
            classifier,
            tech_stack,
            max_stack_items,
        }
    }

    /// Assembler configured from `[defaults]`, `[salary]` and `[paths].tech_stack`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let classifier =
            Classifier::default().with_salary_policy(SalaryPolicy::from(&config.salary));

        let tech_stack = match &config.paths.tech_stack {
            Some(path) => {
                debug!(path = %path, "loading custom alias table");
                TechStack::load(Path::new(path))?
            }
            None => TechStack::builtin().clone(),
        };

        Ok(Self::new(
            classifier,
            tech_stack,
            config.defaults.max_stack_items,
        ))
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn tech_stack(&self) -> &TechStack {
        &self.tech_stack
    }

    /// Build the canonical record.
    ///
    /// `page_url` is used for the job link when the page has no canonical
    /// link. Fails only when there is no partial record at all.
    #[instrument(skip_all, fields(page_url = %page_url))]
    pub fn assemble(
        &self,
        partial: Option<&PartialRecord>,
        page_url: &str,
        now: DateTime<Local>,
    ) -> Result<VacancyRecord> {
        let partial = partial
            .ok_or_else(|| JobNoteError::classification("no vacancy data extracted from page"))?;

        let role = partial.role.trim().to_string();
        let role_norm = self.classifier.normalize_role(&role);

        let raw_text = partial.job_description_raw.trim().to_string();
        let combined = [raw_text.as_str(), partial.experience.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n");

        let level = self.resolve_level(partial, &role, &combined);
        let work_mode = self.resolve_work_mode(&partial.work_mode, &raw_text);
        debug!(?level, ?work_mode, "classified");

        let salary = clean_text(&partial.salary);
        let estimate = self.classifier.parse_salary(&salary);

        let detected = self.tech_stack.extract_skills(&raw_text);
        let stack = pick_stack(&detected, self.max_stack_items);

        let dom_skills: Vec<String> = partial
            .skills
            .iter()
            .map(|s| clean_text(s))
            .filter(|s| !s.is_empty())
            .collect();
        let skills = if dom_skills.is_empty() {
            stack.clone()
        } else {
            dedupe_array(&dom_skills)
        };

        let tags: Vec<String> = partial
            .tags
            .iter()
            .map(|s| clean_text(s))
            .filter(|s| !s.is_empty())
            .collect();

        let location_city = clean_text(&partial.location_city);
        let location_metro = clean_text(&partial.location_metro);
        let location_display = build_location_display(&location_city, &location_metro);

        let mut record = VacancyRecord {
            company: clean_text(&partial.company),
            role,
            role_norm,
            level,
            source: partial.source,
            job_link: job_link(&partial.canonical_link, page_url),
            work_mode,
            location_city,
            location_address: clean_text(&partial.location_address),
            location_metro,
            location_display,
            commute_minutes: String::new(),
            salary,
            salary_min_net: estimate.salary_min_net,
            salary_currency: estimate.salary_currency,
            stack,
            skills,
            apply_date: now.format("%Y-%m-%d").to_string(),
            publish_date: parse_publish_date(&partial.publish_date, now.year()),
            parsed_at: now.to_rfc3339(),
            tags: dedupe_array(&tags),
            job_description_raw: raw_text,
            cover_letter_draft: String::new(),
            filename: String::new(),
        };
        record.filename = generate_filename(&record);

        info!(
            source = %record.source,
            role_norm = %record.role_norm,
            filename = %record.filename,
            "assembled vacancy record"
        );
        Ok(record)
    }

    /// Explicit adapter level first (a level name or a hint label), then inference.
    fn resolve_level(&self, partial: &PartialRecord, role: &str, combined: &str) -> Option<Level> {
        let explicit = partial.level.trim();
        if !explicit.is_empty() {
            if let Some(level) = Level::from_str(explicit)
                .ok()
                .or_else(|| self.classifier.level_from_hint(explicit))
            {
                return Some(level);
            }
        }
        self.classifier
            .infer_level(role, combined, &partial.level_link)
    }

    /// Adapter hint (a mode name or page wording) first, then the raw text.
    fn resolve_work_mode(&self, hint: &str, raw_text: &str) -> Option<WorkMode> {
        let hint = hint.trim();
        if !hint.is_empty() {
            if let Some(mode) = WorkMode::from_str(hint)
                .ok()
                .or_else(|| self.classifier.infer_work_mode(hint))
            {
                return Some(mode);
            }
        }
        self.classifier.infer_work_mode(raw_text)
    }
}

/// Canonical link (resolved against the page URL) or the page URL, without tracking params.
fn job_link(canonical: &str, page_url: &str) -> String {
    let canonical = canonical.trim();
    if canonical.is_empty() {
        return strip_tracking_params(page_url.trim());
    }

    let resolved = match Url::parse(page_url.trim()) {
        Ok(base) => base
            .join(canonical)
            .map(String::from)
            .unwrap_or_else(|_| canonical.to_string()),
        Err(_) => canonical.to_string(),
    };
    strip_tracking_params(&resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use jobnote_shared::Source;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 12, 30, 0).unwrap()
    }

    fn analyst() -> PartialRecord {
        PartialRecord {
            role: "  Аналитик данных  ".into(),
            company: "ООО Ромашка".into(),
            salary: "от 100\u{00A0}000 ₽ до вычета налогов".into(),
            location_city: "Москва".into(),
            location_metro: " Тверская ".into(),
            work_mode: "Формат работы: гибрид".into(),
            experience: "1–3 года".into(),
            skills: vec!["SQL".into(), " sql ".into(), "Python".into(), "".into()],
            publish_date: "23 декабря 2025".into(),
            job_description_raw: "Отчёты в Power-BI, запросы к PostgreSQL, скрипты на Python.".into(),
            canonical_link: "https://hh.ru/vacancy/1?utm_source=x&foo=bar#top".into(),
            source: Source::Hh,
            ..PartialRecord::default()
        }
    }

    #[test]
    fn missing_partial_is_classification_error() {
        let err = RecordAssembler::default()
            .assemble(None, "https://hh.ru/vacancy/1", now())
            .unwrap_err();
        assert!(matches!(err, JobNoteError::Classification { .. }));
    }

    #[test]
    fn assembles_full_record() {
        let record = RecordAssembler::default()
            .assemble(Some(&analyst()), "https://hh.ru/vacancy/1?from=list", now())
            .unwrap();

        assert_eq!(record.role, "Аналитик данных");
        assert_eq!(record.role_norm, "Data Analyst");
        assert_eq!(record.level, Some(Level::JuniorPlus));
        assert_eq!(record.work_mode, Some(WorkMode::Hybrid));
        assert_eq!(record.salary, "от 100 000 ₽ до вычета налогов");
        assert_eq!(record.salary_min_net, "85000");
        assert_eq!(record.salary_currency, "RUB");
        assert_eq!(record.stack, vec!["python", "sql", "postgresql", "power bi"]);
        assert_eq!(record.skills, vec!["SQL", "Python"]);
        assert_eq!(record.job_link, "https://hh.ru/vacancy/1?foo=bar");
        assert_eq!(record.location_metro, "Тверская");
        assert_eq!(record.location_display, "Москва — Тверская");
        assert_eq!(record.apply_date, "2026-03-14");
        assert_eq!(record.publish_date, "2025-12-23");
        assert!(record.parsed_at.starts_with("2026-03-14T12:30:00"));
        assert_eq!(record.filename, "Ромашка DA -J+.md");
        assert_eq!(record.source, Source::Hh);
        assert!(record.commute_minutes.is_empty());
        assert!(record.cover_letter_draft.is_empty());
    }

    #[test]
    fn skills_fall_back_to_stack() {
        let partial = PartialRecord {
            skills: Vec::new(),
            ..analyst()
        };
        let record = RecordAssembler::default()
            .assemble(Some(&partial), "https://hh.ru/vacancy/1", now())
            .unwrap();
        assert_eq!(record.skills, record.stack);
        assert!(!record.skills.is_empty());
    }

    #[test]
    fn explicit_level_wins_over_inference() {
        let partial = PartialRecord {
            level: "senior".into(),
            ..analyst()
        };
        let assembler = RecordAssembler::default();
        let record = assembler
            .assemble(Some(&partial), "https://hh.ru/vacancy/1", now())
            .unwrap();
        assert_eq!(record.level, Some(Level::Senior));
        assert_eq!(record.filename, "Ромашка DA -S.md");

        let partial = PartialRecord {
            level: "Стажёр".into(),
            ..analyst()
        };
        let record = assembler
            .assemble(Some(&partial), "https://hh.ru/vacancy/1", now())
            .unwrap();
        assert_eq!(record.level, Some(Level::Intern));
    }

    #[test]
    fn level_link_used_as_hint() {
        let partial = PartialRecord {
            experience: String::new(),
            level_link: "Старший (Senior)".into(),
            ..analyst()
        };
        let record = RecordAssembler::default()
            .assemble(Some(&partial), "https://career.habr.com/vacancies/1", now())
            .unwrap();
        assert_eq!(record.level, Some(Level::Senior));
    }

    #[test]
    fn work_mode_from_text_without_hint() {
        let partial = PartialRecord {
            work_mode: String::new(),
            job_description_raw: "Полностью удалённая работа, SQL".into(),
            ..analyst()
        };
        let record = RecordAssembler::default()
            .assemble(Some(&partial), "https://hh.ru/vacancy/1", now())
            .unwrap();
        assert_eq!(record.work_mode, Some(WorkMode::Remote));
    }

    #[test]
    fn empty_partial_degrades_to_empty_fields() {
        let partial = PartialRecord::default();
        let record = RecordAssembler::default()
            .assemble(Some(&partial), "https://example.com/job?utm_medium=x", now())
            .unwrap();

        assert_eq!(record.role, "");
        assert_eq!(record.level, None);
        assert_eq!(record.work_mode, None);
        assert_eq!(record.salary_min_net, "");
        assert_eq!(record.salary_currency, "RUB");
        assert!(record.stack.is_empty());
        assert!(record.skills.is_empty());
        assert_eq!(record.publish_date, "");
        assert_eq!(record.job_link, "https://example.com/job");
        assert_eq!(record.source, Source::Other);
        assert_eq!(record.filename, "Unknown __.md");
    }

    #[test]
    fn relative_canonical_is_resolved() {
        assert_eq!(
            job_link("/vacancy/7?utm_campaign=x", "https://hh.ru/search?text=sql"),
            "https://hh.ru/vacancy/7"
        );
        assert_eq!(job_link("", "https://hh.ru/vacancy/7#x"), "https://hh.ru/vacancy/7");
    }

    #[test]
    fn stack_respects_max_items() {
        let assembler = RecordAssembler::new(Classifier::default(), TechStack::builtin().clone(), 2);
        let record = assembler
            .assemble(Some(&analyst()), "https://hh.ru/vacancy/1", now())
            .unwrap();
        assert_eq!(record.stack, vec!["python", "sql"]);
    }
}
