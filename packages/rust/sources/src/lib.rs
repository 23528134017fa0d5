//! Job board adapters: one per supported site, plus a generic fallback.
//!
//! An adapter turns a parsed vacancy page into a [`PartialRecord`]. Nothing
//! here normalizes or classifies; that is the assembler's job.

mod geekjob;
mod generic;
mod habr;
mod hh;
mod superjob;

use std::collections::HashMap;

use jobnote_shared::{PartialRecord, Source};
use jobnote_text::{page_text, pick_attr};
use scraper::Html;
use tracing::debug;
use url::Url;

pub use geekjob::GeekjobAdapter;
pub use generic::GenericAdapter;
pub use habr::HabrAdapter;
pub use hh::HhAdapter;
pub use superjob::SuperjobAdapter;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Site-specific extraction of a vacancy page.
pub trait SourceAdapter: Send + Sync {
    /// Board this adapter handles.
    fn source(&self) -> Source;

    /// Human-readable adapter name for tracing.
    fn name(&self) -> &str;

    /// Fill a partial record from the document. Missing fields stay empty.
    fn parse(&self, doc: &Html) -> PartialRecord;
}

/// `href` of `<link rel="canonical">`, or `""`.
pub fn canonical_link(doc: &Html) -> String {
    pick_attr(doc, &["link[rel='canonical']"], "href")
}

/// Board a page URL belongs to; unparseable URLs are [`Source::Other`].
pub fn detect_source(page_url: &str) -> Source {
    Url::parse(page_url)
        .ok()
        .and_then(|u| u.host_str().map(Source::from_host))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Explicit `Source → adapter` map with a generic fallback.
pub struct AdapterRegistry {
    adapters: HashMap<Source, Box<dyn SourceAdapter>>,
    fallback: GenericAdapter,
}

impl AdapterRegistry {
    /// Registry with every built-in site adapter.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(HhAdapter));
        registry.register(Box::new(HabrAdapter));
        registry.register(Box::new(GeekjobAdapter));
        registry.register(Box::new(SuperjobAdapter));
        registry
    }

    /// Registry where every source falls back to [`GenericAdapter`].
    pub fn empty() -> Self {
        Self {
            adapters: HashMap::new(),
            fallback: GenericAdapter,
        }
    }

    /// Register an adapter for its source, returning the one it replaces.
    pub fn register(&mut self, adapter: Box<dyn SourceAdapter>) -> Option<Box<dyn SourceAdapter>> {
        self.adapters.insert(adapter.source(), adapter)
    }

    /// Adapter for `source`. Always returns one (`GenericAdapter` is the fallback).
    pub fn adapter_for(&self, source: Source) -> &dyn SourceAdapter {
        match self.adapters.get(&source) {
            Some(adapter) => adapter.as_ref(),
            None => &self.fallback,
        }
    }

    /// Run the adapter for `source` and stamp the result with that source.
    ///
    /// A page whose description block was not found keeps the whole page
    /// text as its description.
    pub fn parse(&self, source: Source, doc: &Html) -> PartialRecord {
        let adapter = self.adapter_for(source);
        debug!(adapter = adapter.name(), %source, "parsing vacancy page");

        let mut partial = adapter.parse(doc);
        partial.source = source;
        if partial.job_description_raw.trim().is_empty() {
            debug!(adapter = adapter.name(), "no description block, using page text");
            partial.job_description_raw = page_text(doc);
        }
        partial
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_fixture(name: &str) -> Html {
        let path = format!("../../../fixtures/html/{name}");
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("missing fixture: {path}"));
        Html::parse_document(&content)
    }

    struct StubAdapter;

    impl SourceAdapter for StubAdapter {
        fn source(&self) -> Source {
            Source::Hh
        }

        fn name(&self) -> &str {
            "stub"
        }

        fn parse(&self, _doc: &Html) -> PartialRecord {
            PartialRecord {
                role: "stub role".into(),
                ..PartialRecord::default()
            }
        }
    }

    #[test]
    fn detect_source_from_url() {
        assert_eq!(detect_source("https://hh.ru/vacancy/1"), Source::Hh);
        assert_eq!(detect_source("https://www.superjob.ru/vakansii/x.html"), Source::Superjob);
        assert_eq!(detect_source("https://career.habr.com/vacancies/1"), Source::Habr);
        assert_eq!(detect_source("https://geekjob.ru/vacancy/1"), Source::Geekjob);
        assert_eq!(detect_source("https://example.com/jobs/1"), Source::Other);
        assert_eq!(detect_source("not a url"), Source::Other);
    }

    #[test]
    fn registry_has_all_site_adapters() {
        let registry = AdapterRegistry::new();
        assert_eq!(registry.adapter_for(Source::Hh).name(), "hh");
        assert_eq!(registry.adapter_for(Source::Habr).name(), "habr");
        assert_eq!(registry.adapter_for(Source::Geekjob).name(), "geekjob");
        assert_eq!(registry.adapter_for(Source::Superjob).name(), "superjob");
        assert_eq!(registry.adapter_for(Source::Other).name(), "generic");
    }

    #[test]
    fn unregistered_source_falls_back_to_generic() {
        let registry = AdapterRegistry::empty();
        assert_eq!(registry.adapter_for(Source::Hh).name(), "generic");

        let doc = Html::parse_document("<html><body><h1>Аналитик</h1></body></html>");
        let partial = registry.parse(Source::Hh, &doc);
        assert_eq!(partial.role, "Аналитик");
        assert_eq!(partial.source, Source::Hh);
    }

    #[test]
    fn register_replaces_existing_adapter() {
        let mut registry = AdapterRegistry::new();
        let previous = registry.register(Box::new(StubAdapter));
        assert_eq!(previous.map(|a| a.name().to_string()).as_deref(), Some("hh"));

        let doc = Html::parse_document("<h1>ignored</h1>");
        assert_eq!(registry.parse(Source::Hh, &doc).role, "stub role");
    }

    #[test]
    fn missing_description_block_uses_page_text() {
        let doc = Html::parse_document(
            r#"<html><body>
                <h1 data-qa="vacancy-title">Аналитик данных</h1>
                <div class="desc">Требования: Python, SQL, опыт от 3 до 5 лет.</div>
            </body></html>"#,
        );
        let p = AdapterRegistry::new().parse(Source::Hh, &doc);

        assert_eq!(p.role, "Аналитик данных");
        assert!(p.job_description_raw.contains("Требования: Python, SQL"));
    }

    #[test]
    fn found_description_block_is_kept() {
        let doc = Html::parse_document(
            "<html><body><nav>Меню</nav><article>Пишем SQL</article></body></html>",
        );
        let p = AdapterRegistry::new().parse(Source::Habr, &doc);
        assert_eq!(p.job_description_raw, "Пишем SQL");
    }

    #[test]
    fn canonical_link_from_head() {
        let doc = Html::parse_document(
            r#"<html><head><link rel="canonical" href="https://hh.ru/vacancy/42"></head></html>"#,
        );
        assert_eq!(canonical_link(&doc), "https://hh.ru/vacancy/42");
        assert_eq!(canonical_link(&Html::parse_document("<p>x</p>")), "");
    }

    // -----------------------------------------------------------------------
    // Fixture tests
    // -----------------------------------------------------------------------

    #[test]
    fn hh_fixture() {
        let doc = load_fixture("hh_vacancy.html");
        let p = AdapterRegistry::new().parse(Source::Hh, &doc);

        assert_eq!(p.role, "Аналитик данных (Junior)");
        assert_eq!(p.company, "ООО Ромашка");
        assert_eq!(p.salary, "от 100 000 ₽ до вычета налогов");
        assert_eq!(p.experience, "1–3 года");
        assert_eq!(p.work_mode, "Формат работы: гибрид");
        assert_eq!(p.location_city, "Москва");
        assert_eq!(p.location_metro, "Тверская");
        assert_eq!(p.location_address, "Москва, Тверская, улица Тверская, 7");
        assert_eq!(p.skills, vec!["SQL", "Python", "sql", "Power BI"]);
        assert_eq!(p.publish_date, "Вакансия опубликована 23 декабря 2025 в Москве");
        assert!(p.job_description_raw.starts_with("Задачи:"));
        assert!(p.job_description_raw.contains("Писать запросы к PostgreSQL и ClickHouse"));
        assert!(!p.job_description_raw.contains("__STATE__"));
        assert_eq!(
            p.canonical_link,
            "https://hh.ru/vacancy/123456?from=share_ios&utm_source=telegram"
        );
        assert_eq!(p.source, Source::Hh);
    }

    #[test]
    fn habr_fixture() {
        let doc = load_fixture("habr_vacancy.html");
        let p = AdapterRegistry::new().parse(Source::Habr, &doc);

        assert_eq!(p.role, "Data Engineer");
        assert_eq!(p.company, "ТехноЛаб");
        assert_eq!(p.salary, "от 250 000 до 350 000 ₽");
        assert_eq!(p.location_city, "Санкт-Петербург");
        assert_eq!(p.work_mode, "hybrid");
        assert_eq!(p.skills, vec!["Airflow", "Spark"]);
        assert_eq!(p.level_link, "Старший (Senior)");
        assert_eq!(p.publish_date, "2025-12-01T10:15:00+03:00");
        assert!(p.job_description_raw.starts_with("Описание вакансии"));
        assert!(p.job_description_raw.contains("PySpark"));
        assert_eq!(p.canonical_link, "https://career.habr.com/vacancies/1000123456");
    }

    #[test]
    fn geekjob_fixture() {
        let doc = load_fixture("geekjob_vacancy.html");
        let p = AdapterRegistry::new().parse(Source::Geekjob, &doc);

        assert_eq!(p.role, "Product Analyst");
        assert_eq!(p.company, "ФинПульс");
        assert_eq!(p.salary, "от 3 000 до 4 000 $");
        assert_eq!(p.work_mode, "remote");
        assert_eq!(p.skills, vec!["SQL", "Tableau", "A/B-тесты"]);
        assert!(p.job_description_raw.contains("Опыт работы 3+ года"));
        assert_eq!(p.canonical_link, "https://geekjob.ru/vacancy/65a1b2c3d4");
    }

    #[test]
    fn superjob_fixture() {
        let doc = load_fixture("superjob_vacancy.html");
        let p = AdapterRegistry::new().parse(Source::Superjob, &doc);

        assert_eq!(p.role, "BI-аналитик");
        assert_eq!(p.company, "АО «АгроСнаб»");
        assert_eq!(p.salary, "от 75 000 ₽");
        assert_eq!(p.experience, "Опыт работы от 1 года");
        assert_eq!(p.location_address, "Москва, Дубининская улица, 57с1");
        assert_eq!(p.location_metro, "Павелецкая");
        assert_eq!(p.work_mode, "office");
        assert!(p.job_description_raw.contains("Power BI и DataLens"));
        assert!(!p.job_description_raw.contains("Похожие вакансии"));
        assert!(!p.job_description_raw.contains("Senior Data Scientist"));
        assert!(p.skills.is_empty());
    }

    #[test]
    fn generic_fixture() {
        let doc = load_fixture("generic_vacancy.html");
        let p = AdapterRegistry::new().parse(Source::Other, &doc);

        assert_eq!(p.role, "Senior ML Engineer");
        assert_eq!(p.company, "Acme Robotics");
        assert_eq!(p.work_mode, "hybrid");
        assert!(p.job_description_raw.contains("PyTorch"));
        assert!(!p.job_description_raw.contains("Home / Careers"));
        assert_eq!(
            p.canonical_link,
            "https://jobs.example.com/ml-engineer?ref=linkedin#apply"
        );
        assert_eq!(p.source, Source::Other);
    }
}
