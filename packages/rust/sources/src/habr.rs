//! career.habr.com adapter.

use std::sync::LazyLock;

use jobnote_classify::infer_work_mode;
use jobnote_shared::{PartialRecord, Source};
use jobnote_text::{dedupe_array, page_text, pick_all_text, pick_attr, pick_text};
use regex::{Regex, RegexBuilder};
use scraper::Html;

use crate::{SourceAdapter, canonical_link};

static CITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(
        r"\b(Москва|Санкт-Петербург|Нижний Новгород|Казань|Екатеринбург|Новосибирск|Минск|Алматы)\b",
    )
    .case_insensitive(true)
    .build()
    .expect("valid regex")
});

pub struct HabrAdapter;

impl SourceAdapter for HabrAdapter {
    fn source(&self) -> Source {
        Source::Habr
    }

    fn name(&self) -> &str {
        "habr"
    }

    fn parse(&self, doc: &Html) -> PartialRecord {
        let role = pick_text(doc, &["h1"]);

        let company = pick_text(
            doc,
            &[
                r#"a[href^="/companies/"]"#,
                r#"section a[href*="companies"]"#,
                ".vacancy-company__title a",
                ".company_name a",
                "a.company_name",
            ],
        );

        let page = page_text(doc);

        let mut location_city = pick_text(doc, &[".vacancy-location", ".vacancy__location", ".location"]);
        if location_city.is_empty() {
            let scope = pick_text(doc, &["main"]);
            let scope = if scope.is_empty() { &page } else { &scope };
            if let Some(m) = CITY_RE.captures(scope).and_then(|c| c.get(1)) {
                location_city = m.as_str().to_string();
            }
        }

        let work_mode = infer_work_mode(&page)
            .map(|mode| mode.to_string())
            .unwrap_or_default();

        let skills = dedupe_array(&pick_all_text(
            doc,
            &[
                r#"a[href^="/skills/"]"#,
                "a.tag",
                ".tags a",
                ".vacancy__skills a",
                ".vacancy-section__tags a",
            ],
        ));

        // qualification is a link into the vacancy search, e.g. /vacancies?qid=4
        let level_link = pick_text(doc, &[r#"a[href*="qid="]"#]);

        let publish_date = pick_attr(doc, &["time[datetime]"], "datetime");

        PartialRecord {
            role,
            company,
            salary: pick_text(doc, &[".basic-salary", ".vacancy-salary", ".salary"]),
            location_city,
            work_mode,
            level_link,
            skills,
            publish_date,
            job_description_raw: pick_text(doc, &["article", "main"]),
            canonical_link: canonical_link(doc),
            source: Source::Habr,
            ..PartialRecord::default()
        }
    }
}
