//! hh.ru adapter. The page carries stable `data-qa` attributes.

use jobnote_shared::{PartialRecord, Source};
use jobnote_text::{clean_text, pick_all_text, pick_text};
use scraper::Html;

use crate::{SourceAdapter, canonical_link};

pub struct HhAdapter;

impl SourceAdapter for HhAdapter {
    fn source(&self) -> Source {
        Source::Hh
    }

    fn name(&self) -> &str {
        "hh"
    }

    fn parse(&self, doc: &Html) -> PartialRecord {
        let role = pick_text(doc, &[r#"[data-qa="vacancy-title"]"#, "h1"]);

        let company = pick_text(
            doc,
            &[
                r#"[data-qa="vacancy-company-name"]"#,
                r#"[data-qa="vacancy-company"] a"#,
                r#"a[data-qa="vacancy-company-name"]"#,
            ],
        );

        let salary = pick_text(
            doc,
            &[
                r#"[data-qa="vacancy-salary"]"#,
                r#"[data-qa="vacancy-salary-compensation-type"]"#,
            ],
        );

        let work_mode = pick_text(
            doc,
            &[
                r#"[data-qa="work-formats-text"]"#,
                r#"[data-qa="vacancy-view-employment-mode"]"#,
                r#"[data-qa="vacancy-view-work-schedule"]"#,
            ],
        );

        let experience = pick_text(doc, &[r#"[data-qa="vacancy-experience"]"#]);

        // "Москва, Тверская, улица Тверская, 1": city is the first segment
        let location_line = pick_text(
            doc,
            &[
                r#"[data-qa="vacancy-view-raw-address"]"#,
                r#"[data-qa="vacancy-view-location"]"#,
            ],
        );
        let location_city = location_line
            .split(',')
            .next()
            .map(clean_text)
            .unwrap_or_default();
        let location_metro = pick_text(doc, &[r#"[data-qa="address-metro-station-name"]"#]);

        let skills = pick_all_text(
            doc,
            &[r#"[data-qa="skills-element"]"#, r#"a[data-qa="bloko-tag__text"]"#],
        );

        let publish_date = pick_text(
            doc,
            &[
                r#"[data-qa="vacancy-creation-time-redesigned"]"#,
                r#"[data-qa="vacancy-creation-time"]"#,
            ],
        );

        let job_description_raw = pick_text(doc, &[r#"[data-qa="vacancy-description"]"#, "main"]);

        PartialRecord {
            role,
            company,
            salary,
            location_city,
            location_address: location_line,
            location_metro,
            work_mode,
            experience,
            skills,
            publish_date,
            job_description_raw,
            canonical_link: canonical_link(doc),
            source: Source::Hh,
            ..PartialRecord::default()
        }
    }
}
