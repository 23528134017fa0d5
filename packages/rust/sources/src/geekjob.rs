//! geekjob.ru adapter. Markup changes often, so selectors are loose.

use jobnote_classify::infer_work_mode;
use jobnote_shared::{PartialRecord, Source};
use jobnote_text::{dedupe_array, page_text, pick_all_text, pick_text};
use scraper::Html;

use crate::{SourceAdapter, canonical_link};

pub struct GeekjobAdapter;

impl SourceAdapter for GeekjobAdapter {
    fn source(&self) -> Source {
        Source::Geekjob
    }

    fn name(&self) -> &str {
        "geekjob"
    }

    fn parse(&self, doc: &Html) -> PartialRecord {
        let work_mode = infer_work_mode(&page_text(doc))
            .map(|mode| mode.to_string())
            .unwrap_or_default();

        let skills = dedupe_array(&pick_all_text(
            doc,
            &["a.tag", ".tags a", "[class*='tag'] a", "[class*='skills'] a"],
        ));

        PartialRecord {
            role: pick_text(doc, &["h1", "title"]),
            company: pick_text(
                doc,
                &[
                    ".company-name",
                    ".vacancy-company",
                    ".job-company",
                    "a[href*='/companies/']",
                ],
            ),
            salary: pick_text(doc, &[".salary", ".vacancy-salary", "[class*='salary']"]),
            work_mode,
            skills,
            job_description_raw: pick_text(
                doc,
                &["article", "main", ".vacancy-description", ".job-description"],
            ),
            canonical_link: canonical_link(doc),
            source: Source::Geekjob,
            ..PartialRecord::default()
        }
    }
}
