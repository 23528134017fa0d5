//! Generic (fallback) adapter.
//!
//! Used for any board without a dedicated adapter. Relies on document
//! structure and OpenGraph/microdata only. Pages without `article`/`main`
//! get the body text from [`crate::AdapterRegistry::parse`].

use jobnote_classify::infer_work_mode;
use jobnote_shared::{PartialRecord, Source};
use jobnote_text::{meta_content, page_text, pick_text};
use scraper::Html;

use crate::{SourceAdapter, canonical_link};

pub struct GenericAdapter;

impl SourceAdapter for GenericAdapter {
    fn source(&self) -> Source {
        Source::Other
    }

    fn name(&self) -> &str {
        "generic"
    }

    fn parse(&self, doc: &Html) -> PartialRecord {
        let mut company = meta_content(doc, "og:site_name");
        if company.is_empty() {
            company = meta_content(doc, "og:title");
        }
        if company.is_empty() {
            company = pick_text(doc, &["[itemprop='hiringOrganization']"]);
        }

        let work_mode = infer_work_mode(&page_text(doc))
            .map(|mode| mode.to_string())
            .unwrap_or_default();

        PartialRecord {
            role: pick_text(doc, &["h1", "title"]),
            company,
            work_mode,
            job_description_raw: pick_text(doc, &["article", "main"]),
            canonical_link: canonical_link(doc),
            source: Source::Other,
            ..PartialRecord::default()
        }
    }
}
