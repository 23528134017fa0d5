//! superjob.ru adapter.
//!
//! Class names are hashed, so most fields combine a few known class sets with
//! wording-based fallbacks.

use std::sync::LazyLock;

use jobnote_classify::infer_work_mode;
use jobnote_shared::{PartialRecord, Source};
use jobnote_text::{
    clean_text, cut_before, dedupe_array, meta_content, page_text, pick_all_text, pick_text,
    pick_text_matching,
};
use regex::{Regex, RegexBuilder};
use scraper::Html;

use crate::{SourceAdapter, canonical_link};

/// Start of the "similar vacancies" block that follows the description.
const SIMILAR_MARKER: &str = "Похожие вакансии";

const MAX_METRO_CHARS: usize = 40;

static EXPERIENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"опыт\s*работы")
        .case_insensitive(true)
        .build()
        .expect("valid regex")
});

static BIG_CITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"москва|санкт|петербург|екатеринбург|новосибирск")
        .case_insensitive(true)
        .build()
        .expect("valid regex")
});

pub struct SuperjobAdapter;

impl SourceAdapter for SuperjobAdapter {
    fn source(&self) -> Source {
        Source::Superjob
    }

    fn name(&self) -> &str {
        "superjob"
    }

    fn parse(&self, doc: &Html) -> PartialRecord {
        let role = pick_text(doc, &["h1", "title"]);

        let mut company = pick_text(
            doc,
            &[
                "a[href*='/clients/']",
                "a[href*='/clients/'] span",
                "[class*='Company'] a",
                "[class*='company'] a",
                ".company a",
                ".vacancy-company a",
            ],
        );
        if company.is_empty() {
            company = meta_content(doc, "og:site_name");
        }

        // class "kk-+S" needs the plus escaped
        let salary = pick_text(
            doc,
            &[
                r"span.kk-\+S",
                "span[class*='kk-']",
                "[class*='VacancySalary']",
                "[class*='salary']",
                ".salary",
            ],
        );

        let mut experience = pick_text_matching(doc, "span", &EXPERIENCE_RE);
        if experience.is_empty() {
            experience = pick_text(
                doc,
                &["span.bMRJG._2_ehB._3Tn5h", "span.bMRJG", "[class*='Experience']"],
            );
        }

        let candidates = dedupe_array(&pick_all_text(
            doc,
            &[
                "span._23xe3._2_ehB._3H8Cg._3Tn5h",
                "span._23xe3._3H8Cg._3Tn5h",
                "span._23xe3._3H8Cg",
                "span[class*='_23xe3'][class*='_3H8Cg']",
                "[class*='address'] span",
                "[class*='location'] span",
            ],
        ));
        let (location_address, location_metro) = split_location(&candidates);

        let page = page_text(doc);
        let work_mode = infer_work_mode(&page)
            .map(|mode| mode.to_string())
            .unwrap_or_default();

        let mut main_text = pick_text(doc, &["main", "article"]);
        if main_text.is_empty() {
            main_text = page;
        }
        let job_description_raw = clean_text(cut_before(&main_text, SIMILAR_MARKER));

        let skills = dedupe_array(&pick_all_text(
            doc,
            &["a.tag", ".tags a", "[class*='tag'] a", "[class*='skills'] a"],
        ));

        PartialRecord {
            role,
            company,
            salary,
            location_address,
            location_metro,
            work_mode,
            experience,
            skills,
            job_description_raw,
            canonical_link: canonical_link(doc),
            source: Source::Superjob,
            ..PartialRecord::default()
        }
    }
}

/// Address and metro share one class set. The address has a comma and a
/// house number (or names a big city); the metro is short with neither.
fn split_location(candidates: &[String]) -> (String, String) {
    let address = candidates
        .iter()
        .find(|t| t.contains(',') && t.chars().any(|c| c.is_ascii_digit()))
        .or_else(|| {
            candidates
                .iter()
                .find(|t| t.contains(',') && BIG_CITY_RE.is_match(t))
        })
        .cloned()
        .unwrap_or_default();

    let metro = candidates
        .iter()
        .find(|t| {
            !t.is_empty()
                && **t != address
                && !t.contains(',')
                && !t.chars().any(|c| c.is_ascii_digit())
                && t.chars().count() <= MAX_METRO_CHARS
        })
        .cloned()
        .unwrap_or_default();

    (address, metro)
}
