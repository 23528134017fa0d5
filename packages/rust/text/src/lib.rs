//! Low-level text utilities for jobnote.
//!
//! This crate provides:
//! - [`clean`] — whitespace cleanup, case-insensitive dedupe, inline arrays
//! - [`link`] — job-link canonicalization (tracking parameter stripping)
//! - [`dom`] — selector-based extraction over `scraper` documents
//! - [`date`] — publication date parsing
//! - [`filename`] — filesystem-safe name components

pub mod clean;
pub mod date;
pub mod dom;
pub mod filename;
pub mod link;

pub use clean::{
    build_location_display, clean_text, cut_before, dedupe_array, to_yaml_inline_array,
    to_yaml_string,
};
pub use date::{parse_iso_date, parse_publish_date, parse_russian_date};
pub use dom::{
    element_text, meta_content, page_text, pick_all_text, pick_attr, pick_text, pick_text_matching,
};
pub use filename::{DEFAULT_MAX_LEN, sanitize_filename_component};
pub use link::strip_tracking_params;
