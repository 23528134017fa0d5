//! Record assembly, note filenames, rendering and the extraction service.
//!
//! This crate ties the adapters, classifier and tech stack matcher together
//! into the page → canonical record → Markdown note flow.

pub mod assembler;
pub mod filename;
pub mod render;
pub mod service;

pub use assembler::RecordAssembler;
pub use filename::{clean_company_name, generate_filename, role_abbrev};
pub use render::{DEFAULT_TEMPLATE, load_template, render_template, template_values};
pub use service::{ExtractionService, LastResult};
