//! Shared types, error model, and configuration for jobnote.
//!
//! This crate is the foundation depended on by all other jobnote crates.
//! It provides:
//! - [`JobNoteError`] — the unified error type
//! - Domain types ([`PartialRecord`], [`VacancyRecord`], [`Level`], [`WorkMode`], [`Source`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, PathsConfig, SalaryConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, validate_config,
};
pub use error::{JobNoteError, Result};
pub use types::{Level, PartialRecord, Source, VacancyRecord, WorkMode};
