//! Error types for jobnote.
//!
//! Library crates use [`JobNoteError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Classification itself never fails: missing or malformed fields degrade to
//! empty values. Errors only surface at the boundaries (config, files,
//! templates, or an assemble call with no record at all).

use std::path::PathBuf;

/// Top-level error type for all jobnote operations.
#[derive(Debug, thiserror::Error)]
pub enum JobNoteError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// HTML or data-table parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// The assembler was asked to classify a record that does not exist.
    #[error("classification error: {message}")]
    Classification { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Template loading or rendering error.
    #[error("template error: {0}")]
    Template(String),

    /// Data validation error (bad URL, invalid argument, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, JobNoteError>;

impl JobNoteError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a classification error from any displayable message.
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
