//! Catalog error types.
//!
//! Loading errors carry the file path; validation errors name the zone or
//! locale and the offending value so a broken catalog can be fixed without
//! a debugger.

use std::path::PathBuf;

use thiserror::Error;

use tzp_core::TableError;

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// YAML parsing failed.
    #[error("failed to parse catalog at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// The catalog file does not exist.
    #[error("catalog file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A zone id is listed more than once.
    #[error("zone {id} is defined more than once")]
    DuplicateZone { id: String },

    /// A locale is listed more than once (after canonicalization).
    #[error("locale {id} is defined more than once")]
    DuplicateLocale { id: String },

    /// A calendar convention is outside 1..=7.
    #[error("locale {locale}: {field} must be between 1 and 7, got {value}")]
    CalendarOutOfRange {
        locale: String,
        field: &'static str,
        value: i32,
    },

    /// Transition instants are not strictly ascending.
    #[error("zone {zone}: transition {index} at {at} does not follow the previous one")]
    UnorderedTransitions { zone: String, index: usize, at: i64 },

    /// An identifier or table operation failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Generic serde_yaml error (not file-specific).
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
