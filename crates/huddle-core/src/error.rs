//! Core error types for huddle-core.
//!
//! Validation errors are fatal to the single call that raised them and
//! surface synchronously; per-room lookup failures never appear here
//! because the ranker absorbs them (see [`crate::rooms`]).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for huddle-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors on query or interval shape
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Room catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be greater than start ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Shorthand for an [`InvalidValue`](Self::InvalidValue) error.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Room catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to load the catalog file
    #[error("Failed to load room catalog from {path}: {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse catalog TOML
    #[error("Failed to parse room catalog: {0}")]
    ParseFailed(#[from] toml::de::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
