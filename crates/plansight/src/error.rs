//! Error types for the Plansight library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Plansight operations.
///
/// The classification and aggregation algorithms themselves are total and never
/// return this type; it covers the surfaces around them (file input, JSON
/// decoding, request building).
#[derive(Debug, Error)]
pub enum PlansightError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no data to preview.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// The same header appears more than once.
    #[error("Duplicate column '{0}' in header")]
    DuplicateColumn(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Neither the caller, the columns nor the file name identified a dataset type.
    #[error("Could not determine dataset type for '{0}'")]
    UnresolvedDatasetType(String),

    /// Planning inputs cannot be turned into a forecast request.
    #[error("Invalid forecast request: {0}")]
    InvalidRequest(String),
}

/// Result type alias for Plansight operations.
pub type Result<T> = std::result::Result<T, PlansightError>;
