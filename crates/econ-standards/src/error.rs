//! Error types for reference data loading.

use std::path::PathBuf;
use thiserror::Error;

use econ_model::ModelError;

/// Errors that can occur when loading a country registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Registry file not found.
    #[error("country registry not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read or parse the registry CSV.
    #[error("failed to read country registry {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row carries an unusable code.
    #[error("invalid {field} value '{value}' in {file}")]
    InvalidValue {
        field: &'static str,
        value: String,
        file: PathBuf,
        #[source]
        source: ModelError,
    },

    /// The registry holds no countries.
    #[error("country registry {path} has no entries")]
    Empty { path: PathBuf },
}

/// Result type for reference data operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
