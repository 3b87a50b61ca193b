//! Error types for source cleaning.

use econ_model::SourceKind;
use thiserror::Error;

/// Structural failures while cleaning a source table.
///
/// Bad cell values are never errors; they become `None` in the canonical
/// record.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A configured column is absent from the source table.
    #[error("{kind} source is missing column '{column}' (available: {})", .available.join(", "))]
    MissingColumn {
        kind: SourceKind,
        column: String,
        available: Vec<String>,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for cleaning operations.
pub type Result<T> = std::result::Result<T, TransformError>;
