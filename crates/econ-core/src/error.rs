//! Error types for the harmonization pipeline.

use std::path::PathBuf;
use thiserror::Error;

use econ_ingest::IngestError;
use econ_model::SourceKind;
use econ_standards::StandardsError;
use econ_transform::TransformError;

use crate::merge::MergeError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Standards(#[from] StandardsError),

    #[error("{kind} source {path}: {source}")]
    Ingest {
        kind: SourceKind,
        path: PathBuf,
        #[source]
        source: IngestError,
    },

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {message}")]
    Output { path: PathBuf, message: String },

    #[error("failed to serialize run report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
