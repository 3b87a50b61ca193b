//! Merge and pipeline orchestration for macroeconomic source harmonization.
//!
//! The merge itself is pure ([`merge_sources`]); [`run_pipeline`] wraps it
//! with file ingestion, cleaning and output.

#![deny(unsafe_code)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod merge;
pub mod pipeline;

pub use config::PipelineConfig;
pub use dataset::{merged_to_dataframe, write_merged_csv};
pub use error::{CoreError, Result};
pub use merge::{
    DEFAULT_MIN_OBSERVATIONS, DuplicateDatePolicy, MergeError, MergeOptions, MergeOutcome,
    MergeReport, merge_sources,
};
pub use pipeline::{
    Harmonized, PipelineOutcome, RunOptions, SourceSummary, harmonize_frames, ingest_source,
    load_registry, run_pipeline, write_run_report,
};
