//! Shared utilities for econ crates.
//!
//! Polars `AnyValue` conversions used by ingestion, cleaning and reporting.

pub mod polars;

pub use polars::{
    any_to_finite_f64, any_to_string, any_to_text, any_to_whole_number, format_numeric,
};
