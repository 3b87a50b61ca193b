//! Source cleaning for the harmonization pipeline.
//!
//! Turns raw source tables into canonical `(country_code, date, value)` sets.
//!
//! # Overview
//!
//! - [`normalization`]: value-level normalizers (numbers, years, countries)
//! - [`cleaners`]: one cleaner per [`econ_model::SourceKind`]
//! - [`options`]: configurable column names for each source
//!
//! # Example
//!
//! ```ignore
//! use econ_model::SourceKind;
//! use econ_standards::CountryRegistry;
//! use econ_transform::{CleanContext, SourceColumns, clean_source};
//!
//! let registry = CountryRegistry::iso3166()?;
//! let columns = SourceColumns::default();
//! let ctx = CleanContext::new(&registry, &columns);
//! let inflation = clean_source(SourceKind::Inflation, &raw_df, &ctx)?;
//! ```

mod error;

pub mod cleaners;
pub mod normalization;
pub mod options;

pub use cleaners::{
    CleanContext, CleanOutput, CleanStats, clean_commodity, clean_inflation, clean_source,
    clean_wages,
};
pub use error::{Result, TransformError};
pub use options::{CommodityColumns, InflationColumns, SourceColumns, WageColumns};
