//! Reference data for the harmonization pipeline.
//!
//! Provides the ISO 3166-1 country registry used to resolve free-text country
//! and region names to canonical alpha-3 codes.

#![deny(unsafe_code)]

pub mod country;
pub mod embedded;
pub mod error;
pub mod loader;

pub use country::{Country, CountryRegistry, resolve_country};
pub use error::{Result, StandardsError};
pub use loader::{load_country_registry, parse_country_registry};
