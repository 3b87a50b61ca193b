//! Shared data model for the macroeconomic harmonization pipeline.

#![deny(unsafe_code)]

pub mod error;
pub mod ids;
pub mod lookup;
pub mod record;
pub mod schema;

pub use error::{ModelError, Result};
pub use ids::CountryCode;
pub use lookup::HeaderLookup;
pub use record::{CanonicalRecord, CanonicalSet, MergedRecord, SourceKind};
