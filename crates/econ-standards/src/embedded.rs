//! Embedded reference data.
//!
//! Reference tables are compiled in with `include_str!()` so resolution never
//! depends on the working directory.

/// ISO 3166-1 country table.
///
/// Columns: `alpha_2,alpha_3,numeric,name,official_name,common_name`.
pub const ISO_3166_COUNTRIES: &str = include_str!("../data/iso3166.csv");

/// Label used in errors and logs for the embedded table.
pub const ISO_3166_ORIGIN: &str = "embedded:iso3166.csv";
