//! Normalization functions for raw cell values.
//!
//! Each normalizer maps a loosely formatted value to a typed value or `None`.
//! None of them fail: a value that cannot be interpreted is missing, not an
//! error.

pub mod country;
pub mod date;
pub mod numeric;

pub use country::resolve_country_any;
pub use date::{MAX_YEAR, MIN_YEAR, parse_year_date, year_date_from_any, year_start};
pub use numeric::{numeric_from_any, parse_loose_numeric};
