//! Year-anchored date normalization.
//!
//! Observations are annual: every parsed value becomes January 1 of its year.

use chrono::{Datelike, NaiveDate};
use econ_common::any_to_whole_number;
use polars::prelude::AnyValue;

pub const MIN_YEAR: i64 = 1000;
pub const MAX_YEAR: i64 = 9999;

/// Full-date layouts tried when a value does not start with a year.
const FULL_DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%b %d, %Y",
    "%d %b %Y",
];

/// January 1 of `year`, for four-digit years.
pub fn year_start(year: i64) -> Option<NaiveDate> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, 1, 1)
}

/// Parse a year-bearing string.
///
/// Leading four digits not followed by another digit are the year
/// (`"2020"`, `"2020-03-15"`, `"2020M01"`, `"2020Q3"`, `"2020.0"`). Otherwise a
/// few day-first and month-first layouts are tried.
pub fn parse_year_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() >= 4
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes.get(4).is_none_or(|b| !b.is_ascii_digit())
    {
        return trimmed[..4].parse::<i64>().ok().and_then(year_start);
    }

    FULL_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| year_start(i64::from(date.year())))
}

/// Integers and integral floats are years; text goes through [`parse_year_date`].
pub fn year_date_from_any(value: AnyValue<'_>) -> Option<NaiveDate> {
    match value {
        AnyValue::String(s) => parse_year_date(s),
        AnyValue::StringOwned(s) => parse_year_date(s.as_str()),
        other => any_to_whole_number(other).and_then(year_start),
    }
}
