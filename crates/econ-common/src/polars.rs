//! Polars AnyValue utility functions.

use polars::prelude::AnyValue;

/// Converts a Polars `AnyValue` to a display `String`.
///
/// `Null` becomes the empty string and floats lose trailing zeros.
///
/// ```
/// use polars::prelude::AnyValue;
/// use econ_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Float64(95.50)), "95.5");
/// assert_eq!(any_to_string(AnyValue::String("Brazil")), "Brazil");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Trimmed text of a cell, `None` when null or blank.
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    let text = any_to_string(value);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Formats a float without trailing zeros.
///
/// ```
/// use econ_common::format_numeric;
///
/// assert_eq!(format_numeric(110.0), "110");
/// assert_eq!(format_numeric(-0.25), "-0.25");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Numeric cell as a finite `f64`. Strings and non-finite floats are `None`.
pub fn any_to_finite_f64(value: AnyValue<'_>) -> Option<f64> {
    let v = match value {
        AnyValue::Int8(v) => f64::from(v),
        AnyValue::Int16(v) => f64::from(v),
        AnyValue::Int32(v) => f64::from(v),
        AnyValue::Int64(v) => v as f64,
        AnyValue::UInt8(v) => f64::from(v),
        AnyValue::UInt16(v) => f64::from(v),
        AnyValue::UInt32(v) => f64::from(v),
        AnyValue::UInt64(v) => v as f64,
        AnyValue::Float32(v) => f64::from(v),
        AnyValue::Float64(v) => v,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// Integer cell, or a float cell with no fractional part.
pub fn any_to_whole_number(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Float32(v) => whole_f64(f64::from(v)),
        AnyValue::Float64(v) => whole_f64(v),
        _ => None,
    }
}

fn whole_f64(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        Some(v as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_text_blank_is_none() {
        assert_eq!(any_to_text(AnyValue::Null), None);
        assert_eq!(any_to_text(AnyValue::String("   ")), None);
        assert_eq!(
            any_to_text(AnyValue::String("  Brazil ")),
            Some("Brazil".to_string())
        );
        assert_eq!(any_to_text(AnyValue::Int32(76)), Some("76".to_string()));
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(3.20), "3.2");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(100.0), "100");
    }

    #[test]
    fn test_any_to_finite_f64() {
        assert_eq!(any_to_finite_f64(AnyValue::Null), None);
        assert_eq!(any_to_finite_f64(AnyValue::Int64(-2)), Some(-2.0));
        assert_eq!(any_to_finite_f64(AnyValue::Float64(95.5)), Some(95.5));
        assert_eq!(any_to_finite_f64(AnyValue::Float64(f64::NAN)), None);
        assert_eq!(any_to_finite_f64(AnyValue::Float64(f64::INFINITY)), None);
        assert_eq!(any_to_finite_f64(AnyValue::String("1.5")), None);
    }

    #[test]
    fn test_any_to_whole_number() {
        assert_eq!(any_to_whole_number(AnyValue::Int32(2020)), Some(2020));
        assert_eq!(any_to_whole_number(AnyValue::Float64(2020.0)), Some(2020));
        assert_eq!(any_to_whole_number(AnyValue::Float64(2020.5)), None);
        assert_eq!(any_to_whole_number(AnyValue::String("2020")), None);
    }
}
