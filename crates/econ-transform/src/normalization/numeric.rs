//! Loose numeric parsing for published statistics.
//!
//! Source tables carry values like `"7.4%"`, `"1,234.5"` or `"95.5 (p)"`.
//! Everything except ASCII digits and `.` is discarded; a `-` directly in
//! front of the first kept character is kept as the sign. Every source uses
//! the same rule, so negative prices and indices stay negative.

use econ_common::any_to_finite_f64;
use polars::prelude::AnyValue;

/// Parse a loosely formatted number.
///
/// Returns `None` when nothing numeric remains, the remainder is not a valid
/// number (`"1.2.3"`), or the result is not finite.
pub fn parse_loose_numeric(value: &str) -> Option<f64> {
    let mut kept = String::with_capacity(value.len());
    let mut negative = false;
    let mut pending_minus = false;

    for ch in value.chars() {
        match ch {
            '0'..='9' | '.' => {
                if kept.is_empty() && pending_minus {
                    negative = true;
                }
                pending_minus = false;
                kept.push(ch);
            }
            '-' if kept.is_empty() => pending_minus = true,
            _ => pending_minus = false,
        }
    }

    if kept.is_empty() {
        return None;
    }
    let magnitude: f64 = kept.parse().ok()?;
    let parsed = if negative { -magnitude } else { magnitude };
    parsed.is_finite().then_some(parsed)
}

/// Numeric cells pass through; text cells go through [`parse_loose_numeric`].
pub fn numeric_from_any(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::String(s) => parse_loose_numeric(s),
        AnyValue::StringOwned(s) => parse_loose_numeric(s.as_str()),
        other => any_to_finite_f64(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_percent_and_thousands() {
        assert_eq!(parse_loose_numeric("7.4%"), Some(7.4));
        assert_eq!(parse_loose_numeric("1,234.5"), Some(1234.5));
        assert_eq!(parse_loose_numeric(" 110 "), Some(110.0));
    }

    #[test]
    fn test_annotations_are_stripped() {
        assert_eq!(parse_loose_numeric("95.5 (p)"), Some(95.5));
        assert_eq!(parse_loose_numeric("$12"), Some(12.0));
    }

    #[test]
    fn test_negative_sign_kept_only_before_first_digit() {
        assert_eq!(parse_loose_numeric("-1.5%"), Some(-1.5));
        assert_eq!(parse_loose_numeric("-.5"), Some(-0.5));
        assert_eq!(parse_loose_numeric("- 1.5"), Some(1.5));
        assert_eq!(parse_loose_numeric("1-2"), Some(12.0));
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(parse_loose_numeric(""), None);
        assert_eq!(parse_loose_numeric("n/a"), None);
        assert_eq!(parse_loose_numeric(".."), None);
        assert_eq!(parse_loose_numeric("1.2.3"), None);
        assert_eq!(parse_loose_numeric("-"), None);
    }

    #[test]
    fn test_numeric_from_any() {
        assert_eq!(numeric_from_any(AnyValue::Null), None);
        assert_eq!(numeric_from_any(AnyValue::Int64(110)), Some(110.0));
        assert_eq!(numeric_from_any(AnyValue::Float64(3.2)), Some(3.2));
        assert_eq!(numeric_from_any(AnyValue::Float64(f64::NAN)), None);
        assert_eq!(numeric_from_any(AnyValue::String("3.2%")), Some(3.2));
    }

    proptest! {
        #[test]
        fn prop_finite_values_round_trip(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            prop_assert_eq!(parse_loose_numeric(&v.to_string()), Some(v));
        }

        #[test]
        fn prop_normalization_is_idempotent(raw in "[-0-9.,% a-z]{0,16}") {
            if let Some(first) = parse_loose_numeric(&raw) {
                prop_assert_eq!(parse_loose_numeric(&first.to_string()), Some(first));
            }
        }
    }
}
