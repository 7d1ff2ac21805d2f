//! Numeric literal tokens.

use crate::sanitize::is_space;

/// Parses a numeric operand.
///
/// Accepts the decimal/exponential float grammar (`3`, `-2.5`, `.5`,
/// `1e-3`, `+4E2`) plus `inf`, `infinity` and `nan` in any case. Leading and
/// trailing whitespace around the literal is ignored, so `"3.5 "` parses.
///
/// Out-of-range spellings are rejected: a finite spelling that overflows to
/// infinity, or a non-zero mantissa that underflows to zero or a subnormal.
pub fn parse_literal(token: &str) -> Option<f64> {
    let text = token.trim_matches(is_space);
    if text.is_empty() {
        return None;
    }

    let value: f64 = text.parse().ok()?;
    if is_range_error(text, value) {
        return None;
    }

    Some(value)
}

fn is_range_error(text: &str, value: f64) -> bool {
    let mantissa = text.split(['e', 'E']).next().unwrap_or(text);

    if value.is_infinite() {
        // "inf" / "infinity" are spelled with letters, overflow is not
        return !mantissa.chars().any(|c| c.is_ascii_alphabetic());
    }

    if value == 0.0 || value.is_subnormal() {
        return mantissa.chars().any(|c| matches!(c, '1'..='9'));
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_literal("3"), Some(3.0));
        assert_eq!(parse_literal("-2.5"), Some(-2.5));
        assert_eq!(parse_literal("+4"), Some(4.0));
        assert_eq!(parse_literal(".5"), Some(0.5));
        assert_eq!(parse_literal("5."), Some(5.0));
    }

    #[test]
    fn test_exponent_forms() {
        assert_eq!(parse_literal("1e3"), Some(1000.0));
        assert_eq!(parse_literal("2.5E-1"), Some(0.25));
        assert_eq!(parse_literal("-1e+2"), Some(-100.0));
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert_eq!(parse_literal("3.5 "), Some(3.5));
        assert_eq!(parse_literal("3.5\t\n"), Some(3.5));
        assert_eq!(parse_literal("  7"), Some(7.0));
    }

    #[test]
    fn test_rejects_trailing_garbage() {
        assert_eq!(parse_literal("3x"), None);
        assert_eq!(parse_literal("1e"), None);
        assert_eq!(parse_literal("1.2.3"), None);
        assert_eq!(parse_literal("3 4"), None);
    }

    #[test]
    fn test_rejects_empty_and_non_numeric() {
        assert_eq!(parse_literal(""), None);
        assert_eq!(parse_literal("   "), None);
        assert_eq!(parse_literal("abc"), None);
        assert_eq!(parse_literal("-"), None);
        assert_eq!(parse_literal("."), None);
        assert_eq!(parse_literal("0x10"), None);
    }

    #[test]
    fn test_special_spellings() {
        assert_eq!(parse_literal("inf"), Some(f64::INFINITY));
        assert_eq!(parse_literal("-Infinity"), Some(f64::NEG_INFINITY));
        assert!(parse_literal("NaN").is_some_and(f64::is_nan));
    }

    #[test]
    fn test_range_errors() {
        assert_eq!(parse_literal("1e400"), None);
        assert_eq!(parse_literal("-1e400"), None);
        assert_eq!(parse_literal("1e-400"), None);
        assert_eq!(parse_literal("5e-324"), None);
    }

    #[test]
    fn test_zero_spellings_are_not_underflow() {
        assert_eq!(parse_literal("0"), Some(0.0));
        assert_eq!(parse_literal("0.000"), Some(0.0));
        assert_eq!(parse_literal("0e-999"), Some(0.0));
        assert!(parse_literal("-0").is_some_and(|v| v == 0.0 && v.is_sign_negative()));
    }
}
