//! Canonical number rendering for `OK` replies.

/// Digits kept after the decimal point before trimming.
pub const FRACTION_DIGITS: usize = 6;

/// Formats a result for the wire.
///
/// The value is rendered with exactly six fractional digits (round to
/// nearest), then trailing zeros are removed, then a dangling decimal point
/// is removed: `7.000000` becomes `7`, `7.500000` becomes `7.5`.
///
/// Non-finite values use the C spellings `inf`, `-inf`, `nan` and `-nan`.
/// The sign of zero is kept, so tiny negative results render as `-0`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        let text = if value.is_sign_negative() { "-nan" } else { "nan" };
        return text.to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_negative() { "-inf" } else { "inf" };
        return text.to_string();
    }

    let mut text = format!("{value:.prec$}", prec = FRACTION_DIGITS);
    let digits = text.trim_end_matches('0');
    let kept = digits.strip_suffix('.').unwrap_or(digits).len();
    text.truncate(kept);
    text
}
