//! Whitespace handling for raw request lines.

/// Returns true for the C-locale whitespace set.
///
/// Unlike [`char::is_ascii_whitespace`] this includes vertical tab.
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Strips line terminators and surrounding whitespace from a raw line.
pub fn sanitize(line: &str) -> &str {
    line.trim_end_matches(|c| c == '\n' || c == '\r' || is_space(c))
        .trim_start_matches(is_space)
}
