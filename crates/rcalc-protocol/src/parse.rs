//! Request line parsing.
//!
//! Grammar resolution order:
//! 1. empty line → error
//! 2. `QUIT` (any case) → [`Request::Quit`]
//! 3. prefix form `KEYWORD A B`, tried first
//! 4. infix form `A SYMBOL B`, tried on the same line only when the first
//!    token is not a known keyword
//!
//! A prefix line with a known keyword but bad operands (`ADD 2 y`) is an
//! error and never gets reinterpreted as infix.

use rcalc_core::{ErrorKind, Operation, Request};
use thiserror::Error;

use crate::literal::parse_literal;
use crate::sanitize::{is_space, sanitize};
use crate::QUIT;

/// Why a request line was rejected.
///
/// Every variant maps to [`ErrorKind::InvalidInput`] on the wire; the
/// distinction only feeds logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing left after sanitizing
    #[error("empty request line")]
    Empty,

    /// Recognised shape but an operand is not a number
    #[error("invalid operand: {0:?}")]
    InvalidOperand(String),

    /// Neither prefix nor infix shape
    #[error("unrecognized request: {0:?}")]
    Unrecognized(String),
}

impl ParseError {
    /// Returns the wire error kind for this failure.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}

impl From<ParseError> for ErrorKind {
    fn from(err: ParseError) -> Self {
        err.kind()
    }
}

/// Parses one raw request line, terminator included or not.
pub fn parse_request(line: &str) -> Result<Request, ParseError> {
    let line = sanitize(line);
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    if line.eq_ignore_ascii_case(QUIT) {
        return Ok(Request::Quit);
    }

    if let Some(outcome) = parse_prefix(line) {
        return outcome;
    }

    parse_infix(line)
}

/// Tries `KEYWORD A B`.
///
/// Returns `None` when the line does not commit to prefix form, i.e. it does
/// not split into three tokens or the first token is not a keyword.
fn parse_prefix(line: &str) -> Option<Result<Request, ParseError>> {
    let (keyword, lhs, rhs) = split_three(line)?;
    let op = Operation::from_keyword(keyword)?;

    Some(operands(lhs, rhs).map(|(a, b)| Request::compute(op, a, b)))
}

/// Tries `A SYMBOL B`.
fn parse_infix(line: &str) -> Result<Request, ParseError> {
    let unrecognized = || ParseError::Unrecognized(line.to_string());

    let (lhs, symbol, rhs) = split_three(line).ok_or_else(unrecognized)?;
    let op = single_char(symbol)
        .and_then(Operation::from_symbol)
        .ok_or_else(unrecognized)?;

    let (a, b) = operands(lhs, rhs)?;
    Ok(Request::compute(op, a, b))
}

fn operands(lhs: &str, rhs: &str) -> Result<(f64, f64), ParseError> {
    let a = parse_literal(lhs).ok_or_else(|| ParseError::InvalidOperand(lhs.to_string()))?;
    let b = parse_literal(rhs).ok_or_else(|| ParseError::InvalidOperand(rhs.to_string()))?;
    Ok((a, b))
}

/// Splits off the first three whitespace-delimited tokens.
///
/// Anything after the third token is ignored.
fn split_three(line: &str) -> Option<(&str, &str, &str)> {
    let mut tokens = line.split(is_space).filter(|t| !t.is_empty());
    Some((tokens.next()?, tokens.next()?, tokens.next()?))
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(op: Operation, a: f64, b: f64) -> Result<Request, ParseError> {
        Ok(Request::compute(op, a, b))
    }

    #[test]
    fn test_prefix_form() {
        assert_eq!(parse_request("ADD 2 3"), compute(Operation::Add, 2.0, 3.0));
        assert_eq!(parse_request("SUB 2 3"), compute(Operation::Subtract, 2.0, 3.0));
        assert_eq!(parse_request("MUL 2 3"), compute(Operation::Multiply, 2.0, 3.0));
        assert_eq!(parse_request("DIV 10 4"), compute(Operation::Divide, 10.0, 4.0));
    }

    #[test]
    fn test_prefix_keyword_any_case() {
        for line in ["add 2 3", "Add 2 3", "ADD 2 3", "aDd 2 3"] {
            assert_eq!(parse_request(line), compute(Operation::Add, 2.0, 3.0), "{line}");
        }
    }

    #[test]
    fn test_infix_form() {
        assert_eq!(parse_request("2 + 3"), compute(Operation::Add, 2.0, 3.0));
        assert_eq!(parse_request("2 - 3"), compute(Operation::Subtract, 2.0, 3.0));
        assert_eq!(parse_request("2 * 3"), compute(Operation::Multiply, 2.0, 3.0));
        assert_eq!(parse_request("10 / 4"), compute(Operation::Divide, 10.0, 4.0));
    }

    #[test]
    fn test_infix_negative_operands() {
        assert_eq!(parse_request("-2 - -3"), compute(Operation::Subtract, -2.0, -3.0));
        assert_eq!(parse_request("1e2 * -.5"), compute(Operation::Multiply, 100.0, -0.5));
    }

    #[test]
    fn test_infix_matches_prefix() {
        let pairs = [
            ("ADD 1.5 2", "1.5 + 2"),
            ("SUB 1.5 2", "1.5 - 2"),
            ("MUL 1.5 2", "1.5 * 2"),
            ("DIV 1.5 2", "1.5 / 2"),
        ];
        for (prefix, infix) in pairs {
            assert_eq!(parse_request(prefix), parse_request(infix));
        }
    }

    #[test]
    fn test_quit_any_case() {
        assert_eq!(parse_request("QUIT"), Ok(Request::Quit));
        assert_eq!(parse_request("quit\r\n"), Ok(Request::Quit));
        assert_eq!(parse_request("  Quit  \n"), Ok(Request::Quit));
    }

    #[test]
    fn test_quit_with_arguments_is_invalid() {
        assert!(parse_request("QUIT now").is_err());
    }

    #[test]
    fn test_empty_and_blank_lines() {
        assert_eq!(parse_request(""), Err(ParseError::Empty));
        assert_eq!(parse_request("\n"), Err(ParseError::Empty));
        assert_eq!(parse_request("  \r\n"), Err(ParseError::Empty));
    }

    #[test]
    fn test_whitespace_variants_equivalent() {
        let expected = compute(Operation::Add, 2.0, 3.0);
        for line in ["ADD 2 3", "ADD 2 3\n", "ADD 2 3\r\n", "  ADD 2 3  ", "\tADD\t2  3 \r\n"] {
            assert_eq!(parse_request(line), expected, "{line:?}");
        }
    }

    #[test]
    fn test_garbage_rejected() {
        let err = parse_request("garbage text").unwrap_err();
        assert!(matches!(err, ParseError::Unrecognized(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_wrong_token_count() {
        assert!(parse_request("ADD 2").is_err());
        assert!(parse_request("2 +").is_err());
        assert!(parse_request("2+3").is_err());
        assert!(parse_request("ADD").is_err());
    }

    #[test]
    fn test_extra_tokens_ignored() {
        assert_eq!(parse_request("ADD 2 3 4"), compute(Operation::Add, 2.0, 3.0));
        assert_eq!(parse_request("2 * 3 junk"), compute(Operation::Multiply, 2.0, 3.0));
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        assert!(matches!(parse_request("2 % 3"), Err(ParseError::Unrecognized(_))));
        assert!(matches!(parse_request("2 ++ 3"), Err(ParseError::Unrecognized(_))));
    }

    #[test]
    fn test_unknown_keyword_rejected() {
        assert!(matches!(parse_request("MOD 7 2"), Err(ParseError::Unrecognized(_))));
    }

    #[test]
    fn test_keyword_with_bad_operand_does_not_fall_through() {
        assert_eq!(
            parse_request("ADD 2 y"),
            Err(ParseError::InvalidOperand("y".to_string()))
        );
        assert_eq!(
            parse_request("div x 1"),
            Err(ParseError::InvalidOperand("x".to_string()))
        );
    }

    #[test]
    fn test_infix_bad_operand() {
        assert_eq!(
            parse_request("2 + three"),
            Err(ParseError::InvalidOperand("three".to_string()))
        );
    }

    #[test]
    fn test_division_by_zero_parses() {
        // Domain validation happens at evaluation, not parsing
        assert_eq!(parse_request("DIV 10 0"), compute(Operation::Divide, 10.0, 0.0));
        assert_eq!(parse_request("10 / 0"), compute(Operation::Divide, 10.0, 0.0));
    }

    #[test]
    fn test_out_of_range_operand_rejected() {
        assert!(parse_request("ADD 1e400 1").is_err());
    }
}
