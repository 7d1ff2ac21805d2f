//! Reply lines sent by the server.
//!
//! ```text
//! OK <number>\n
//! ERR <code> <message>\n
//! ```

use std::fmt;

use rcalc_core::{format_number, ErrorKind, EvalResult};
use thiserror::Error;

use crate::literal::parse_literal;
use crate::sanitize::sanitize;

/// A single reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `OK` with the already formatted result
    Value(String),

    /// `ERR` with the wire error kind
    Error(ErrorKind),
}

impl Reply {
    /// Creates a success reply, formatting the value canonically.
    pub fn value(value: f64) -> Self {
        Self::Value(format_number(value))
    }

    /// Creates an error reply.
    pub fn error(kind: ErrorKind) -> Self {
        Self::Error(kind)
    }

    /// Returns true for `OK` replies.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Returns the error kind for `ERR` replies.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Value(_) => None,
            Self::Error(kind) => Some(*kind),
        }
    }

    /// Returns the numeric result of an `OK` reply.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Value(text) => parse_literal(text),
            Self::Error(_) => None,
        }
    }

    /// Renders the reply with its trailing newline.
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }

    /// Parses a reply line received from a server.
    pub fn parse(line: &str) -> Result<Self, ReplyParseError> {
        let line = sanitize(line);
        if line.is_empty() {
            return Err(ReplyParseError::Empty);
        }

        let (status, rest) = line.split_once(' ').unwrap_or((line, ""));
        match status {
            "OK" => {
                let value = rest.trim();
                if value.is_empty() {
                    return Err(ReplyParseError::MissingValue);
                }
                Ok(Self::Value(value.to_string()))
            }
            "ERR" => {
                let code = rest.split_whitespace().next().unwrap_or("");
                ErrorKind::from_code(code)
                    .map(Self::Error)
                    .ok_or_else(|| ReplyParseError::UnknownCode(code.to_string()))
            }
            other => Err(ReplyParseError::UnknownStatus(other.to_string())),
        }
    }
}

impl From<EvalResult<f64>> for Reply {
    fn from(result: EvalResult<f64>) -> Self {
        match result {
            Ok(value) => Self::value(value),
            Err(kind) => Self::error(kind),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(text) => write!(f, "OK {text}"),
            Self::Error(kind) => write!(f, "ERR {} {}", kind.code(), kind.message()),
        }
    }
}

/// Errors that can occur when reading a reply line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyParseError {
    #[error("Empty reply line")]
    Empty,

    #[error("Unknown reply status: {0}")]
    UnknownStatus(String),

    #[error("OK reply without a value")]
    MissingValue,

    #[error("Unknown error code: {0}")]
    UnknownCode(String),
}
