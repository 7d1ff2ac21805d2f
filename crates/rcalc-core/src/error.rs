//! Wire-level error taxonomy following panic-free policy.

use thiserror::Error;

/// Errors reported to the peer in an `ERR <code> <message>` reply.
///
/// Every kind is recoverable: the session keeps reading after the reply.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or unparseable request line
    #[error("invalid input")]
    InvalidInput,

    /// Well-formed division with a zero divisor
    #[error("division by zero")]
    DivisionByZero,

    /// Execution reached a request with no defined arithmetic
    #[error("internal error")]
    InternalError,
}

impl ErrorKind {
    /// Returns the machine-readable code used on the wire.
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidInput => "EINV",
            Self::DivisionByZero => "EZDV",
            Self::InternalError => "ESRV",
        }
    }

    /// Returns the fixed short message sent after the code.
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::DivisionByZero => "division_by_zero",
            Self::InternalError => "internal_error",
        }
    }

    /// Parses an error kind from its wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EINV" => Some(Self::InvalidInput),
            "EZDV" => Some(Self::DivisionByZero),
            "ESRV" => Some(Self::InternalError),
            _ => None,
        }
    }
}

/// Result type for request evaluation.
pub type EvalResult<T> = Result<T, ErrorKind>;
