//! Parsed requests and their evaluation.

use std::fmt;

use crate::error::{ErrorKind, EvalResult};
use crate::operation::Operation;

/// A successfully parsed request line.
///
/// `Quit` is the session-termination sentinel and never reaches arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    /// Client asked to end the session
    Quit,

    /// Binary arithmetic on two operands
    Compute { op: Operation, a: f64, b: f64 },
}

impl Request {
    /// Creates a compute request.
    pub const fn compute(op: Operation, a: f64, b: f64) -> Self {
        Self::Compute { op, a, b }
    }

    /// Validates domain constraints and executes the request.
    ///
    /// Division is rejected only when the divisor is exactly zero (either
    /// sign). Every other input, including infinities and NaN, follows plain
    /// IEEE-754 arithmetic. `Quit` has no arithmetic and yields
    /// [`ErrorKind::InternalError`].
    pub fn evaluate(&self) -> EvalResult<f64> {
        match *self {
            Self::Quit => Err(ErrorKind::InternalError),
            Self::Compute {
                op: Operation::Divide,
                b,
                ..
            } if b == 0.0 => Err(ErrorKind::DivisionByZero),
            Self::Compute { op, a, b } => Ok(op.apply(a, b)),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => write!(f, "QUIT"),
            Self::Compute { op, a, b } => write!(f, "{op} {a} {b}"),
        }
    }
}
