//! rcalc Core - Shared arithmetic types
//!
//! This crate provides the domain types shared between the protocol
//! parser, the server (rcalcd) and the client (rcalc).
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

pub mod error;
pub mod format;
pub mod operation;
pub mod request;

// Re-exports for convenience
pub use error::{ErrorKind, EvalResult};
pub use format::format_number;
pub use operation::Operation;
pub use request::Request;
