//! rcalc Protocol - Line grammar for remote arithmetic
//!
//! Each request is one text line, in prefix form (`ADD 2 3`) or infix
//! form (`2 + 3`), or the literal `QUIT`. Each accepted line gets exactly
//! one reply line: `OK <number>` or `ERR <code> <message>`.

pub mod literal;
pub mod parse;
pub mod reply;
pub mod sanitize;

pub use literal::parse_literal;
pub use parse::{parse_request, ParseError};
pub use reply::{Reply, ReplyParseError};
pub use sanitize::{is_space, sanitize};

/// Default TCP port for the server.
pub const DEFAULT_PORT: u16 = 5050;

/// Default bound on a single line, terminator included.
pub const MAX_LINE_LENGTH: usize = 1024;

/// Keyword that ends a session.
pub const QUIT: &str = "QUIT";
