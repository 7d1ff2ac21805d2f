//! Error types for the rcalc client.
//!
//! **Panic-Free Policy:** This module follows the project's panic-free guidelines.
//! No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, or `todo!()`.

use std::io;

use rcalc_protocol::ReplyParseError;
use thiserror::Error;

// ============================================================================
// Client Error Type
// ============================================================================

/// Client errors.
///
/// Connection errors suggest checking that `rcalcd` is running and
/// reachable. Protocol errors mean the peer is not speaking the rcalc
/// line protocol.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Failed to connect to the server.
    #[error("Failed to connect to {addr}: {error}")]
    Connect { addr: String, error: String },

    /// The connection attempt did not finish in time.
    #[error("Timed out connecting to {0}")]
    ConnectTimeout(String),

    /// The server closed the connection before replying.
    #[error("Server closed the connection")]
    ServerClosed,

    /// The server sent a line longer than the configured bound.
    #[error("Reply line too long (max: {max} bytes)")]
    ReplyTooLong { max: usize },

    /// A reply line did not follow the protocol.
    #[error("Malformed reply: {0}")]
    Reply(#[from] ReplyParseError),

    /// I/O error passthrough.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Convenience Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

// ============================================================================
// Tests
// ============================================================================
