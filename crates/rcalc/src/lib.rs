//! rcalc Client - connection wrapper for the remote arithmetic protocol
//!
//! This crate provides:
//! - `client` - `CalcClient` for request/reply exchanges and the
//!   interactive stdin relay used by the `rcalc` binary
//! - `error` - `ClientError` and the crate `Result` alias

pub mod client;
pub mod error;

pub use client::{is_quit_line, CalcClient, ClientConfig, RelayEnd};
pub use error::{ClientError, Result};
