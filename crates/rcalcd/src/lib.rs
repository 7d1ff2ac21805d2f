//! rcalc Daemon - TCP server for the remote arithmetic protocol
//!
//! This crate provides the server side of the protocol:
//! - `config` - Server configuration (defaults, TOML file, overrides)
//! - `server` - TCP acceptor and per-connection session handler
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        rcalcd                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  ┌─────────────────┐  accept()  ┌────────────────────────┐  │
//! │  │   CalcServer    │───────────▶│    SessionHandler      │  │
//! │  │  (TcpListener)  │  spawn     │  (one task per client) │  │
//! │  └────────┬────────┘            └───────────┬────────────┘  │
//! │           │                                 │               │
//! │           │ JoinSet                         │ read → parse  │
//! │           ▼                                 ▼ → eval → reply│
//! │  ┌─────────────────┐            ┌────────────────────────┐  │
//! │  │ CancellationTok │            │     rcalc-protocol     │  │
//! │  │ (stops accepts) │            │   (grammar + replies)  │  │
//! │  └─────────────────┘            └────────────────────────┘  │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Panic-Free Guarantees
//!
//! All production code in this crate follows the panic-free policy:
//! - No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, `todo!()`
//! - All fallible operations return `Result` or `Option`
//! - A failing session never affects other sessions

pub mod config;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use server::{CalcServer, ServerError};
