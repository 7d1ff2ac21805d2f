//! TCP server for the rcalc daemon.
//!
//! The server:
//! - Listens on a TCP socket for client connections
//! - Spawns a SessionHandler task for each client
//! - Tracks session tasks in a `JoinSet` and logs how each one ended
//! - Stops accepting on CancellationToken, then waits for in-flight
//!   sessions to finish on their own
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   CalcServer    │
//! │                 │
//! │   TcpListener   │
//! └───────┬─────────┘
//!         │ accept()
//!         ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │ SessionHandler  │────▶│ rcalc-protocol  │
//! │   (per client)  │     │ parse / reply   │
//! └─────────────────┘     └─────────────────┘
//! ```
//!
//! # Panic-Free Guarantees
//!
//! This module follows the panic-free policy:
//! - No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, `todo!()`
//! - All fallible operations use `?`, pattern matching, or `unwrap_or`
//! - Server errors are logged and allow continued operation

mod session;

pub use session::{ConnectionError, SessionEnd, SessionHandler, SessionLimits, SessionStats};

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::{ConfigError, ServerConfig};

/// Result of one finished session task.
type SessionOutcome = (u64, SocketAddr, SessionEnd);

/// TCP server for the rcalc daemon.
///
/// Owns the listening socket. Sessions share no state with each other or
/// with the server; the cancellation token is only observed here.
pub struct CalcServer {
    /// Bound listener
    listener: TcpListener,

    /// Limits handed to every session
    limits: SessionLimits,

    /// Cancellation token for graceful shutdown
    cancel_token: CancellationToken,

    /// Connection counter for numbering sessions in logs
    connection_counter: u64,
}

impl CalcServer {
    /// Binds the listening socket.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated server configuration
    /// * `cancel_token` - Token for graceful shutdown
    pub async fn bind(
        config: &ServerConfig,
        cancel_token: CancellationToken,
    ) -> Result<Self, ServerError> {
        config.validate()?;

        let addr = config.socket_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::SocketSetup {
                addr,
                error: e.to_string(),
            })?;

        Ok(Self::from_listener(listener, config.session_limits(), cancel_token))
    }

    /// Wraps an already bound listener.
    ///
    /// Useful when the caller wants an ephemeral port (`127.0.0.1:0`).
    pub fn from_listener(
        listener: TcpListener,
        limits: SessionLimits,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            listener,
            limits,
            cancel_token,
            connection_counter: 0,
        }
    }

    /// Returns the address the listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        self.listener
            .local_addr()
            .map_err(|e| ServerError::LocalAddr(e.to_string()))
    }

    /// Runs the server.
    ///
    /// Accepts connections until the cancellation token is triggered, then
    /// closes the listener and waits for active sessions to end.
    pub async fn run(mut self) -> Result<(), ServerError> {
        let local_addr = self.local_addr()?;
        info!(addr = %local_addr, "Server listening");

        let mut sessions: JoinSet<SessionOutcome> = JoinSet::new();

        loop {
            tokio::select! {
                // Check for cancellation
                _ = self.cancel_token.cancelled() => {
                    info!("Server shutdown requested");
                    break;
                }

                // Accept new connection
                result = self.listener.accept() => {
                    match result {
                        Ok((stream, peer)) => {
                            let connection_number = self.connection_counter;
                            self.connection_counter = self.connection_counter.wrapping_add(1);
                            self.handle_connection(&mut sessions, stream, peer, connection_number);
                        }
                        Err(e) => {
                            error!(error = %e, "Failed to accept connection");
                            // Continue accepting other connections
                        }
                    }
                }

                // Reap finished sessions
                Some(joined) = sessions.join_next(), if !sessions.is_empty() => {
                    log_session_outcome(joined);
                }
            }
        }

        // Stop accepting before draining
        drop(self.listener);

        if !sessions.is_empty() {
            info!(active = sessions.len(), "Waiting for active sessions to finish");
        }
        while let Some(joined) = sessions.join_next().await {
            log_session_outcome(joined);
        }

        info!("Server stopped");
        Ok(())
    }

    /// Spawns a session task for a new client connection.
    fn handle_connection(
        &self,
        sessions: &mut JoinSet<SessionOutcome>,
        stream: TcpStream,
        peer: SocketAddr,
        connection_number: u64,
    ) {
        info!(connection = connection_number, peer = %peer, "Client connected");

        if let Err(e) = stream.set_nodelay(true) {
            debug!(connection = connection_number, error = %e, "Failed to set TCP_NODELAY");
        }

        let (reader, writer) = stream.into_split();
        let handler = SessionHandler::new(reader, writer, self.limits, connection_number);

        sessions.spawn(async move {
            let end = handler.run().await;
            (connection_number, peer, end)
        });
    }
}

/// Logs how a session task ended.
fn log_session_outcome(joined: Result<SessionOutcome, JoinError>) {
    match joined {
        Ok((connection, peer, end)) if end.is_clean() => {
            info!(connection, peer = %peer, end = ?end, "Client disconnected");
        }
        Ok((connection, peer, end)) => {
            warn!(connection, peer = %peer, end = ?end, "Client connection failed");
        }
        Err(e) => {
            error!(error = %e, "Session task failed");
        }
    }
}

/// Errors that can occur in server operations.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {error}")]
    SocketSetup { addr: SocketAddr, error: String },

    #[error("Failed to read local address: {0}")]
    LocalAddr(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let err = ServerError::SocketSetup {
            addr: "127.0.0.1:5050".parse().unwrap(),
            error: "address in use".to_string(),
        };
        assert!(err.to_string().contains("127.0.0.1:5050"));
        assert!(err.to_string().contains("address in use"));
    }

    #[tokio::test]
    async fn test_bind_rejects_invalid_config() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = CalcServer::bind(&config, CancellationToken::new()).await;
        assert!(matches!(result, Err(ServerError::Config(_))));
    }
}
