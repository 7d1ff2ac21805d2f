//! Server connection client for rcalc.
//!
//! This module provides the `CalcClient` which handles:
//! - Connecting to `rcalcd` over TCP with a timeout
//! - Sending request lines and reading bounded reply lines
//! - Relaying an interactive line stream (stdin) to the server
//!
//! **Panic-Free Policy:** This module follows the project's panic-free guidelines.
//! No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, or `todo!()`.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::error::{ClientError, Result};
use rcalc_protocol::{Reply, DEFAULT_PORT, MAX_LINE_LENGTH, QUIT};

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the rcalc client.
///
/// # Example
///
/// ```rust
/// use rcalc_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig {
///     addr: "calc.example.net:6060".to_string(),
///     connect_timeout: Duration::from_secs(2),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server address as `host:port`. Host names are resolved.
    pub addr: String,

    /// Give up connecting after this long.
    pub connect_timeout: Duration,

    /// Maximum bytes accepted in one reply line, terminator included.
    pub max_line_length: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addr: format!("127.0.0.1:{DEFAULT_PORT}"),
            connect_timeout: Duration::from_secs(5),
            max_line_length: MAX_LINE_LENGTH,
        }
    }
}

impl ClientConfig {
    /// Builds a config for `host` and `port` with default limits.
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            addr: format!("{host}:{port}"),
            ..Default::default()
        }
    }
}

// ============================================================================
// Relay Outcome
// ============================================================================

/// How an interactive relay ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayEnd {
    /// The user typed a `QUIT` line.
    Quit,

    /// Input reached end of file; `QUIT` was sent on the user's behalf.
    InputClosed,

    /// The server closed the connection.
    ServerClosed,
}

// ============================================================================
// Calc Client
// ============================================================================

/// Connected rcalc client.
///
/// One request line gets one reply line, except `QUIT` which closes the
/// session without a reply.
pub struct CalcClient {
    /// Buffered reader for reply lines
    reader: BufReader<OwnedReadHalf>,

    /// Write half for request lines
    writer: OwnedWriteHalf,

    /// Resolved server address
    peer: SocketAddr,

    /// Reply line bound
    max_line_length: usize,
}

impl CalcClient {
    /// Connects to the server named in `config`.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let stream = timeout(config.connect_timeout, TcpStream::connect(&config.addr))
            .await
            .map_err(|_| ClientError::ConnectTimeout(config.addr.clone()))?
            .map_err(|e| ClientError::Connect {
                addr: config.addr.clone(),
                error: e.to_string(),
            })?;

        let peer = stream.peer_addr()?;
        info!(peer = %peer, "Connected to server");

        let (reader, writer) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(reader),
            writer,
            peer,
            max_line_length: config.max_line_length,
        })
    }

    /// Returns the server address.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Sends one request line, adding the `\n` terminator if missing.
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Reads one reply line, terminator included.
    ///
    /// Returns `Ok(None)` when the server has closed the connection.
    pub async fn recv_line(&mut self) -> Result<Option<String>> {
        let max = self.max_line_length;
        let mut buf = Vec::new();

        let bytes_read = (&mut self.reader)
            .take(max as u64)
            .read_until(b'\n', &mut buf)
            .await?;

        if bytes_read == 0 {
            return Ok(None);
        }

        if !buf.ends_with(b"\n") && buf.len() >= max {
            return Err(ClientError::ReplyTooLong { max });
        }

        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Sends a request line and waits for its reply line.
    ///
    /// Returns `Ok(None)` if the server closed instead of replying.
    pub async fn request(&mut self, line: &str) -> Result<Option<String>> {
        self.send_line(line).await?;
        self.recv_line().await
    }

    /// Sends a request and parses the reply.
    pub async fn evaluate(&mut self, line: &str) -> Result<Reply> {
        let reply = self.request(line).await?.ok_or(ClientError::ServerClosed)?;
        Ok(Reply::parse(&reply)?)
    }

    /// Ends the session.
    ///
    /// Sends `QUIT` and waits for the server to close its side.
    pub async fn quit(mut self) -> Result<()> {
        self.send_line(QUIT).await?;
        // Drain until close; the server sends nothing after QUIT
        while self.recv_line().await?.is_some() {}
        debug!(peer = %self.peer, "Session closed");
        Ok(())
    }

    /// Relays request lines from `input` and writes each reply to `output`.
    ///
    /// - A line whose first four characters are `QUIT` (any case) is sent
    ///   and the relay ends without waiting for a reply.
    /// - End of input sends `QUIT` and ends the relay.
    /// - A server close ends the relay.
    ///
    /// Reply lines are copied to `output` verbatim.
    pub async fn run_interactive<I, O>(mut self, mut input: I, mut output: O) -> Result<RelayEnd>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();
            if input.read_line(&mut line).await? == 0 {
                debug!("Input closed, sending QUIT");
                self.send_line(QUIT).await?;
                return Ok(RelayEnd::InputClosed);
            }

            self.send_line(&line).await?;

            if is_quit_line(&line) {
                return Ok(RelayEnd::Quit);
            }

            match self.recv_line().await? {
                Some(reply) => {
                    output.write_all(reply.as_bytes()).await?;
                    if !reply.ends_with('\n') {
                        output.write_all(b"\n").await?;
                    }
                    output.flush().await?;
                }
                None => {
                    info!(peer = %self.peer, "Server closed the connection");
                    return Ok(RelayEnd::ServerClosed);
                }
            }
        }
    }
}

/// Returns true if `line` starts with `QUIT`, ignoring case.
///
/// Only the first four characters are compared, so `quitting` counts.
pub fn is_quit_line(line: &str) -> bool {
    line.get(..QUIT.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(QUIT))
}

// ============================================================================
// Tests
// ============================================================================
