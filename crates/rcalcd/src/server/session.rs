//! Session handler for individual client connections.
//!
//! Each accepted connection gets its own `SessionHandler` that loops:
//!
//! ```text
//! Reading ──line──▶ Parsed ──reply──▶ Responding ──▶ Reading
//!    │                 │
//!    │ peer closed     │ QUIT
//!    │ / I/O error     ▼
//!    └────────────▶ Terminated
//! ```
//!
//! Parse failures and division by zero are answered with an `ERR` line and
//! the loop continues. Only transport problems (read/write failure, an
//! over-long line, timeouts) end a session abnormally, and no reply is
//! attempted after a failed write.
//!
//! # Panic-Free Guarantees
//!
//! This module follows the panic-free policy:
//! - No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, `todo!()`
//! - All fallible operations use `?`, pattern matching, or `unwrap_or`
//! - Connection errors are logged and result in graceful disconnect

use std::time::Duration;

use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter,
};
use tokio::time::timeout;
use tracing::{debug, warn};

use rcalc_core::Request;
use rcalc_protocol::{parse_request, Reply};

use crate::config::ServerConfig;

/// Transport limits applied to one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Maximum bytes in one line, terminator included.
    pub max_line_length: usize,

    /// Close the session after this long without a complete line.
    pub idle_timeout: Option<Duration>,

    /// Give up on a reply write after this long.
    pub write_timeout: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        ServerConfig::default().session_limits()
    }
}

/// Counters kept for the closing log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Reply lines written.
    pub replies: u64,

    /// Of those, `ERR` replies.
    pub errors: u64,
}

/// How a session ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// Client sent `QUIT`
    Quit,

    /// Client closed the connection
    PeerClosed,

    /// Transport failure; the connection is dropped without a reply
    Failed(ConnectionError),
}

impl SessionEnd {
    /// Returns true unless the session ended on a transport failure.
    pub fn is_clean(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Outcome of handling one line.
enum Flow {
    Continue,
    Quit,
}

/// Protocol loop for a single client connection.
///
/// Owns both halves of the connection for its whole lifetime. Generic over
/// the stream type so it runs on TCP halves as well as in-memory pipes.
pub struct SessionHandler<R, W> {
    /// Buffered reader for request lines
    reader: BufReader<R>,

    /// Buffered writer for reply lines
    writer: BufWriter<W>,

    /// Transport limits
    limits: SessionLimits,

    /// Reply counters
    stats: SessionStats,

    /// Acceptor-assigned number, for logs
    connection_number: u64,
}

impl<R, W> SessionHandler<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a new session handler.
    ///
    /// # Arguments
    ///
    /// * `reader` - Read half of the connection
    /// * `writer` - Write half of the connection
    /// * `limits` - Line length and timeout limits
    /// * `connection_number` - Unique number for this connection
    pub fn new(reader: R, writer: W, limits: SessionLimits, connection_number: u64) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer: BufWriter::new(writer),
            limits,
            stats: SessionStats::default(),
            connection_number,
        }
    }

    /// Runs the session until QUIT, peer close, or a transport failure.
    pub async fn run(mut self) -> SessionEnd {
        debug!(connection = self.connection_number, "Session started");

        let end = loop {
            let line = match self.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break SessionEnd::PeerClosed,
                Err(e) => break SessionEnd::Failed(e),
            };

            match self.handle_line(&line).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break SessionEnd::Quit,
                Err(e) => break SessionEnd::Failed(e),
            }
        };

        match &end {
            SessionEnd::Failed(e) => warn!(
                connection = self.connection_number,
                error = %e,
                replies = self.stats.replies,
                "Session terminated"
            ),
            _ => debug!(
                connection = self.connection_number,
                end = ?end,
                replies = self.stats.replies,
                errors = self.stats.errors,
                "Session finished"
            ),
        }

        end
    }

    /// Handles a single request line.
    async fn handle_line(&mut self, line: &str) -> Result<Flow, ConnectionError> {
        let reply = match parse_request(line) {
            Ok(Request::Quit) => {
                debug!(connection = self.connection_number, "Client requested quit");
                return Ok(Flow::Quit);
            }
            Ok(request) => {
                debug!(connection = self.connection_number, %request, "Evaluating request");
                Reply::from(request.evaluate())
            }
            Err(e) => {
                debug!(connection = self.connection_number, error = %e, "Rejected request");
                Reply::error(e.kind())
            }
        };

        self.send_reply(&reply).await?;

        self.stats.replies += 1;
        if !reply.is_ok() {
            self.stats.errors += 1;
        }

        Ok(Flow::Continue)
    }

    /// Reads the next line, honouring the idle timeout.
    ///
    /// Returns `Ok(None)` when the peer closed with nothing pending.
    async fn next_line(&mut self) -> Result<Option<String>, ConnectionError> {
        match self.limits.idle_timeout {
            Some(limit) => timeout(limit, self.read_line())
                .await
                .map_err(|_| ConnectionError::Timeout)?,
            None => self.read_line().await,
        }
    }

    /// Reads up to one `\n`-terminated line, bounded by the line limit.
    ///
    /// A partial line followed by peer close is still returned.
    async fn read_line(&mut self) -> Result<Option<String>, ConnectionError> {
        let max = self.limits.max_line_length;
        let mut buf = Vec::new();

        let bytes_read = (&mut self.reader)
            .take(max as u64)
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| ConnectionError::Io(e.to_string()))?;

        if bytes_read == 0 {
            return Ok(None);
        }

        if !buf.ends_with(b"\n") && buf.len() >= max {
            return Err(ConnectionError::LineTooLong { max });
        }

        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Writes one reply line and flushes it.
    async fn send_reply(&mut self, reply: &Reply) -> Result<(), ConnectionError> {
        let line = reply.to_line();
        let writer = &mut self.writer;

        match timeout(self.limits.write_timeout, async {
            writer.write_all(line.as_bytes()).await?;
            writer.flush().await?;
            Ok::<(), std::io::Error>(())
        })
        .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ConnectionError::Io(e.to_string())),
            Err(_) => Err(ConnectionError::WriteTimeout),
        }
    }
}

/// Errors that end a session.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Read timeout")]
    Timeout,

    #[error("Write timeout")]
    WriteTimeout,

    #[error("Line too long (max: {max} bytes)")]
    LineTooLong { max: usize },
}
