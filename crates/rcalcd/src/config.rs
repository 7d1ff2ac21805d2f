//! Server configuration.
//!
//! Values come from, in increasing priority:
//! 1. built-in defaults
//! 2. a TOML file (`--config`, or `<config dir>/rcalc/rcalcd.toml` when present)
//! 3. command line overrides applied by the binary
//!
//! # Example file
//!
//! ```toml
//! bind = "127.0.0.1"
//! port = 6060
//! max_line_length = 2048
//! idle_timeout_secs = 300
//! ```

use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use rcalc_protocol::{DEFAULT_PORT, MAX_LINE_LENGTH};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::server::SessionLimits;

/// Default write timeout in seconds.
const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 10;

/// Smallest usable line bound: one character plus terminator.
const MIN_LINE_LENGTH: usize = 2;

/// Configuration for the rcalc daemon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: IpAddr,

    /// TCP port to listen on.
    pub port: u16,

    /// Maximum bytes in one request line, terminator included.
    pub max_line_length: usize,

    /// Close sessions idle for this long. `None` waits forever.
    pub idle_timeout_secs: Option<u64>,

    /// Give up on a reply write after this long.
    pub write_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_line_length: MAX_LINE_LENGTH,
            idle_timeout_secs: None,
            write_timeout_secs: DEFAULT_WRITE_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Returns the default config file location, if a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rcalc").join("rcalcd.toml"))
    }

    /// Loads configuration.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when the file is present, otherwise built-in defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reads and validates a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Checks field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                field: "port",
                reason: "must be between 1 and 65535".to_string(),
            });
        }

        if self.max_line_length < MIN_LINE_LENGTH {
            return Err(ConfigError::Invalid {
                field: "max_line_length",
                reason: format!("must be at least {MIN_LINE_LENGTH}"),
            });
        }

        if self.write_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "write_timeout_secs",
                reason: "must be positive".to_string(),
            });
        }

        if self.idle_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                field: "idle_timeout_secs",
                reason: "must be positive (omit to disable)".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the listen address.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    /// Returns the per-session limits derived from this config.
    pub fn session_limits(&self) -> SessionLimits {
        SessionLimits {
            max_line_length: self.max_line_length,
            idle_timeout: self.idle_timeout_secs.map(Duration::from_secs),
            write_timeout: Duration::from_secs(self.write_timeout_secs),
        }
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {error}")]
    Read { path: PathBuf, error: String },

    #[error("Failed to parse config {path}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
