//! rcalc Daemon - remote arithmetic server
//!
//! Listens on TCP and answers one reply line per request line.
//!
//! # Usage
//!
//! ```bash
//! # Listen on the default port (5050) on all interfaces
//! rcalcd
//!
//! # Listen on a specific port, loopback only
//! rcalcd 6060 --bind 127.0.0.1
//!
//! # Use an explicit config file
//! rcalcd --config ./rcalcd.toml
//! ```

use std::net::IpAddr;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rcalcd::{CalcServer, ServerConfig};

/// rcalc daemon - remote arithmetic over TCP
#[derive(Parser, Debug)]
#[command(name = "rcalcd", version, about)]
struct Args {
    /// TCP port to listen on (overrides the config file)
    port: Option<u16>,

    /// Address to bind (overrides the config file)
    #[arg(short, long)]
    bind: Option<IpAddr>,

    /// Config file (default: <config dir>/rcalc/rcalcd.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    /// Builds the effective configuration: file values, then CLI overrides.
    fn server_config(&self) -> Result<ServerConfig> {
        let mut config =
            ServerConfig::load(self.config.as_deref()).context("Failed to load configuration")?;

        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(bind) = self.bind {
            config.bind = bind;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// `RUST_LOG` plus the default level for the crates that log.
fn log_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env().add_directive("rcalcd=info".parse()?))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter()?)
        .with_writer(std::io::stderr)
        .init();

    let config = args.server_config()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = process::id(),
        "rcalc daemon starting"
    );

    let cancel_token = CancellationToken::new();

    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        if let Err(e) = wait_for_shutdown_signal().await {
            error!(error = %e, "Error waiting for shutdown signal");
        }
        info!("Shutdown signal received");
        shutdown_token.cancel();
    });

    let server = CalcServer::bind(&config, cancel_token)
        .await
        .context("Failed to start server")?;

    if let Err(e) = server.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("rcalc daemon stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigquit = signal(SignalKind::quit())?;

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT");
            }
            _ = sigquit.recv() => {
                info!("Received SIGQUIT");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        info!("Received Ctrl+C");
    }

    Ok(())
}
