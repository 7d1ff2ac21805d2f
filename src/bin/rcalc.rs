//! rcalc - interactive client for rcalcd
//!
//! Reads request lines from stdin, sends each to the server, and prints
//! the reply line to stdout.
//!
//! # Usage
//!
//! ```bash
//! rcalc 127.0.0.1 5050
//! echo "ADD 2 3" | rcalc localhost 5050
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{stdin, stdout, BufReader};
use tracing_subscriber::EnvFilter;

use rcalc_client::{CalcClient, ClientConfig, RelayEnd};

/// rcalc - remote arithmetic client
#[derive(Parser, Debug)]
#[command(name = "rcalc", version, about)]
struct Args {
    /// Server host name or IP address
    host: String,

    /// Server TCP port
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rcalc_client=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::new(&args.host, args.port);
    let client = CalcClient::connect(&config)
        .await
        .with_context(|| format!("Could not reach rcalcd at {}", config.addr))?;

    eprintln!("Connected to {}:{}", args.host, args.port);
    eprintln!("Type ADD|SUB|MUL|DIV A B, A +|-|*|/ B, or QUIT");

    let end = client
        .run_interactive(BufReader::new(stdin()), stdout())
        .await
        .context("Connection failed")?;

    if end == RelayEnd::ServerClosed {
        eprintln!("Server closed the connection");
    }

    Ok(())
}
