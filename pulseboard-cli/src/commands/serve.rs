//! HTTP server command
//!
//! Runs the dashboard API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pulseboard_server::http::{run_server, ServerConfig};
use pulseboard_server::{PgSnapshotSource, PulseboardConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides config; default: 127.0.0.1:8000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: PulseboardConfig) -> Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }

    let options = config
        .database
        .connect_options()
        .context("Invalid database configuration")?;

    tracing::info!(
        bind = %config.server.bind,
        database = %config.database.describe(),
        "Starting pulseboard server"
    );

    let server_config = ServerConfig {
        bind_addr: config.server.bind,
    };

    // Run server (blocks until shutdown)
    run_server(Arc::new(PgSnapshotSource::new(options)), server_config)
        .await
        .context("Server error")?;

    Ok(())
}
