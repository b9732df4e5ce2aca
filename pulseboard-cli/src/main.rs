//! pulseboard - HTTP API for the social-media metrics dashboard
//!
//! Subcommands:
//! - `serve`: run the dashboard API
//! - `check`: run the dashboard query once and print the payload

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "pulseboard",
    author,
    version,
    about = "Serve the latest social-media metrics snapshots to the dashboard UI"
)]
struct Cli {
    /// Path to config file (default: ~/.pulseboard/config.toml if present)
    #[arg(long, short = 'c', global = true, env = "PULSEBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces via OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),

    /// Query the latest snapshots once and print the dashboard payload
    Check(commands::check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let config = commands::load_config(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args, config).await,
        Commands::Check(args) => commands::check::run_check(args, config).await,
    };

    tracing_setup::shutdown_otel();
    result
}
