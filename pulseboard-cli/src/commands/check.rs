//! One-shot dashboard query
//!
//! Runs the same queries as `GET /api/dashboard` and prints the payload, so
//! credentials and table population can be verified without a server.

use anyhow::{Context, Result};
use clap::Parser;
use pulseboard_server::models::{DashboardData, DataEnvelope};
use pulseboard_server::{PgSnapshotSource, PulseboardConfig, SnapshotSource};

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

/// Query the latest snapshots once and print them
pub async fn run_check(args: CheckArgs, mut config: PulseboardConfig) -> Result<()> {
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }

    let options = config
        .database
        .connect_options()
        .context("Invalid database configuration")?;

    let snapshot = PgSnapshotSource::new(options)
        .latest()
        .await
        .with_context(|| format!("Dashboard query against {} failed", config.database.describe()))?;

    let envelope = DataEnvelope::new(DashboardData::from(snapshot));
    let rendered = if args.compact {
        serde_json::to_string(&envelope)?
    } else {
        serde_json::to_string_pretty(&envelope)?
    };
    println!("{}", rendered);

    Ok(())
}
