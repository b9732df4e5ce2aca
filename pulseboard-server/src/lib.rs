//! pulseboard-server: HTTP API for the social-media metrics dashboard
//!
//! Serves the latest snapshot of each pre-aggregated metrics table as one
//! JSON payload, a fixed notification feed, and liveness endpoints.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

#[cfg(test)]
mod fixtures;

pub use config::{ConfigError, DatabaseConfig, PulseboardConfig};
pub use db::{PgSnapshotSource, SnapshotError, SnapshotSource};
pub use http::{run_server, ServerConfig};
