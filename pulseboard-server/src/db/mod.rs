//! Database layer - read-only access to the externally owned metrics tables
//!
//! - One connection per dashboard request, no pool
//! - One `SELECT ... ORDER BY date_recorded DESC LIMIT 1` per table
//! - Never writes

pub mod snapshots;

pub use snapshots::{
    fetch_dashboard, DashboardSnapshot, EngagementSnapshot, OppositionSnapshot,
    PerformanceSnapshot, PgSnapshotSource, ReachSnapshot, SchemeSnapshot, SentimentSnapshot,
    SnapshotError, SnapshotSource, TopPostsSnapshot,
};
