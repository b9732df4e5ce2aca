//! Dashboard endpoint
//!
//! GET /api/dashboard - latest row of each metrics table, flattened into one
//! payload. Any failing table fails the whole response; there are no partial
//! payloads.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{DashboardData, DataEnvelope};

/// GET /api/dashboard
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataEnvelope<DashboardData>>, ApiError> {
    let snapshot = state.snapshots.latest().await?;
    Ok(Json(DataEnvelope::new(DashboardData::from(snapshot))))
}

/// Dashboard routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/dashboard", get(get_dashboard))
}
