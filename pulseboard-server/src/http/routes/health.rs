//! Liveness endpoints
//!
//! Both are constant and never touch the database, so they stay green while
//! Postgres is down.

use axum::{routing::get, Json, Router};

use crate::models::StatusResponse;

/// GET /
async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online".to_string(),
    })
}

/// GET /health
async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "healthy".to_string(),
    })
}

/// Liveness routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}
