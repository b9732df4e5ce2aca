//! API error type with IntoResponse
//!
//! Every failure on the dashboard path is a 500 carrying the error text in
//! `detail`, which is what the dashboard client reads.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::SnapshotError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Snapshot query failed (500, logged)
    Snapshot(SnapshotError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match &self {
            Self::Snapshot(e) => {
                tracing::error!("Dashboard query failed: {}", e);
                e.to_string()
            }
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": detail })),
        )
            .into_response()
    }
}

impl From<SnapshotError> for ApiError {
    fn from(e: SnapshotError) -> Self {
        Self::Snapshot(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn empty_table_is_500_with_detail() {
        let err = ApiError::from(SnapshotError::Empty { table: "top_posts" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["detail"], "no rows in table 'top_posts'");
    }

    #[tokio::test]
    async fn connect_failure_is_500() {
        let err = ApiError::from(SnapshotError::Connect(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
