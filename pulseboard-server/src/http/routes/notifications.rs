//! Notifications endpoint
//!
//! GET /api/notifications - fixed list, no database access

use axum::{routing::get, Json, Router};

use crate::models::Notification;

const NOTIFICATIONS: [(u32, &str, &str, &str); 3] = [
    (
        1,
        "New Campaign",
        "Election campaign started in Region A",
        "2 hours ago",
    ),
    (
        2,
        "Engagement Spike",
        "Unusual activity detected in social media",
        "5 hours ago",
    ),
    (
        3,
        "Report Ready",
        "Weekly analytics report is available",
        "1 day ago",
    ),
];

/// The fixed notification feed
pub fn notifications() -> Vec<Notification> {
    NOTIFICATIONS
        .iter()
        .map(|&(id, title, message, time)| Notification {
            id,
            title: title.to_string(),
            message: message.to_string(),
            time: time.to_string(),
        })
        .collect()
}

/// GET /api/notifications
async fn list_notifications() -> Json<Vec<Notification>> {
    Json(notifications())
}

/// Notification routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/api/notifications", get(list_notifications))
}
