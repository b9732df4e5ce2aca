//! Response payloads
//!
//! Field names here are the wire contract with the dashboard UI.

use serde::{Deserialize, Serialize};

use crate::db::DashboardSnapshot;

/// `{"data": ...}` envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Flat dashboard payload assembled from the seven snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub total_reach_facebook: Option<i64>,
    pub total_reach_twitter: Option<i64>,
    pub total_reach_instagram: Option<i64>,
    pub engagement_rate: f64,
    pub weekly_growth: f64,
    pub monthly_average: f64,
    pub sentiment_positive: f64,
    pub sentiment_neutral: f64,
    pub sentiment_negative: f64,
    pub opposition_content_total: Option<i64>,
    pub opposition_critical_posts: Option<i64>,
    pub opposition_active_campaigns: Option<i64>,
    pub opposition_response_rate: f64,
    pub performance_index: f64,
    pub average_response_time: f64,
    pub engagement_quality: f64,
    pub top_post_development: Option<i64>,
    pub top_post_infrastructure: Option<i64>,
    pub top_post_youth: Option<i64>,
    pub scheme_rural_development: f64,
    pub scheme_education: f64,
    pub scheme_healthcare: f64,
}

impl From<DashboardSnapshot> for DashboardData {
    fn from(s: DashboardSnapshot) -> Self {
        Self {
            total_reach_facebook: s.reach.facebook_reach,
            total_reach_twitter: s.reach.twitter_reach,
            total_reach_instagram: s.reach.instagram_reach,
            engagement_rate: s.engagement.engagement_rate,
            weekly_growth: s.engagement.weekly_growth,
            monthly_average: s.engagement.monthly_average,
            sentiment_positive: s.sentiment.positive_sentiment,
            sentiment_neutral: s.sentiment.neutral_sentiment,
            sentiment_negative: s.sentiment.negative_sentiment,
            opposition_content_total: s.opposition.total_content,
            opposition_critical_posts: s.opposition.critical_posts,
            opposition_active_campaigns: s.opposition.active_campaigns,
            opposition_response_rate: s.opposition.response_rate,
            performance_index: s.performance.performance_index,
            average_response_time: s.performance.average_response_time,
            engagement_quality: s.performance.engagement_quality,
            top_post_development: s.top_posts.development_posts,
            top_post_infrastructure: s.top_posts.infrastructure_posts,
            top_post_youth: s.top_posts.youth_posts,
            scheme_rural_development: s.schemes.rural_development,
            scheme_education: s.schemes.education,
            scheme_healthcare: s.schemes.healthcare,
        }
    }
}

/// Notification shown in the dashboard sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub title: String,
    pub message: String,
    /// Human-relative time, e.g. "2 hours ago"
    pub time: String,
}

/// Liveness payload
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
