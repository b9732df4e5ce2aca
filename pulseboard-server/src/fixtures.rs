//! Shared test fixtures

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::db::*;

pub fn sample_snapshot() -> DashboardSnapshot {
    let at = Utc.with_ymd_and_hms(2024, 11, 5, 9, 30, 0).unwrap();

    DashboardSnapshot {
        reach: ReachSnapshot {
            facebook_reach: Some(125_400),
            twitter_reach: Some(84_200),
            instagram_reach: Some(61_750),
            date_recorded: Some(at),
        },
        engagement: EngagementSnapshot {
            engagement_rate: 4.75,
            weekly_growth: 1.25,
            monthly_average: 3.9,
            date_recorded: Some(at),
        },
        sentiment: SentimentSnapshot {
            positive_sentiment: 58.5,
            neutral_sentiment: 27.25,
            negative_sentiment: 14.25,
            date_recorded: Some(at),
        },
        opposition: OppositionSnapshot {
            total_content: Some(312),
            critical_posts: Some(27),
            active_campaigns: Some(4),
            response_rate: 87.5,
            date_recorded: Some(at),
        },
        performance: PerformanceSnapshot {
            performance_index: 78.4,
            average_response_time: 2.5,
            engagement_quality: 8.1,
            date_recorded: Some(at),
        },
        top_posts: TopPostsSnapshot {
            development_posts: Some(45),
            infrastructure_posts: Some(32),
            youth_posts: Some(18),
            date_recorded: Some(at),
        },
        schemes: SchemeSnapshot {
            rural_development: 35.5,
            education: 40.25,
            healthcare: 24.25,
            date_recorded: Some(at),
        },
    }
}

/// In-memory source returning a canned result and counting calls.
pub struct FixtureSource {
    result: fn() -> Result<DashboardSnapshot, SnapshotError>,
    calls: Mutex<usize>,
}

impl FixtureSource {
    pub fn ok() -> Self {
        Self {
            result: || Ok(sample_snapshot()),
            calls: Mutex::new(0),
        }
    }

    pub fn empty_table() -> Self {
        Self {
            result: || {
                Err(SnapshotError::Empty {
                    table: "sentiment_analysis",
                })
            },
            calls: Mutex::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            result: || Err(SnapshotError::Connect(sqlx::Error::PoolTimedOut)),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl SnapshotSource for FixtureSource {
    async fn latest(&self) -> Result<DashboardSnapshot, SnapshotError> {
        *self.calls.lock().unwrap() += 1;
        (self.result)()
    }
}
