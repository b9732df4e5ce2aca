//! Latest-row queries against the metrics tables
//!
//! Every table is read the same way: the single row with the greatest
//! `date_recorded`. Decimal columns are cast to float8 and count columns to
//! bigint in SQL so decoding never depends on the writer's exact column types.
//!
//! Count columns and `date_recorded` are nullable: a NULL count is served as
//! JSON `null`, and a NULL timestamp sorts first under `DESC` and is served
//! like any other row. A NULL decimal still fails the request.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgConnection, PgRow};
use sqlx::{ConnectOptions, Connection, FromRow};

/// Snapshot query errors
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("database connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("no rows in table '{table}'")]
    Empty { table: &'static str },

    #[error("query on '{table}' failed: {source}")]
    Query {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Latest row of `total_reach`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ReachSnapshot {
    pub facebook_reach: Option<i64>,
    pub twitter_reach: Option<i64>,
    pub instagram_reach: Option<i64>,
    pub date_recorded: Option<DateTime<Utc>>,
}

/// Latest row of `engagement_metrics`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct EngagementSnapshot {
    pub engagement_rate: f64,
    pub weekly_growth: f64,
    pub monthly_average: f64,
    pub date_recorded: Option<DateTime<Utc>>,
}

/// Latest row of `sentiment_analysis`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SentimentSnapshot {
    pub positive_sentiment: f64,
    pub neutral_sentiment: f64,
    pub negative_sentiment: f64,
    pub date_recorded: Option<DateTime<Utc>>,
}

/// Latest row of `opposition_tracking`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct OppositionSnapshot {
    pub total_content: Option<i64>,
    pub critical_posts: Option<i64>,
    pub active_campaigns: Option<i64>,
    pub response_rate: f64,
    pub date_recorded: Option<DateTime<Utc>>,
}

/// Latest row of `performance_metrics`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PerformanceSnapshot {
    pub performance_index: f64,
    pub average_response_time: f64,
    pub engagement_quality: f64,
    pub date_recorded: Option<DateTime<Utc>>,
}

/// Latest row of `top_posts`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TopPostsSnapshot {
    pub development_posts: Option<i64>,
    pub infrastructure_posts: Option<i64>,
    pub youth_posts: Option<i64>,
    pub date_recorded: Option<DateTime<Utc>>,
}

/// Latest row of `scheme_metrics`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SchemeSnapshot {
    pub rural_development: f64,
    pub education: f64,
    pub healthcare: f64,
    pub date_recorded: Option<DateTime<Utc>>,
}

/// The seven latest snapshots, one per metrics table.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub reach: ReachSnapshot,
    pub engagement: EngagementSnapshot,
    pub sentiment: SentimentSnapshot,
    pub opposition: OppositionSnapshot,
    pub performance: PerformanceSnapshot,
    pub top_posts: TopPostsSnapshot,
    pub schemes: SchemeSnapshot,
}

/// Source of dashboard snapshots.
///
/// Handlers only see this trait; the Postgres implementation is swapped for
/// a fixture in router tests.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn latest(&self) -> Result<DashboardSnapshot, SnapshotError>;
}

const REACH_SQL: &str = r#"
    SELECT
        facebook_reach::bigint AS facebook_reach,
        twitter_reach::bigint AS twitter_reach,
        instagram_reach::bigint AS instagram_reach,
        date_recorded::timestamptz AS date_recorded
    FROM total_reach
    ORDER BY date_recorded DESC
    LIMIT 1
"#;

const ENGAGEMENT_SQL: &str = r#"
    SELECT
        engagement_rate::float8 AS engagement_rate,
        weekly_growth::float8 AS weekly_growth,
        monthly_average::float8 AS monthly_average,
        date_recorded::timestamptz AS date_recorded
    FROM engagement_metrics
    ORDER BY date_recorded DESC
    LIMIT 1
"#;

const SENTIMENT_SQL: &str = r#"
    SELECT
        positive_sentiment::float8 AS positive_sentiment,
        neutral_sentiment::float8 AS neutral_sentiment,
        negative_sentiment::float8 AS negative_sentiment,
        date_recorded::timestamptz AS date_recorded
    FROM sentiment_analysis
    ORDER BY date_recorded DESC
    LIMIT 1
"#;

const OPPOSITION_SQL: &str = r#"
    SELECT
        total_content::bigint AS total_content,
        critical_posts::bigint AS critical_posts,
        active_campaigns::bigint AS active_campaigns,
        response_rate::float8 AS response_rate,
        date_recorded::timestamptz AS date_recorded
    FROM opposition_tracking
    ORDER BY date_recorded DESC
    LIMIT 1
"#;

const PERFORMANCE_SQL: &str = r#"
    SELECT
        performance_index::float8 AS performance_index,
        average_response_time::float8 AS average_response_time,
        engagement_quality::float8 AS engagement_quality,
        date_recorded::timestamptz AS date_recorded
    FROM performance_metrics
    ORDER BY date_recorded DESC
    LIMIT 1
"#;

const TOP_POSTS_SQL: &str = r#"
    SELECT
        development_posts::bigint AS development_posts,
        infrastructure_posts::bigint AS infrastructure_posts,
        youth_posts::bigint AS youth_posts,
        date_recorded::timestamptz AS date_recorded
    FROM top_posts
    ORDER BY date_recorded DESC
    LIMIT 1
"#;

const SCHEME_SQL: &str = r#"
    SELECT
        rural_development::float8 AS rural_development,
        education::float8 AS education,
        healthcare::float8 AS healthcare,
        date_recorded::timestamptz AS date_recorded
    FROM scheme_metrics
    ORDER BY date_recorded DESC
    LIMIT 1
"#;

/// Fetch the latest row of `table` using `sql`.
async fn fetch_latest<T>(
    conn: &mut PgConnection,
    table: &'static str,
    sql: &'static str,
) -> Result<T, SnapshotError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    sqlx::query_as::<_, T>(sql)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|source| SnapshotError::Query { table, source })?
        .ok_or(SnapshotError::Empty { table })
}

/// Read all seven snapshots over one connection, in a fixed order.
pub async fn fetch_dashboard(conn: &mut PgConnection) -> Result<DashboardSnapshot, SnapshotError> {
    Ok(DashboardSnapshot {
        reach: fetch_latest(conn, "total_reach", REACH_SQL).await?,
        engagement: fetch_latest(conn, "engagement_metrics", ENGAGEMENT_SQL).await?,
        sentiment: fetch_latest(conn, "sentiment_analysis", SENTIMENT_SQL).await?,
        opposition: fetch_latest(conn, "opposition_tracking", OPPOSITION_SQL).await?,
        performance: fetch_latest(conn, "performance_metrics", PERFORMANCE_SQL).await?,
        top_posts: fetch_latest(conn, "top_posts", TOP_POSTS_SQL).await?,
        schemes: fetch_latest(conn, "scheme_metrics", SCHEME_SQL).await?,
    })
}

/// Postgres-backed snapshot source.
///
/// Opens a fresh connection per call and closes it before returning; there is
/// no pool.
#[derive(Debug, Clone)]
pub struct PgSnapshotSource {
    options: PgConnectOptions,
}

impl PgSnapshotSource {
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl SnapshotSource for PgSnapshotSource {
    async fn latest(&self) -> Result<DashboardSnapshot, SnapshotError> {
        let mut conn = self
            .options
            .connect()
            .await
            .map_err(SnapshotError::Connect)?;

        // On error the connection is dropped, which closes the socket.
        let snapshot = fetch_dashboard(&mut conn).await?;

        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "failed to close database connection cleanly");
        }

        tracing::debug!(
            reach_at = ?snapshot.reach.date_recorded,
            schemes_at = ?snapshot.schemes.date_recorded,
            "dashboard snapshot loaded"
        );

        Ok(snapshot)
    }
}
