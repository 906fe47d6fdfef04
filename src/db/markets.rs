use sqlx::postgres::PgPool;

use crate::models::{MarketSource, TrackedMarket};

/// Status Kalshi reports for open markets
pub const ACTIVE_STATUS: &str = "active";

/// Get the newest active markets of a source, up to `limit`
pub async fn get_markets_to_snapshot(
    pool: &PgPool,
    source: MarketSource,
    limit: i64,
) -> Result<Vec<TrackedMarket>, sqlx::Error> {
    sqlx::query_as::<_, TrackedMarket>(
        r#"
        SELECT m.id, m.source_id, m.source
        FROM markets m
        WHERE m.source = $1
          AND m.status = $2
        ORDER BY m.created_at DESC
        LIMIT $3
        "#,
    )
    .bind(source.as_str())
    .bind(ACTIVE_STATUS)
    .bind(limit)
    .fetch_all(pool)
    .await
}
