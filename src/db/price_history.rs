use sqlx::postgres::PgPool;

use crate::models::{HistoryStats, NewSnapshot};

/// Append a snapshot; `recorded_at` is stamped by the database
pub async fn insert_snapshot(pool: &PgPool, snapshot: &NewSnapshot) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO price_history
            (market_id, yes_price, no_price, volume, volume_24h, liquidity, recorded_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW())
        "#,
    )
    .bind(snapshot.market_id)
    .bind(snapshot.yes_price)
    .bind(snapshot.no_price)
    .bind(snapshot.volume)
    .bind(snapshot.volume_24h)
    .bind(snapshot.liquidity)
    .execute(pool)
    .await?;

    Ok(())
}

/// Total number of rows in `price_history`
pub async fn count_snapshots(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM price_history")
        .fetch_one(pool)
        .await
}

/// Markets with history, total snapshots and the per-market average
pub async fn history_stats(pool: &PgPool) -> Result<HistoryStats, sqlx::Error> {
    sqlx::query_as::<_, HistoryStats>(
        r#"
        SELECT
            COUNT(*) AS markets_with_history,
            COALESCE(SUM(snapshots), 0)::BIGINT AS total_snapshots,
            AVG(snapshots)::FLOAT8 AS avg_snapshots_per_market
        FROM (
            SELECT market_id, COUNT(*) AS snapshots
            FROM price_history
            GROUP BY market_id
        ) per_market
        "#,
    )
    .fetch_one(pool)
    .await
}
