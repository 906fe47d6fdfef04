use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded observation of a market, as served by the history API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub market_id: Uuid,
    pub yes_price: f64,
    pub no_price: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub volume_24h: f64,
    #[serde(default)]
    pub liquidity: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

/// Snapshot about to be inserted; `recorded_at` is assigned by the database
#[derive(Debug, Clone, PartialEq)]
pub struct NewSnapshot {
    pub market_id: Uuid,
    pub yes_price: f64,
    pub no_price: f64,
    pub volume: f64,
    pub volume_24h: f64,
    pub liquidity: f64,
}

/// Aggregate figures over the whole `price_history` table
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct HistoryStats {
    pub markets_with_history: i64,
    pub total_snapshots: i64,
    pub avg_snapshots_per_market: Option<f64>,
}
