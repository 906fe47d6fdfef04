use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upstream exchange a market is mirrored from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSource {
    Polymarket,
    Kalshi,
}

impl MarketSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSource::Polymarket => "polymarket",
            MarketSource::Kalshi => "kalshi",
        }
    }
}

impl fmt::Display for MarketSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market as served by the history API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub id: Uuid,
    #[serde(default)]
    pub source_id: String,
    pub source: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub yes_price: f64,
    #[serde(default)]
    pub no_price: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub volume_24h: f64,
    #[serde(default)]
    pub liquidity: Option<f64>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub close_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Market {
    /// Liquidity worth showing: present and non-zero
    pub fn reported_liquidity(&self) -> Option<f64> {
        self.liquidity.filter(|l| *l != 0.0)
    }
}

/// Row from the `markets` table selected for snapshotting
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrackedMarket {
    pub id: Uuid,
    pub source_id: String,
    pub source: String,
}
