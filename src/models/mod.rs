//! Data models shared by the API clients, database layer and renderers
//!
//! `Market` and `Snapshot` mirror the history API payloads; `TrackedMarket`,
//! `NewSnapshot` and `HistoryStats` map to `markets`/`price_history` rows.

pub mod chart;
pub mod market;
pub mod snapshot;

// Re-export commonly used types for convenience
pub use chart::{ChartPoint, ChartSeries};
pub use market::{Market, MarketSource, TrackedMarket};
pub use snapshot::{HistoryStats, NewSnapshot, Snapshot};
