use std::time::Duration;

use sqlx::postgres::PgPool;
use tracing::{debug, info, warn};

use super::snapshot_service::snapshot_from_market;
use crate::api::{ApiError, KalshiClient, KalshiMarket};
use crate::db;
use crate::error::AppResult;
use crate::models::{MarketSource, NewSnapshot, TrackedMarket};

/// Markets processed between progress lines
pub const PROGRESS_EVERY: usize = 50;

/// Knobs for a backfill run
#[derive(Debug, Clone, PartialEq)]
pub struct BackfillSettings {
    pub markets_per_cycle: i64,
    pub cycles: u32,
    pub cycle_pause: Duration,
    pub request_delay: Duration,
}

impl Default for BackfillSettings {
    fn default() -> Self {
        Self {
            markets_per_cycle: 100,
            cycles: 5,
            cycle_pause: Duration::from_secs(60),
            request_delay: Duration::from_millis(500),
        }
    }
}

/// Outcome of one pass over the tracked markets
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CycleReport {
    pub markets: usize,
    pub created: usize,
    pub skipped: usize,
    pub total_in_db: i64,
}

/// Whether `index` (1-based) should print a progress line
pub fn is_progress_tick(index: usize) -> bool {
    index > 0 && index % PROGRESS_EVERY == 0
}

/// Whether to pause after `cycle` (1-based) of `cycles`
pub fn pauses_after(cycle: u32, cycles: u32) -> bool {
    cycle < cycles
}

/// Run every cycle, pausing between them but not after the last one
pub async fn run_backfill(
    pool: &PgPool,
    kalshi: &KalshiClient,
    settings: &BackfillSettings,
) -> AppResult<Vec<CycleReport>> {
    let mut reports = Vec::with_capacity(settings.cycles as usize);

    for cycle in 1..=settings.cycles {
        println!("[Cycle {}/{}] Starting...", cycle, settings.cycles);

        let report = run_cycle(pool, kalshi, settings).await?;
        println!("  ✅ Created {} snapshots", report.created);
        println!("  📈 Total snapshots in DB: {}", report.total_in_db);
        info!(
            "Cycle {}/{} done: {} created, {} skipped",
            cycle, settings.cycles, report.created, report.skipped
        );
        reports.push(report);

        if pauses_after(cycle, settings.cycles) {
            println!(
                "  ⏳ Waiting {}s before next cycle...",
                settings.cycle_pause.as_secs()
            );
            tokio::time::sleep(settings.cycle_pause).await;
        }
        println!();
    }

    Ok(reports)
}

/// Snapshot each tracked Kalshi market once
pub async fn run_cycle(
    pool: &PgPool,
    kalshi: &KalshiClient,
    settings: &BackfillSettings,
) -> AppResult<CycleReport> {
    let markets =
        db::markets::get_markets_to_snapshot(pool, MarketSource::Kalshi, settings.markets_per_cycle)
            .await?;
    println!("  📋 Found {} markets to snapshot", markets.len());

    let mut report = CycleReport {
        markets: markets.len(),
        ..CycleReport::default()
    };

    for (i, market) in markets.iter().enumerate() {
        let index = i + 1;
        if is_progress_tick(index) {
            println!("    Progress: {}/{}", index, markets.len());
        }

        if record_snapshot(pool, kalshi, market).await? {
            report.created += 1;
        } else {
            report.skipped += 1;
        }

        tokio::time::sleep(settings.request_delay).await;
    }

    report.total_in_db = db::price_history::count_snapshots(pool).await?;
    Ok(report)
}

/// Fetch one market and store a snapshot.
///
/// Fetch failures are logged and reported as `false`; database errors
/// propagate.
pub async fn record_snapshot(
    pool: &PgPool,
    kalshi: &KalshiClient,
    market: &TrackedMarket,
) -> AppResult<bool> {
    let fetched = kalshi.fetch_market(&market.source_id).await;
    let Some(snapshot) = snapshot_for_fetch(market, fetched) else {
        return Ok(false);
    };

    db::price_history::insert_snapshot(pool, &snapshot).await?;
    debug!(
        "Stored {} yes={:.4} no={:.4}",
        market.source_id, snapshot.yes_price, snapshot.no_price
    );

    Ok(true)
}

/// Snapshot to store for a Kalshi fetch, or `None` when the market is skipped
pub fn snapshot_for_fetch(
    market: &TrackedMarket,
    fetched: Result<Option<KalshiMarket>, ApiError>,
) -> Option<NewSnapshot> {
    match fetched {
        Ok(Some(data)) => Some(snapshot_from_market(market.id, &data)),
        Ok(None) => {
            debug!("No market payload for {}", market.source_id);
            None
        }
        Err(e) => {
            warn!("⚠️  Error fetching {}: {}", market.source_id, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn tracked() -> TrackedMarket {
        TrackedMarket {
            id: Uuid::new_v4(),
            source_id: "KXBTC-25DEC31".to_string(),
            source: "kalshi".to_string(),
        }
    }

    #[test]
    fn test_fetch_error_skips_market() {
        let market = tracked();
        assert!(snapshot_for_fetch(&market, Err(ApiError::NotFound("market".to_string()))).is_none());
        assert!(snapshot_for_fetch(
            &market,
            Err(ApiError::ServerError(502, "Bad Gateway".to_string()))
        )
        .is_none());
        assert!(snapshot_for_fetch(&market, Err(ApiError::RequestError("timeout".to_string()))).is_none());
    }

    #[test]
    fn test_empty_payload_skips_market() {
        assert!(snapshot_for_fetch(&tracked(), Ok(None)).is_none());
    }

    #[test]
    fn test_fetched_market_becomes_snapshot() {
        let market = tracked();
        let data: KalshiMarket = serde_json::from_value(serde_json::json!({
            "ticker": "KXBTC-25DEC31",
            "yes_sub_title": "40¢",
            "no_sub_title": "60¢",
            "volume": 900,
            "volume_24h": 12,
            "liquidity": "300"
        }))
        .unwrap();

        let snapshot = snapshot_for_fetch(&market, Ok(Some(data))).unwrap();
        assert_eq!(snapshot.market_id, market.id);
        assert_eq!(snapshot.yes_price, 0.4);
        assert_eq!(snapshot.no_price, 0.6);
        assert_eq!(snapshot.volume, 900.0);
        assert_eq!(snapshot.liquidity, 300.0);
    }

    #[test]
    fn test_defaults() {
        let settings = BackfillSettings::default();
        assert_eq!(settings.markets_per_cycle, 100);
        assert_eq!(settings.cycles, 5);
        assert_eq!(settings.cycle_pause, Duration::from_secs(60));
        assert_eq!(settings.request_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_progress_every_fifty() {
        let ticks: Vec<usize> = (1..=120).filter(|&i| is_progress_tick(i)).collect();
        assert_eq!(ticks, vec![50, 100]);
        assert!(!is_progress_tick(0));
    }

    #[test]
    fn test_no_pause_after_last_cycle() {
        assert!(pauses_after(1, 3));
        assert!(pauses_after(2, 3));
        assert!(!pauses_after(3, 3));
        assert!(!pauses_after(1, 1));
    }
}
