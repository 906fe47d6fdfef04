use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::api::KalshiClient;
use crate::config::Config;
use crate::db;
use crate::error::{AppError, AppResult};
use crate::models::HistoryStats;
use crate::services::backfill_service::{run_backfill, BackfillSettings, CycleReport};

/// Snapshot active Kalshi markets into `price_history` over several cycles
#[derive(Debug, Parser)]
#[command(name = "pm-backfill", version)]
pub struct BackfillArgs {
    /// Markets to snapshot per cycle
    #[arg(default_value_t = 100, value_parser = clap::value_parser!(i64).range(1..))]
    pub num_markets: i64,

    /// Number of cycles to run
    #[arg(default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub num_cycles: u32,

    /// Seconds to wait between cycles
    #[arg(default_value_t = 60)]
    pub sleep_seconds: u64,

    /// Delay after each Kalshi request, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub request_delay_ms: u64,

    /// Kalshi API base URL (defaults to KALSHI_API_URL)
    #[arg(long)]
    pub kalshi_url: Option<String>,

    /// Postgres connection string (defaults to DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

impl BackfillArgs {
    pub fn settings(&self) -> BackfillSettings {
        BackfillSettings {
            markets_per_cycle: self.num_markets,
            cycles: self.num_cycles,
            cycle_pause: Duration::from_secs(self.sleep_seconds),
            request_delay: Duration::from_millis(self.request_delay_ms),
        }
    }
}

pub async fn execute(args: BackfillArgs) -> AppResult<()> {
    let config = Config::from_env()?.with_database_url(args.database_url.clone());
    let settings = args.settings();

    print!("{}", render_banner(&settings));

    let database_url = config.require_database_url()?;
    let kalshi_url = args
        .kalshi_url
        .as_deref()
        .unwrap_or(&config.kalshi_api_url);

    info!("Connecting to database...");
    let pool = db::init_db(database_url, config.db_max_connections).await?;
    let kalshi = KalshiClient::with_base_url(kalshi_url, config.http_timeout)?;
    info!("Using Kalshi API at {}", kalshi.base_url());

    let reports = run_backfill(&pool, &kalshi, &settings).await?;
    let stats = db::price_history::history_stats(&pool).await?;

    print!("{}", render_summary(&reports, &stats));
    pool.close().await;

    Ok(())
}

/// Title and run parameters, printed before the database URL is checked
pub fn render_banner(settings: &BackfillSettings) -> String {
    format!(
        "🔄 Backfill Price History Snapshots\n{}\n\n\
         📊 Markets per cycle: {}\n\
         🔁 Number of cycles: {}\n\
         ⏱️  Sleep between cycles: {}s\n\n",
        "=".repeat(80),
        settings.markets_per_cycle,
        settings.cycles,
        settings.cycle_pause.as_secs()
    )
}

/// Line printed when the run stops on an error
pub fn failure_line(err: &AppError) -> String {
    format!("❌ {}", err)
}

/// Completion banner and final table statistics
pub fn render_summary(reports: &[CycleReport], stats: &HistoryStats) -> String {
    let created: usize = reports.iter().map(|r| r.created).sum();
    let skipped: usize = reports.iter().map(|r| r.skipped).sum();

    let mut out = String::new();
    out.push_str(&"=".repeat(80));
    out.push('\n');
    out.push_str("✅ Backfill complete!\n");
    out.push_str(&format!(
        "   {} snapshots created, {} markets skipped over {} cycles\n\n",
        created,
        skipped,
        reports.len()
    ));
    out.push_str("📊 Final Statistics:\n");
    out.push_str(&format!("  Markets with history: {}\n", stats.markets_with_history));
    out.push_str(&format!("  Total snapshots: {}\n", stats.total_snapshots));
    out.push_str(&format!(
        "  Avg snapshots/market: {:.1}\n",
        stats.avg_snapshots_per_market.unwrap_or(0.0)
    ));
    out
}
