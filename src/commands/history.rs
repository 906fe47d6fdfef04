use clap::Parser;
use tracing::debug;
use uuid::Uuid;

use crate::api::{ApiError, HistoryApiClient, HistoryQuery};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Market, Snapshot};
use crate::services::history_service::{render_footer, render_history, render_market_header};

/// Public deployment of the history API
pub const DEFAULT_API_URL: &str = "https://pm-history-api.onrender.com";

/// Window applied when a sample market is picked
const SAMPLE_WINDOW_HOURS: i64 = 24;

/// Print the recorded price history of a market
#[derive(Debug, Parser)]
#[command(name = "pm-history", version)]
pub struct HistoryArgs {
    /// Market UUID; a high-volume sample market is used when omitted
    pub market_id: Option<Uuid>,

    /// Only include snapshots from the last N hours
    pub hours: Option<i64>,

    /// Maximum number of snapshots to fetch (server cap 1000)
    #[arg(long, default_value_t = 100)]
    pub limit: i64,

    /// History API base URL (defaults to PM_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,
}

pub async fn execute(args: HistoryArgs) -> AppResult<()> {
    let config = Config::from_env()?;
    let base_url = args
        .api_url
        .clone()
        .or(config.history_api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let client = HistoryApiClient::new(&base_url, config.http_timeout)?;
    debug!("Using history API at {}", client.base_url());

    let (market_id, hours) = match args.market_id {
        Some(id) => (id, args.hours),
        None => {
            println!("🔍 No market ID provided, fetching a sample market...");
            let markets = client.list_markets(1, "volume").await?;
            let Some(sample) = sample_market_id(&markets) else {
                println!("{}", NO_MARKETS);
                return Ok(());
            };
            println!("📌 Using market ID: {}\n", sample);
            (sample, Some(SAMPLE_WINDOW_HOURS))
        }
    };

    println!("⏳ Fetching market details...");
    let Some(market) = not_found_as_none(client.get_market(market_id).await)? else {
        print!("{}", missing_market_report(market_id));
        return Ok(());
    };

    println!("⏳ Fetching price history...");
    let query = HistoryQuery::new(args.limit, hours);
    let history = not_found_as_none(client.get_history(market_id, query).await)?;

    print!("{}", history_report(market_id, &market, history.as_deref()));

    Ok(())
}

/// Printed when the sample lookup comes back empty
pub const NO_MARKETS: &str = "❌ No markets found in database";

/// Id of the first market in the listing, if any
pub fn sample_market_id(markets: &[Market]) -> Option<Uuid> {
    markets.first().map(|m| m.id)
}

/// A 404 becomes `None`; every other error is kept
pub fn not_found_as_none<T>(result: Result<T, ApiError>) -> Result<Option<T>, ApiError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Report for an unknown market id
pub fn missing_market_report(market_id: Uuid) -> String {
    format!("❌ Market not found: {}\n{}", market_id, usage())
}

/// Header, history and footer. `None` history means the history endpoint
/// answered 404.
pub fn history_report(market_id: Uuid, market: &Market, history: Option<&[Snapshot]>) -> String {
    let mut out = String::new();
    if history.is_none() {
        out.push_str(&format!("❌ Market not found: {}\n", market_id));
    }
    out.push_str(&render_market_header(market));
    out.push_str(&render_history(history.unwrap_or_default()));
    out.push_str(&render_footer(market));
    out
}

fn usage() -> String {
    "\n💡 Usage: pm-history <market_id> [hours]\n   Example: pm-history 10aa9966-daa4-48b4-b838-829fc600f97e 24\n"
        .to_string()
}
