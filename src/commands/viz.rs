use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::{HistoryApiClient, HistoryQuery};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Market, Snapshot};
use crate::services::chart_service::{default_chart_path, render_chart};
use crate::services::viz_service::{
    market_info_table, recent_snapshots_table, sparklines_table, RECENT_ROWS,
};
use crate::utils::render_panel;

/// Local development API
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Visualize a market's price history in the terminal
#[derive(Debug, Parser)]
#[command(name = "pm-viz", version)]
pub struct VizArgs {
    /// Market UUID
    #[arg(long)]
    pub market_id: Uuid,

    /// History API base URL (defaults to PM_API_URL, then localhost)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Limit to the last N hours
    #[arg(long)]
    pub hours: Option<i64>,

    /// Snapshots to fetch (server cap 1000)
    #[arg(long, default_value_t = 1000)]
    pub limit: i64,

    /// Chart file; .png, .svg, otherwise an HTML page
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Skip the chart
    #[arg(long)]
    pub no_chart: bool,
}

pub async fn execute(args: VizArgs) -> AppResult<()> {
    let config = Config::from_env()?;
    let base_url = args
        .api_url
        .clone()
        .or(config.history_api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let client = HistoryApiClient::new(&base_url, config.http_timeout)?;
    debug!("Using history API at {}", client.base_url());

    println!("{}", banner());

    let spinner = fetch_spinner();
    let fetched = fetch(&client, &args).await;
    spinner.finish_and_clear();
    let (market, history) = fetched?;

    if history.is_empty() {
        println!("{}", "No price history available for this market.".yellow());
        return Ok(());
    }

    println!("\n{} Fetched {} price snapshots\n", "✓".green(), history.len());

    println!("{}", market_info_table(&market));
    println!();
    println!("{}", recent_snapshots_table(&history, RECENT_ROWS));
    println!();
    println!("{}", sparklines_table(&history));

    if !args.no_chart {
        println!("\n{}", "Generating chart...".cyan());
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_chart_path(market.id));
        let format = render_chart(&market, &history, &path)?;
        info!("Chart written as {:?}", format);
        println!("\n{} {}", "Chart saved to:".green(), path.display());
    }

    println!(
        "\n{}",
        "Tip: Use --output chart.html (or .svg/.png) to choose where the chart is saved".dimmed()
    );

    Ok(())
}

async fn fetch(
    client: &HistoryApiClient,
    args: &VizArgs,
) -> AppResult<(Market, Vec<Snapshot>)> {
    let market = client
        .get_market(args.market_id)
        .await
        .map_err(|source| AppError::Fetch { what: "market", source })?;

    let query = HistoryQuery::new(args.limit, args.hours);
    let history = client
        .get_history(args.market_id, query)
        .await
        .map_err(|source| AppError::Fetch { what: "history", source })?;

    Ok((market, history))
}

fn banner() -> String {
    render_panel(vec![
        "PM History Tracker".bold().to_string(),
        subtitle().to_string(),
    ])
}

fn subtitle() -> ColoredString {
    "Terminal Visualization Tool".dimmed()
}

fn fetch_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Fetching market data...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
