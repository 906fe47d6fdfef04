use crate::models::{Market, Snapshot};
use crate::utils::{thousands, truncate_chars};

const RULE_WIDTH: usize = 80;
const TABLE_WIDTH: usize = 70;
const TITLE_CHARS: usize = 70;

/// Movement between the oldest and newest snapshot of a history
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChange {
    pub delta: f64,
    pub percent: f64,
    pub first_volume: f64,
    pub last_volume: f64,
}

impl PriceChange {
    /// Compare the oldest and newest entries of a newest-first history.
    ///
    /// Needs at least two snapshots.
    pub fn from_history(history: &[Snapshot]) -> Option<Self> {
        if history.len() < 2 {
            return None;
        }
        let last = history.first()?;
        let first = history.last()?;

        Some(PriceChange {
            delta: last.yes_price - first.yes_price,
            percent: change_percent(first.yes_price, last.yes_price),
            first_volume: first.volume,
            last_volume: last.volume,
        })
    }
}

/// `(last - first) / first * 100`, or 0 when `first` is not positive
pub fn change_percent(first: f64, last: f64) -> f64 {
    if first > 0.0 {
        (last - first) / first * 100.0
    } else {
        0.0
    }
}

/// Banner with market title, source and status
pub fn render_market_header(market: &Market) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "\n{rule}\n📊 Market: {}\n🔗 Source: {}\n📈 Status: {}\n{rule}\n\n",
        truncate_chars(&market.title, TITLE_CHARS),
        market.source.to_uppercase(),
        market.status,
    )
}

/// Fixed-width snapshot table plus the change summary
pub fn render_history(history: &[Snapshot]) -> String {
    if history.is_empty() {
        return "⚠️  No price history available yet\n".to_string();
    }

    let dashes = "-".repeat(TABLE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("📅 Price History ({} snapshots):\n\n", history.len()));
    out.push_str(&format!(
        "{:<25} {:>12} {:>12} {:>15}\n",
        "Time", "Yes Price", "No Price", "Volume"
    ));
    out.push_str(&dashes);
    out.push('\n');

    for snapshot in history {
        out.push_str(&format!(
            "{:<25} {:>12.4} {:>12.4} ${:>14}\n",
            snapshot.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            snapshot.yes_price,
            snapshot.no_price,
            thousands(snapshot.volume, 2),
        ));
    }

    if let Some(change) = PriceChange::from_history(history) {
        out.push('\n');
        out.push_str(&dashes);
        out.push('\n');
        out.push_str(&format!(
            "💹 Price Change: {:+.4} ({:+.2}%)\n",
            change.delta, change.percent
        ));
        out.push_str(&format!(
            "📊 Volume Change: ${:.2} → ${:.2}\n",
            change.first_volume, change.last_volume
        ));
    }

    out
}

/// Closing banner with the market link
pub fn render_footer(market: &Market) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "\n{rule}\n✅ Done! Market URL: {}\n{rule}\n\n",
        market.url.as_deref().unwrap_or("N/A")
    )
}
