use colored::{ColoredString, Colorize};
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify};
use tabled::{Table, Tabled};

use crate::models::{Market, Snapshot};
use crate::utils::{dollars, framed, percent, rounded, titled};

/// Eight block glyphs from lowest to highest
pub const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Width of the trend sparklines
pub const SPARKLINE_WIDTH: usize = 60;

/// Snapshots shown in the recent table
pub const RECENT_ROWS: usize = 10;

/// Render values as a block sparkline.
///
/// Fewer than two values give an empty string and a flat series gives
/// `width` dashes. Longer series are sampled down to `width` glyphs; shorter
/// ones get one glyph per value.
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.len() < 2 {
        return String::new();
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if max == min {
        return "─".repeat(width);
    }

    let range = max - min;
    let normalized: Vec<f64> = values.iter().map(|v| (v - min) / range).collect();

    let sampled: Vec<f64> = if normalized.len() > width {
        let step = normalized.len() as f64 / width as f64;
        (0..width)
            .map(|i| normalized[((i as f64 * step) as usize).min(normalized.len() - 1)])
            .collect()
    } else {
        normalized
    };

    sampled
        .iter()
        .map(|v| SPARK_CHARS[((v * 7.0) as usize).min(SPARK_CHARS.len() - 1)])
        .collect()
}

/// Width of the field column in the market info table
const FIELD_WIDTH: usize = 15;

#[derive(Tabled)]
struct SnapshotRow {
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Yes Price")]
    yes_price: String,
    #[tabled(rename = "No Price")]
    no_price: String,
    #[tabled(rename = "Volume")]
    volume: String,
    #[tabled(rename = "24h Volume")]
    volume_24h: String,
}

/// Two-column summary of the market's current quote
pub fn market_info_table(market: &Market) -> String {
    let mut fields = vec![
        ("Source", market.source.clone()),
        ("Status", market.status.clone()),
        ("Yes Price", percent(market.yes_price)),
        ("No Price", percent(market.no_price)),
        ("Volume", dollars(market.volume, 0)),
        ("24h Volume", dollars(market.volume_24h, 0)),
    ];
    if let Some(liquidity) = market.reported_liquidity() {
        fields.push(("Liquidity", dollars(liquidity, 0)));
    }

    let mut builder = Builder::default();
    for (field, value) in fields {
        let field = format!("{:<width$}", field, width = FIELD_WIDTH);
        builder.push_record([field.cyan().to_string(), value]);
    }

    titled(&market.title, &framed(builder.build()))
}

/// The `limit` newest snapshots
pub fn recent_snapshots_table(history: &[Snapshot], limit: usize) -> String {
    let rows: Vec<SnapshotRow> = history
        .iter()
        .take(limit)
        .map(|snapshot| SnapshotRow {
            timestamp: snapshot
                .recorded_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .cyan()
                .to_string(),
            yes_price: percent(snapshot.yes_price).green().to_string(),
            no_price: percent(snapshot.no_price).red().to_string(),
            volume: dollars(snapshot.volume, 0),
            volume_24h: dollars(snapshot.volume_24h, 0),
        })
        .collect();

    let mut table = rounded(Table::new(rows));
    table.with(Modify::new(Columns::new(1..)).with(Alignment::right()));

    titled("Recent Price Snapshots", &table)
}

/// Yes price and 24h volume trends, oldest to newest
pub fn sparklines_table(history: &[Snapshot]) -> String {
    let yes: Vec<f64> = history.iter().rev().map(|s| s.yes_price * 100.0).collect();
    let volume: Vec<f64> = history.iter().rev().map(|s| s.volume_24h).collect();

    let mut builder = Builder::default();
    for (metric, values) in [("Yes Price", &yes), ("24h Volume", &volume)] {
        builder.push_record([
            metric.cyan().to_string(),
            trend_cell(values).to_string(),
        ]);
    }

    titled("Trend Sparklines", &framed(builder.build()))
}

fn trend_cell(values: &[f64]) -> ColoredString {
    sparkline(values, SPARKLINE_WIDTH).green()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn rank(c: char) -> usize {
        SPARK_CHARS.iter().position(|&x| x == c).unwrap()
    }

    fn history(yes_newest_first: &[f64]) -> Vec<Snapshot> {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let n = yes_newest_first.len() as i64;
        yes_newest_first
            .iter()
            .enumerate()
            .map(|(i, &yes)| Snapshot {
                id: None,
                market_id: Uuid::nil(),
                yes_price: yes,
                no_price: 1.0 - yes,
                volume: 1000.0,
                volume_24h: 100.0 * (n - i as i64) as f64,
                liquidity: None,
                recorded_at: start + Duration::hours(n - i as i64),
            })
            .collect()
    }

    #[test]
    fn test_too_few_values() {
        assert_eq!(sparkline(&[], 60), "");
        assert_eq!(sparkline(&[1.0], 60), "");
    }

    #[test]
    fn test_flat_series_is_dashes() {
        assert_eq!(sparkline(&[3.0, 3.0, 3.0], 5), "─────");
    }

    #[test]
    fn test_width_when_downsampling() {
        let values: Vec<f64> = (0..500).map(|i| (i as f64 * 0.1).sin()).collect();
        assert_eq!(sparkline(&values, 60).chars().count(), 60);
    }

    #[test]
    fn test_short_series_keeps_every_value() {
        let line = sparkline(&[0.0, 1.0, 2.0], 60);
        assert_eq!(line, "▁▄█");
    }

    #[test]
    fn test_monotonic_input_gives_monotonic_glyphs() {
        let values: Vec<f64> = (0..200).map(|i| (i * i) as f64).collect();
        let ranks: Vec<usize> = sparkline(&values, 40).chars().map(rank).collect();
        assert_eq!(ranks.len(), 40);
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ranks[0], 0);
    }

    #[test]
    fn test_extremes_map_to_lowest_and_highest() {
        let line: Vec<char> = sparkline(&[10.0, 20.0], 60).chars().collect();
        assert_eq!(line, vec!['▁', '█']);
    }

    fn body_rows(rendered: &str) -> usize {
        rendered.lines().filter(|l| l.starts_with('│')).count()
    }

    #[test]
    fn test_recent_table_is_limited() {
        colored::control::set_override(false);
        let h = history(&[0.9, 0.8, 0.7, 0.6, 0.5]);
        let rendered = recent_snapshots_table(&h, 3);
        // header plus three snapshots
        assert_eq!(body_rows(&rendered), 4);
        assert_eq!(rendered.lines().next().map(str::trim), Some("Recent Price Snapshots"));
        assert!(rendered.contains("│ Timestamp "));
        assert!(rendered.contains("2025-01-01 05:00"));
        assert!(!rendered.contains("2025-01-01 02:00"));
    }

    #[test]
    fn test_recent_table_right_aligns_numbers() {
        colored::control::set_override(false);
        let h = history(&[0.5]);
        let rendered = recent_snapshots_table(&h, 10);
        // "Yes Price" header is wider than "50.00%"
        assert!(rendered.contains("│    50.00% │"));
    }

    #[test]
    fn test_sparklines_run_oldest_to_newest() {
        colored::control::set_override(false);
        // newest first and falling, so the trend rises left to right
        let h = history(&[0.9, 0.7, 0.5, 0.3, 0.1]);
        let rendered = sparklines_table(&h);
        assert!(rendered.contains("▁▂▄▆█"));
        assert_eq!(body_rows(&rendered), 2);
    }

    #[test]
    fn test_trend_cells_are_green() {
        assert_eq!(trend_cell(&[1.0, 2.0]).fgcolor(), Some(colored::Color::Green));
    }

    #[test]
    fn test_market_info_rows() {
        colored::control::set_override(false);
        let market: Market = serde_json::from_value(serde_json::json!({
            "id": Uuid::nil(),
            "source": "polymarket",
            "title": "Will it rain?",
            "status": "open",
            "yes_price": 0.625,
            "no_price": 0.375,
            "volume": 1234567.0,
            "volume_24h": 890.0,
            "liquidity": 5000.0,
        }))
        .unwrap();

        let rendered = market_info_table(&market);
        assert_eq!(body_rows(&rendered), 7);
        assert!(rendered.contains("│ Source          │ polymarket │"));
        assert!(rendered.contains("Will it rain?"));
        assert!(rendered.contains("62.50%"));
        assert!(rendered.contains("$1,234,567"));
        assert!(rendered.contains("Liquidity"));
    }
}
