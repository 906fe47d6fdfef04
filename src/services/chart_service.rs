use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use plotters::coord::Shift;
use plotters::prelude::*;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ChartSeries, Market, Snapshot};

pub const CHART_WIDTH: u32 = 1200;
pub const CHART_HEIGHT: u32 = 800;

/// Share of the canvas height given to the price panel
const PRICE_PANEL_SHARE: f64 = 0.7;

const LIGHT_BLUE: RGBColor = RGBColor(173, 216, 230);

/// Output encoding, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    Png,
    Svg,
    Html,
}

impl ChartFormat {
    /// `.png` and `.svg` map to themselves, anything else becomes HTML
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => ChartFormat::Png,
            Some("svg") => ChartFormat::Svg,
            _ => ChartFormat::Html,
        }
    }
}

/// Where the chart goes when no output path was given
pub fn default_chart_path(market_id: Uuid) -> PathBuf {
    PathBuf::from(format!("market_{}_chart.html", market_id))
}

/// Render the price/volume chart for `market` to `path`
pub fn render_chart(market: &Market, history: &[Snapshot], path: &Path) -> AppResult<ChartFormat> {
    let series = ChartSeries::from_history(history);
    if series.is_empty() {
        return Err(AppError::Chart("No price data to chart".to_string()));
    }

    let format = ChartFormat::from_path(path);
    let size = (CHART_WIDTH, CHART_HEIGHT);

    match format {
        ChartFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_chart(&root, market, &series)?;
        }
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_chart(&root, market, &series)?;
        }
        ChartFormat::Html => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
                draw_chart(&root, market, &series)?;
            }
            std::fs::write(path, wrap_html(&market.title, &svg))?;
        }
    }

    Ok(format)
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    market: &Market,
    series: &ChartSeries,
) -> AppResult<()> {
    let (x_min, x_max) = series
        .time_bounds()
        .ok_or_else(|| AppError::Chart("No price data to chart".to_string()))?;
    let (y_min, y_max) = series.price_bounds();

    root.fill(&WHITE).map_err(|e| chart_err("fill canvas", e))?;
    let root = root
        .titled(&market.title, ("sans-serif", 28).into_font())
        .map_err(|e| chart_err("draw title", e))?;

    let split_at = (root.dim_in_pixel().1 as f64 * PRICE_PANEL_SHARE) as u32;
    let (upper, lower) = root.split_vertically(split_at);

    let mut price_chart = ChartBuilder::on(&upper)
        .caption(
            format!("Price History ({} | {})", market.source, market.status),
            ("sans-serif", 20).into_font(),
        )
        .margin(15)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| chart_err("build price chart", e))?;

    price_chart
        .configure_mesh()
        .y_desc("Price (%)")
        .x_label_formatter(&format_time_label)
        .draw()
        .map_err(|e| chart_err("draw price mesh", e))?;

    price_chart
        .draw_series(LineSeries::new(
            series.points().iter().map(|p| (p.timestamp, p.yes_percent)),
            GREEN.stroke_width(2),
        ))
        .map_err(|e| chart_err("draw yes line", e))?
        .label("Yes Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.stroke_width(2)));

    price_chart
        .draw_series(LineSeries::new(
            series.points().iter().map(|p| (p.timestamp, p.no_percent)),
            RED.stroke_width(2),
        ))
        .map_err(|e| chart_err("draw no line", e))?
        .label("No Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    price_chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| chart_err("draw legend", e))?;

    let mut volume_chart = ChartBuilder::on(&lower)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..series.volume_ceiling())
        .map_err(|e| chart_err("build volume chart", e))?;

    volume_chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Volume ($)")
        .x_label_formatter(&format_time_label)
        .draw()
        .map_err(|e| chart_err("draw volume mesh", e))?;

    let half = series.bar_half_width();
    volume_chart
        .draw_series(series.points().iter().map(|p| {
            Rectangle::new(
                [(p.timestamp - half, 0.0), (p.timestamp + half, p.volume_24h)],
                LIGHT_BLUE.filled(),
            )
        }))
        .map_err(|e| chart_err("draw volume bars", e))?;

    root.present().map_err(|e| chart_err("render chart", e))?;

    Ok(())
}

fn format_time_label(t: &DateTime<Utc>) -> String {
    t.format("%m-%d %H:%M").to_string()
}

fn chart_err(action: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Chart(format!("Failed to {}: {}", action, e))
}

fn wrap_html(title: &str, svg: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        svg
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ChartFormat::from_path(Path::new("out.png")), ChartFormat::Png);
        assert_eq!(ChartFormat::from_path(Path::new("OUT.PNG")), ChartFormat::Png);
        assert_eq!(ChartFormat::from_path(Path::new("dir/chart.svg")), ChartFormat::Svg);
        assert_eq!(ChartFormat::from_path(Path::new("chart.html")), ChartFormat::Html);
        assert_eq!(ChartFormat::from_path(Path::new("chart")), ChartFormat::Html);
    }

    #[test]
    fn test_default_path_names_market() {
        let path = default_chart_path(Uuid::nil());
        assert_eq!(
            path.to_str().unwrap(),
            "market_00000000-0000-0000-0000-000000000000_chart.html"
        );
    }

    #[test]
    fn test_html_wrapper_escapes_title() {
        let html = wrap_html("A < B & \"C\"", "<svg></svg>");
        assert!(html.contains("<title>A &lt; B &amp; &quot;C&quot;</title>"));
        assert!(html.contains("<svg></svg>"));
    }

    #[test]
    fn test_empty_history_is_rejected() {
        let market: Market = serde_json::from_value(serde_json::json!({
            "id": Uuid::nil(), "source": "kalshi", "title": "t", "status": "active"
        }))
        .unwrap();
        let err = render_chart(&market, &[], Path::new("unused.svg")).unwrap_err();
        assert!(matches!(err, AppError::Chart(_)));
    }
}
