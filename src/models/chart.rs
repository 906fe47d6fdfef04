//! Chart series models

use chrono::{DateTime, Duration, Utc};

use super::Snapshot;

/// A single point on the price/volume chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub yes_percent: f64,
    pub no_percent: f64,
    pub volume_24h: f64,
}

/// Chart points ordered oldest to newest
#[derive(Debug, Clone, Default)]
pub struct ChartSeries {
    points: Vec<ChartPoint>,
}

impl ChartSeries {
    /// Build from API history (newest first)
    pub fn from_history(history: &[Snapshot]) -> Self {
        let mut points: Vec<ChartPoint> = history
            .iter()
            .rev()
            .map(|s| ChartPoint {
                timestamp: s.recorded_at,
                yes_percent: s.yes_price * 100.0,
                no_percent: s.no_price * 100.0,
                volume_24h: s.volume_24h,
            })
            .collect();

        // stable, so equal timestamps keep insertion order
        points.sort_by_key(|p| p.timestamp);

        ChartSeries { points }
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Time span of the series, widened by an hour each way when degenerate
    pub fn time_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.points.first()?.timestamp;
        let last = self.points.last()?.timestamp;
        if first == last {
            Some((first - Duration::hours(1), last + Duration::hours(1)))
        } else {
            Some((first, last))
        }
    }

    /// Price axis range in percent with 10% padding, clamped to 0..=100
    pub fn price_bounds(&self) -> (f64, f64) {
        let (min, max) = self
            .points
            .iter()
            .flat_map(|p| [p.yes_percent, p.no_percent])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() || !max.is_finite() {
            return (0.0, 100.0);
        }

        let padding = ((max - min) * 0.1).max(1.0);
        ((min - padding).max(0.0), (max + padding).min(100.0))
    }

    /// Upper bound for the volume axis
    pub fn volume_ceiling(&self) -> f64 {
        let max = self
            .points
            .iter()
            .map(|p| p.volume_24h)
            .fold(0.0_f64, f64::max);
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }

    /// Half the width of one volume bar
    pub fn bar_half_width(&self) -> Duration {
        let Some((start, end)) = self.time_bounds() else {
            return Duration::minutes(1);
        };
        let slots = (self.points.len() as i64 * 2).max(2);
        let half = (end - start).num_milliseconds() / slots;
        Duration::milliseconds(half.max(60_000))
    }
}
