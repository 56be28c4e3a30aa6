//! Series aggregation for dashboard cards
//!
//! The "previous period" is the series without its last day, so the
//! percentage shows how much the final day moved the running total.

use serde::Serialize;

use super::types::MetricPoint;
use crate::format::percent_diff_label;

/// Direction of the period-over-period change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

impl Trend {
    fn of(percent_diff: f64) -> Self {
        if percent_diff > 0.0 {
            Trend::Positive
        } else if percent_diff < 0.0 {
            Trend::Negative
        } else {
            Trend::Neutral
        }
    }
}

/// Totals for one metric series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    /// Sum of every point
    pub total: f64,
    /// Sum of every point except the last (equals `total` below two points)
    pub previous_total: f64,
    /// `(total - previous_total) / previous_total * 100`, or 0 when
    /// `previous_total` is 0
    pub percent_diff: f64,
    pub trend: Trend,
}

impl MetricSummary {
    pub fn from_points(points: &[MetricPoint]) -> Self {
        let total: f64 = points.iter().map(|p| p.value).sum();

        let previous_total = match points.split_last() {
            Some((_, previous)) if !previous.is_empty() => previous.iter().map(|p| p.value).sum(),
            _ => total,
        };

        let percent_diff = if previous_total == 0.0 {
            0.0
        } else {
            (total - previous_total) / previous_total * 100.0
        };

        Self {
            total,
            previous_total,
            percent_diff,
            trend: Trend::of(percent_diff),
        }
    }

    /// Chip text for the change (`"+5.2%"`, `"0%"`)
    pub fn diff_label(&self) -> String {
        percent_diff_label(self.percent_diff)
    }
}
