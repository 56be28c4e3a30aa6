//! Text cards for metric panels

use serde::Serialize;
use std::fmt;

use super::session::{Panel, PanelState};
use crate::format::{day_label, FormatOptions, FormatResult, ValueFormatter};
use crate::metrics::Trend;

/// Whether a card has data to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Loading,
    Ready,
    Failed,
}

/// One bar of the per-day listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRow {
    /// `"Jun 19"`
    pub day: String,
    pub value: String,
}

/// Display-ready summary of a panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub title: String,
    pub range: String,
    pub status: CardStatus,
    /// Formatted total (empty while loading)
    pub total: String,
    pub diff: String,
    pub trend: Trend,
    pub rows: Vec<CardRow>,
    /// Shown instead of rows when the fetch failed
    pub error: Option<String>,
}

impl Card {
    /// Build a card using the metric's own style with the given locale and currency
    pub fn build(panel: &Panel, locale: &str, currency_code: &str) -> FormatResult<Self> {
        let options = FormatOptions::default()
            .style(panel.metric.default_style())
            .locale(locale)
            .currency_code(currency_code);
        let formatter = ValueFormatter::new(&options)?;

        let mut card = Card {
            title: panel.metric.title().to_string(),
            range: panel.range.to_string(),
            status: CardStatus::Loading,
            total: String::new(),
            diff: String::new(),
            trend: Trend::Neutral,
            rows: Vec::new(),
            error: None,
        };

        match &panel.state {
            PanelState::Loading => {}
            PanelState::Ready { points, summary } => {
                card.status = CardStatus::Ready;
                card.total = formatter.format(summary.total);
                card.diff = summary.diff_label();
                card.trend = summary.trend;
                card.rows = points
                    .iter()
                    .map(|p| CardRow {
                        day: day_label(p.timestamp),
                        value: formatter.format(p.value),
                    })
                    .collect();
            }
            PanelState::Failed { error } => {
                card.status = CardStatus::Failed;
                card.error = Some(format!("Failed to load data: {}", error));
            }
        }

        Ok(card)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.title, self.range)?;

        match self.status {
            CardStatus::Loading => writeln!(f, "  loading..."),
            CardStatus::Failed => writeln!(f, "  {}", self.error.as_deref().unwrap_or("failed")),
            CardStatus::Ready => {
                let arrow = match self.trend {
                    Trend::Positive => "▲",
                    Trend::Negative => "▼",
                    Trend::Neutral => "=",
                };
                writeln!(f, "  {}  {} {}", self.total, arrow, self.diff)?;
                writeln!(f, "  {}", "-".repeat(24))?;
                for row in &self.rows {
                    writeln!(f, "  {:<8} {:>14}", row.day, row.value)?;
                }
                Ok(())
            }
        }
    }
}
