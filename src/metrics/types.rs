//! Metric identifiers and data points

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::format::ValueStyle;

/// Which series to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    /// Total revenue per day
    Revenue,
    /// Total passengers per day
    Pax,
}

impl MetricKey {
    /// Every metric shown on the dashboard, in display order
    pub const ALL: [MetricKey; 2] = [MetricKey::Revenue, MetricKey::Pax];

    /// Short identifier (`revenue`, `pax`)
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Revenue => "revenue",
            MetricKey::Pax => "pax",
        }
    }

    /// API path segment under `/api/`
    pub fn path(&self) -> &'static str {
        match self {
            MetricKey::Revenue => "total-revenue",
            MetricKey::Pax => "total-pax",
        }
    }

    /// Reverse of [`MetricKey::path`]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.path() == path)
    }

    /// Card title
    pub fn title(&self) -> &'static str {
        match self {
            MetricKey::Revenue => "Total Revenue",
            MetricKey::Pax => "Total Passengers",
        }
    }

    /// Word used in failure notifications ("Failed to load passenger data")
    pub fn noun(&self) -> &'static str {
        match self {
            MetricKey::Revenue => "revenue",
            MetricKey::Pax => "passenger",
        }
    }

    /// How the card renders this metric's values
    pub fn default_style(&self) -> ValueStyle {
        match self {
            MetricKey::Revenue => ValueStyle::Currency,
            MetricKey::Pax => ValueStyle::Compact,
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s || m.path() == s)
            .ok_or_else(|| format!("Unknown metric: {} (expected revenue or pax)", s))
    }
}

/// One day's value of a metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    /// Calendar day, serialized as `YYYY-MM-DD`
    #[serde(with = "day_timestamp")]
    pub timestamp: NaiveDate,
    pub value: f64,
}

impl MetricPoint {
    pub fn new(timestamp: NaiveDate, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// `YYYY-MM-DD` on the way out; `YYYY-MM-DD` or RFC 3339 on the way in
mod day_timestamp {
    use super::*;
    use crate::range::types::DATE_FORMAT;
    use serde::{de, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(date) = NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.date_naive())
            .map_err(|_| de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }
}
