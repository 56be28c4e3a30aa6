//! Calendar-day date ranges
//!
//! A `DateRange` is an inclusive `[from, to]` window of `NaiveDate`s. The type
//! guarantees `from <= to`; the span limit is a validator concern.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{RangeError, RangeResult};

/// Maximum allowed difference, in days, between `from` and `to`
pub const MAX_RANGE_DAYS: i64 = 60;

/// Number of days in the default "last N days" window
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Wire format for dates (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar-day window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

#[derive(Deserialize)]
struct RawRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl TryFrom<RawRange> for DateRange {
    type Error = RangeError;

    fn try_from(raw: RawRange) -> RangeResult<Self> {
        DateRange::new(raw.from, raw.to)
    }
}

impl DateRange {
    /// Create a range, rejecting `to < from`
    pub fn new(from: NaiveDate, to: NaiveDate) -> RangeResult<Self> {
        if to < from {
            return Err(RangeError::Order);
        }
        Ok(Self { from, to })
    }

    /// The `days`-long window ending on `today` (inclusive on both ends)
    ///
    /// `days` below 1 is treated as 1.
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        let days = days.max(1);
        Self {
            from: today - Duration::days(days - 1),
            to: today,
        }
    }

    /// The dashboard's default window: the 7 days ending on `today`
    pub fn default_for(today: NaiveDate) -> Self {
        Self::last_days(today, DEFAULT_WINDOW_DAYS)
    }

    /// Parse a pair of `YYYY-MM-DD` strings
    pub fn parse(from: &str, to: &str) -> RangeResult<Self> {
        Self::new(parse_date(from)?, parse_date(to)?)
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Whole days between `from` and `to` (0 for a single-day range)
    pub fn day_diff(&self) -> i64 {
        (self.to - self.from).num_days()
    }

    /// Inclusive number of days covered
    pub fn span_days(&self) -> i64 {
        self.day_diff() + 1
    }

    /// Check if a date falls within this range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Every day in the range, ascending
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let from = self.from;
        (0..self.span_days()).map(move |i| from + Duration::days(i))
    }

    /// Query string used by the metrics API (`from=YYYY-MM-DD&to=YYYY-MM-DD`)
    pub fn to_query(&self) -> String {
        format!(
            "from={}&to={}",
            self.from.format(DATE_FORMAT),
            self.to.format(DATE_FORMAT)
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.from.format(DATE_FORMAT),
            self.to.format(DATE_FORMAT)
        )
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    /// Parses `YYYY-MM-DD..YYYY-MM-DD`
    fn from_str(s: &str) -> RangeResult<Self> {
        let (from, to) = s
            .split_once("..")
            .ok_or_else(|| RangeError::Unparseable(s.to_string()))?;
        Self::parse(from.trim(), to.trim())
    }
}

/// Parse a single `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> RangeResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| RangeError::Unparseable(s.to_string()))
}
