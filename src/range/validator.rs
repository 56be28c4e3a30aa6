//! Date range validator
//!
//! Holds the committed `DateRange` and the latest rejection reason. All
//! transitions go through [`DateRangeValidator::propose_change`] or
//! [`DateRangeValidator::reset`]; a rejected proposal never touches the
//! committed range.

use chrono::NaiveDate;

use super::clock::{Clock, SystemClock};
use super::error::{RangeError, RangeResult};
use super::types::{DateRange, MAX_RANGE_DAYS};

/// Validated owner of the selected date window
#[derive(Debug, Clone)]
pub struct DateRangeValidator<C: Clock = SystemClock> {
    current: DateRange,
    last_error: Option<RangeError>,
    clock: C,
}

impl DateRangeValidator<SystemClock> {
    /// Start from `initial` using the local wall clock for "today"
    ///
    /// The initial range is trusted: its span is not checked against
    /// `MAX_RANGE_DAYS`.
    pub fn new(initial: DateRange) -> Self {
        Self::with_clock(initial, SystemClock)
    }

    /// Start from the default 7-day window ending today
    pub fn default_window() -> Self {
        let today = SystemClock.today();
        Self::new(DateRange::default_for(today))
    }
}

impl<C: Clock> DateRangeValidator<C> {
    /// Start from `initial` with a custom clock
    pub fn with_clock(initial: DateRange, clock: C) -> Self {
        Self {
            current: initial,
            last_error: None,
            clock,
        }
    }

    /// The committed range
    pub fn current(&self) -> DateRange {
        self.current
    }

    /// Reason the most recent proposal was rejected, if it was
    pub fn last_error(&self) -> Option<&RangeError> {
        self.last_error.as_ref()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Validate and commit a new range
    ///
    /// On rejection only `last_error` changes.
    pub fn propose_change(&mut self, new_from: NaiveDate, new_to: NaiveDate) -> RangeResult<DateRange> {
        match Self::check(new_from, new_to) {
            Ok(range) => {
                self.current = range;
                self.last_error = None;
                tracing::debug!(range = %range, "Date range changed");
                Ok(range)
            }
            Err(e) => {
                tracing::debug!(
                    from = %new_from,
                    to = %new_to,
                    error_code = e.code(),
                    "Rejected date range"
                );
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Commit the 7 days ending today, unconditionally
    pub fn reset(&mut self) -> DateRange {
        let range = DateRange::default_for(self.clock.today());
        self.current = range;
        self.last_error = None;
        tracing::debug!(range = %range, "Date range reset");
        range
    }

    /// True when the committed range is exactly the 7 days ending today
    pub fn is_default_range(&self) -> bool {
        self.current == DateRange::default_for(self.clock.today())
    }

    /// Whether a "reset to last 7 days" action is worth offering
    pub fn should_show_reset(&self) -> bool {
        !self.is_default_range()
    }

    fn check(new_from: NaiveDate, new_to: NaiveDate) -> RangeResult<DateRange> {
        let range = DateRange::new(new_from, new_to)?;
        if range.day_diff() > MAX_RANGE_DAYS {
            return Err(RangeError::TooLong {
                max_days: MAX_RANGE_DAYS,
            });
        }
        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::clock::FixedClock;
    use chrono::Duration;
    use std::cell::Cell;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 19).unwrap()
    }

    fn validator() -> DateRangeValidator<FixedClock> {
        DateRangeValidator::with_clock(DateRange::default_for(today()), FixedClock(today()))
    }

    #[test]
    fn test_initialize() {
        let v = validator();
        assert_eq!(v.current().from(), today() - Duration::days(6));
        assert_eq!(v.current().to(), today());
        assert!(v.last_error().is_none());
        assert!(v.is_default_range());
        assert!(!v.should_show_reset());
    }

    #[test]
    fn test_initial_range_span_is_not_validated() {
        // A 90-day initial range is kept as given; only later proposals are checked.
        let wide = DateRange::new(today() - Duration::days(90), today()).unwrap();
        let v = DateRangeValidator::with_clock(wide, FixedClock(today()));
        assert_eq!(v.current(), wide);
        assert!(v.last_error().is_none());
    }

    #[test]
    fn test_rejects_end_before_start() {
        let mut v = validator();
        let before = v.current();

        let err = v
            .propose_change(today(), today() - Duration::days(1))
            .unwrap_err();

        assert_eq!(err, RangeError::Order);
        assert_eq!(
            v.last_error().map(|e| e.to_string()).as_deref(),
            Some("End date cannot be before start date.")
        );
        assert_eq!(v.current(), before);
    }

    #[test]
    fn test_rejects_range_over_max_days() {
        let mut v = validator();
        let before = v.current();
        let from = today() - Duration::days(6);

        let err = v
            .propose_change(from, today() + Duration::days(MAX_RANGE_DAYS + 1))
            .unwrap_err();

        assert!(matches!(err, RangeError::TooLong { max_days: 60 }));
        assert!(err.to_string().contains("cannot exceed"));
        assert_eq!(v.current(), before);
    }

    #[test]
    fn test_boundary_span() {
        let mut v = validator();
        let from = today() - Duration::days(MAX_RANGE_DAYS);
        assert!(v.propose_change(from, today()).is_ok());

        let from = today() - Duration::days(MAX_RANGE_DAYS + 1);
        assert!(v.propose_change(from, today()).is_err());
        assert_eq!(v.current().day_diff(), MAX_RANGE_DAYS);
    }

    #[test]
    fn test_accepts_valid_range_and_clears_error() {
        let mut v = validator();
        v.propose_change(today(), today() - Duration::days(3)).unwrap_err();
        assert!(v.last_error().is_some());

        let from = today() - Duration::days(5);
        let range = v.propose_change(from, today()).unwrap();

        assert_eq!(range.from(), from);
        assert_eq!(v.current(), range);
        assert!(v.last_error().is_none());
        assert!(v.should_show_reset());
    }

    #[test]
    fn test_latest_error_wins() {
        let mut v = validator();
        v.propose_change(today(), today() - Duration::days(1)).unwrap_err();
        v.propose_change(today() - Duration::days(100), today())
            .unwrap_err();
        assert!(matches!(v.last_error(), Some(RangeError::TooLong { .. })));
    }

    #[test]
    fn test_single_day_range() {
        let mut v = validator();
        let range = v.propose_change(today(), today()).unwrap();
        assert_eq!(range.span_days(), 1);
        assert!(!v.is_default_range());
    }

    #[test]
    fn test_reset_restores_default() {
        let mut v = validator();
        v.propose_change(today() - Duration::days(30), today() - Duration::days(10))
            .unwrap();
        v.propose_change(today(), today() - Duration::days(1)).unwrap_err();

        let range = v.reset();

        assert_eq!(range, DateRange::default_for(today()));
        assert!(v.last_error().is_none());
        assert!(v.is_default_range());
    }

    #[test]
    fn test_default_window_follows_clock() {
        let day = Cell::new(today());
        let mut v = DateRangeValidator::with_clock(DateRange::default_for(today()), || day.get());
        assert!(v.is_default_range());

        day.set(today() + Duration::days(1));
        assert!(!v.is_default_range());

        let range = v.reset();
        assert_eq!(range.to(), today() + Duration::days(1));
        assert!(v.is_default_range());
    }

    #[test]
    fn test_exhaustive_small_grid() {
        let base = today();
        for start in -70..=0 {
            for end in -70..=0 {
                let mut v = validator();
                let before = v.current();
                let a = base + Duration::days(start);
                let b = base + Duration::days(end);
                let result = v.propose_change(a, b);

                if b < a {
                    assert_eq!(result, Err(RangeError::Order));
                    assert_eq!(v.current(), before);
                } else if (b - a).num_days() > MAX_RANGE_DAYS {
                    assert!(matches!(result, Err(RangeError::TooLong { .. })));
                    assert_eq!(v.current(), before);
                } else {
                    assert_eq!(v.current(), DateRange::new(a, b).unwrap());
                    assert!(v.last_error().is_none());
                }
            }
        }
    }
}
