//! Date Range Selection
//!
//! Owns the dashboard's selected date window and validates every change to it:
//!
//! - **types**: `DateRange`, the inclusive calendar-day window
//! - **clock**: Where "today" comes from (`SystemClock`, `FixedClock`)
//! - **validator**: `DateRangeValidator`, the only way to move the window
//! - **error**: Rejection reasons
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use paxboard::range::{DateRange, DateRangeValidator, FixedClock, RangeError};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 19).unwrap();
//! let mut validator = DateRangeValidator::with_clock(DateRange::last_days(today, 7), FixedClock(today));
//! assert!(validator.is_default_range());
//!
//! let june = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! validator.propose_change(june, today).unwrap();
//! assert!(validator.should_show_reset());
//!
//! let err = validator.propose_change(today, june).unwrap_err();
//! assert_eq!(err, RangeError::Order);
//! assert_eq!(validator.current().from(), june);
//! ```

pub mod clock;
pub mod error;
pub mod types;
pub mod validator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{RangeError, RangeResult};
pub use types::{DateRange, DEFAULT_WINDOW_DAYS, MAX_RANGE_DAYS};
pub use validator::DateRangeValidator;
