//! Date range error types

use thiserror::Error;

/// Reasons a proposed date range is rejected
///
/// Both variants are user-correctable and never change the committed range.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// End date precedes start date
    #[error("End date cannot be before start date.")]
    Order,

    /// Span between start and end exceeds the allowed number of days
    #[error("Date range cannot exceed {max_days} days.")]
    TooLong { max_days: i64 },

    /// A date string could not be parsed as `YYYY-MM-DD`
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Unparseable(String),
}

impl RangeError {
    /// Stable machine-readable code for logs and JSON output
    pub fn code(&self) -> &'static str {
        match self {
            RangeError::Order => "ORDER_ERROR",
            RangeError::TooLong { .. } => "RANGE_TOO_LONG",
            RangeError::Unparseable(_) => "INVALID_DATE",
        }
    }
}

/// Result type alias for range operations
pub type RangeResult<T> = Result<T, RangeError>;
