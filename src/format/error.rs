//! Formatting error types

use thiserror::Error;

/// Errors raised while resolving format options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Locale tag is not a well-formed BCP-47 tag
    #[error("Invalid locale tag: {0}")]
    InvalidLocale(String),

    /// Currency code is not three ASCII letters
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    /// Unrecognised style name
    #[error("Unknown value style: {0} (expected compact or currency)")]
    UnknownStyle(String),
}

/// Result type alias for formatting operations
pub type FormatResult<T> = Result<T, FormatError>;
