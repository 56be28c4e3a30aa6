//! Value Formatting
//!
//! Locale-aware rendering of metric values for display:
//!
//! - **formatter**: `FormatOptions`, `ValueFormatter`, `format_value`
//! - **locale**: Number symbols and compact-notation units per locale
//! - **currency**: Currency code validation and display symbols
//! - **labels**: Percent-change and day-axis labels
//! - **error**: Error types
//!
//! Supported locales are `en-US`, `en-GB`, `de-DE` and `fr-FR`. A well-formed tag
//! outside that set falls back to its language, then to `en-US`; a malformed tag is
//! an error.
//!
//! # Example
//!
//! ```rust
//! use paxboard::format::{format_value, FormatOptions};
//!
//! assert_eq!(format_value(1234.0, &FormatOptions::default()).unwrap(), "1.2K");
//!
//! let gbp = FormatOptions::currency().locale("en-GB").currency_code("GBP");
//! assert_eq!(format_value(2500.0, &gbp).unwrap(), "£2,500");
//! ```

pub mod currency;
pub mod error;
pub mod formatter;
pub mod labels;
pub mod locale;

pub use error::{FormatError, FormatResult};
pub use formatter::{format_value, FormatOptions, ValueFormatter, ValueStyle};
pub use labels::{day_label, percent_diff_label};
pub use locale::{LocaleData, SUPPORTED_LOCALES};
