//! # Paxboard
//!
//! Revenue and passenger dashboard core: date-range validation, locale-aware
//! number formatting, and a metrics client/server pair.
//!
//! ## Modules
//!
//! - [`range`]: Date-range model, clock seam and the range validator
//! - [`format`]: Compact and currency formatting for en-US, en-GB, de-DE, fr-FR
//! - [`metrics`]: Metric identifiers, summaries and the HTTP/caching clients
//! - [`dashboard`]: Session that keeps panels in step with the selected range
//! - [`api`]: Axum backend serving deterministic synthetic series
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: `tracing` subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paxboard::dashboard::{Card, DashboardSession};
//! use paxboard::metrics::{HttpClientConfig, HttpMetricClient};
//! use paxboard::range::DateRangeValidator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(HttpMetricClient::new(HttpClientConfig::default())?);
//!     let mut session = DashboardSession::new(client, DateRangeValidator::default_window());
//!
//!     session.refresh();
//!     session.settle().await;
//!
//!     for panel in session.panels() {
//!         println!("{}", Card::build(panel, "en-US", "USD")?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod logging;
pub mod metrics;
pub mod range;

// Re-export top-level types for convenience
pub use range::{Clock, DateRange, DateRangeValidator, FixedClock, RangeError, SystemClock};

pub use format::{format_value, FormatError, FormatOptions, ValueFormatter, ValueStyle};

pub use metrics::{
    CachedMetricClient, FetchError, HttpClientConfig, HttpMetricClient, MetricClient, MetricKey,
    MetricPoint, MetricSummary, Trend,
};

pub use dashboard::{Card, DashboardSession, Notification, Panel, PanelState, Severity};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError};
