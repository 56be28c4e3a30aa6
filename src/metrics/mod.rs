//! Metric Series
//!
//! Everything between the metrics HTTP API and the dashboard cards:
//!
//! - **types**: `MetricKey`, `MetricPoint`
//! - **summary**: Totals and period-over-period change for a series
//! - **client**: `MetricClient` trait and the reqwest-backed `HttpMetricClient`
//! - **cache**: `CachedMetricClient`, a freshness-window cache over any client
//!
//! # Data Flow
//!
//! ```text
//! MetricKey + DateRange → CachedMetricClient → HttpMetricClient → GET /api/{path}?from&to
//!                                     ↓
//!                          Vec<MetricPoint> → MetricSummary → formatted card
//! ```

pub mod cache;
pub mod client;
pub mod summary;
pub mod types;

pub use cache::CachedMetricClient;
pub use client::{FetchError, FetchResult, HttpClientConfig, HttpMetricClient, MetricClient};
pub use summary::{MetricSummary, Trend};
pub use types::{MetricKey, MetricPoint};
