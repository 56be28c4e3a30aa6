//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Series responses reuse [`crate::metrics::MetricPoint`] directly.

use serde::{Deserialize, Serialize};

/// Query string of `GET /api/:metric`
///
/// Both fields are optional here so a missing date is reported as a
/// validation error rather than axum's generic rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SeriesParams {
    /// First day, `YYYY-MM-DD`
    #[serde(default)]
    pub from: Option<String>,
    /// Last day, `YYYY-MM-DD`
    #[serde(default)]
    pub to: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
