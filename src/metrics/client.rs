//! Metrics API Client
//!
//! `MetricClient` is the seam the dashboard depends on; `HttpMetricClient`
//! implements it against `GET {base_url}/{metric-path}?from=..&to=..`.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use super::types::{MetricKey, MetricPoint};
use crate::range::DateRange;

/// Source of metric series
#[async_trait]
pub trait MetricClient: Send + Sync {
    /// Fetch one point per day of `range`, ascending by day
    async fn fetch_series(&self, metric: MetricKey, range: DateRange) -> FetchResult<Vec<MetricPoint>>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// API root (e.g. "http://localhost:8080/api")
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry
    pub retry_delay_ms: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            request_timeout_ms: 10_000,
            max_retries: 1,
            retry_delay_ms: 1000,
        }
    }
}

/// reqwest-backed metrics client
pub struct HttpMetricClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpMetricClient {
    /// Create a new client with the given configuration
    pub fn new(config: HttpClientConfig) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| FetchError::Setup(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Full request URL for a metric and range
    pub fn series_url(&self, metric: MetricKey, range: DateRange) -> String {
        format!(
            "{}/{}?{}",
            self.config.base_url.trim_end_matches('/'),
            metric.path(),
            range.to_query()
        )
    }

    async fn fetch_once(&self, url: &str) -> FetchResult<Vec<MetricPoint>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }

    fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.min(16);
        Duration::from_millis(self.config.retry_delay_ms.saturating_mul(factor))
    }
}

#[async_trait]
impl MetricClient for HttpMetricClient {
    async fn fetch_series(&self, metric: MetricKey, range: DateRange) -> FetchResult<Vec<MetricPoint>> {
        let url = self.series_url(metric, range);
        let mut attempt = 0;

        loop {
            match self.fetch_once(&url).await {
                Ok(points) => {
                    tracing::debug!(metric = %metric, range = %range, points = points.len(), "Fetched series");
                    return Ok(points);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = self.retry_delay(attempt);
                    tracing::warn!(
                        metric = %metric,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(metric = %metric, url = %url, error = %e, "Fetch failed");
                    return Err(e);
                }
            }
        }
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when fetching a series
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    /// Non-2xx response; the body is kept as the message, never parsed as data
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response whose body is not a list of points
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Setup(String),

    /// The fetch task stopped before producing a result (e.g. the client panicked)
    #[error("Fetch interrupted: {0}")]
    Interrupted(String),
}

impl FetchError {
    /// Worth another attempt: transport failures and 5xx/429 responses
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) | FetchError::Timeout => true,
            FetchError::Status { status, .. } => *status >= 500 || *status == 429,
            FetchError::Malformed(_) | FetchError::Setup(_) | FetchError::Interrupted(_) => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Malformed(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_series_url() {
        let client = HttpMetricClient::new(HttpClientConfig {
            base_url: "http://example.test/api/".to_string(),
            ..Default::default()
        })
        .unwrap();
        let range = DateRange::parse("2025-06-01", "2025-06-03").unwrap();

        assert_eq!(
            client.series_url(MetricKey::Revenue, range),
            "http://example.test/api/total-revenue?from=2025-06-01&to=2025-06-03"
        );
        assert_eq!(
            client.series_url(MetricKey::Pax, range),
            "http://example.test/api/total-pax?from=2025-06-01&to=2025-06-03"
        );
    }

    #[test]
    fn test_retry_delay_doubles() {
        let client = HttpMetricClient::new(HttpClientConfig {
            retry_delay_ms: 100,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.retry_delay(0), Duration::from_millis(100));
        assert_eq!(client.retry_delay(1), Duration::from_millis(200));
        assert_eq!(client.retry_delay(3), Duration::from_millis(800));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(FetchError::Timeout.is_retryable());
        assert!(FetchError::Network("reset".into()).is_retryable());
        assert!(FetchError::Status { status: 503, message: String::new() }.is_retryable());
        assert!(!FetchError::Status { status: 400, message: String::new() }.is_retryable());
        assert!(!FetchError::Malformed("eof".into()).is_retryable());
        assert!(!FetchError::Interrupted("panicked".into()).is_retryable());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let client = HttpMetricClient::new(HttpClientConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            max_retries: 0,
            request_timeout_ms: 2000,
            ..Default::default()
        })
        .unwrap();
        let range = DateRange::parse("2025-06-01", "2025-06-03").unwrap();

        let err = client.fetch_series(MetricKey::Revenue, range).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_) | FetchError::Timeout));
    }
}
