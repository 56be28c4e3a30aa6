//! Freshness-window cache over a `MetricClient`
//!
//! Results are keyed by (metric, range). A hit younger than `stale_time` is
//! served without touching the inner client; failures are never stored.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use super::client::{FetchResult, MetricClient};
use super::types::{MetricKey, MetricPoint};
use crate::range::DateRange;

type CacheKey = (MetricKey, DateRange);

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: Instant,
    points: Vec<MetricPoint>,
}

/// Caching wrapper for any metric client
pub struct CachedMetricClient {
    inner: Arc<dyn MetricClient>,
    stale_time: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachedMetricClient {
    /// Default freshness window (5 minutes)
    pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

    pub fn new(inner: Arc<dyn MetricClient>, stale_time: Duration) -> Self {
        Self {
            inner,
            stale_time,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Drop every cached series
    pub async fn invalidate(&self) {
        self.entries.write().await.clear();
    }

    /// Number of cached series
    ///
    /// Expired entries are evicted on the next insert, so this may briefly
    /// include some.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    async fn lookup(&self, key: &CacheKey) -> Option<Vec<MetricPoint>> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.fetched_at.elapsed() < self.stale_time)
            .map(|entry| entry.points.clone())
    }
}

#[async_trait]
impl MetricClient for CachedMetricClient {
    async fn fetch_series(&self, metric: MetricKey, range: DateRange) -> FetchResult<Vec<MetricPoint>> {
        let key = (metric, range);

        if let Some(points) = self.lookup(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(metric = %metric, range = %range, "Series cache hit");
            return Ok(points);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let points = self.inner.fetch_series(metric, range).await?;

        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.stale_time);
        entries.insert(
            key,
            CacheEntry {
                fetched_at: Instant::now(),
                points: points.clone(),
            },
        );

        Ok(points)
    }
}
