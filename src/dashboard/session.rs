//! Dashboard session state
//!
//! The session is the single owner of the selected range and of every panel.
//! Each refresh issues one task per metric tagged with a `FetchKey`; a result
//! is applied only while its key is still the active one for that metric, so
//! a slow response for an old range can never overwrite a newer selection.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::metrics::{FetchError, FetchResult, MetricClient, MetricKey, MetricPoint, MetricSummary};
use crate::range::{Clock, DateRange, DateRangeValidator, RangeResult, SystemClock};

/// Identity of one fetch: which metric, for which range, from which refresh
///
/// `generation` increases on every refresh, so returning to an earlier range
/// still yields a key distinct from the fetches issued for it before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub metric: MetricKey,
    pub range: DateRange,
    pub generation: u64,
}

/// Display state of one metric
#[derive(Debug, Clone)]
pub enum PanelState {
    Loading,
    Ready {
        points: Vec<MetricPoint>,
        summary: MetricSummary,
    },
    Failed {
        error: FetchError,
    },
}

/// One metric's card data
#[derive(Debug, Clone)]
pub struct Panel {
    pub metric: MetricKey,
    /// Range the state belongs to
    pub range: DateRange,
    pub state: PanelState,
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rejected range selection
    Warning,
    /// Failed fetch
    Error,
}

/// User-facing message queued by the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug)]
struct FetchOutcome {
    key: FetchKey,
    result: FetchResult<Vec<MetricPoint>>,
}

/// Sends exactly one outcome per fetch task
///
/// If the task is dropped before reporting (the client panicked, or the task
/// was aborted), an `Interrupted` failure is sent instead so the key never
/// stays pending. Aborted tasks always belong to a superseded generation, so
/// their failure is discarded like any other stale outcome.
struct OutcomeReporter {
    key: FetchKey,
    tx: Option<mpsc::UnboundedSender<FetchOutcome>>,
}

impl OutcomeReporter {
    fn report(mut self, result: FetchResult<Vec<MetricPoint>>) {
        self.send(result);
    }

    fn send(&mut self, result: FetchResult<Vec<MetricPoint>>) {
        if let Some(tx) = self.tx.take() {
            // The receiver only disappears with the session itself.
            let _ = tx.send(FetchOutcome {
                key: self.key,
                result,
            });
        }
    }
}

impl Drop for OutcomeReporter {
    fn drop(&mut self) {
        if self.tx.is_some() {
            self.send(Err(FetchError::Interrupted(
                "fetch task ended without a result".to_string(),
            )));
        }
    }
}

/// Range selection plus per-metric fetch state
///
/// Must be driven from within a Tokio runtime: `refresh` spawns tasks.
pub struct DashboardSession<C: Clock = SystemClock> {
    client: Arc<dyn MetricClient>,
    validator: DateRangeValidator<C>,
    active: HashMap<MetricKey, FetchKey>,
    pending: HashSet<MetricKey>,
    tasks: HashMap<MetricKey, JoinHandle<()>>,
    panels: HashMap<MetricKey, Panel>,
    notifications: Vec<Notification>,
    generation: u64,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl<C: Clock> DashboardSession<C> {
    /// Create a session; nothing is fetched until [`refresh`](Self::refresh)
    pub fn new(client: Arc<dyn MetricClient>, validator: DateRangeValidator<C>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            validator,
            active: HashMap::new(),
            pending: HashSet::new(),
            tasks: HashMap::new(),
            panels: HashMap::new(),
            notifications: Vec::new(),
            generation: 0,
            tx,
            rx,
        }
    }

    /// The committed range
    pub fn range(&self) -> DateRange {
        self.validator.current()
    }

    pub fn validator(&self) -> &DateRangeValidator<C> {
        &self.validator
    }

    /// Validate and commit a new range, then refetch every metric
    ///
    /// A rejection queues a warning and leaves panels and in-flight fetches alone.
    pub fn select_range(&mut self, from: NaiveDate, to: NaiveDate) -> RangeResult<DateRange> {
        match self.validator.propose_change(from, to) {
            Ok(range) => {
                tracing::info!(range = %range, "Range selected");
                self.refresh();
                Ok(range)
            }
            Err(e) => {
                self.notify(Severity::Warning, e.to_string());
                Err(e)
            }
        }
    }

    /// Return to the last 7 days and refetch
    pub fn reset_range(&mut self) -> DateRange {
        let range = self.validator.reset();
        tracing::info!(range = %range, "Range reset");
        self.refresh();
        range
    }

    /// Issue a fetch for every metric against the committed range,
    /// superseding whatever was in flight
    pub fn refresh(&mut self) {
        let range = self.validator.current();
        self.generation += 1;
        let generation = self.generation;

        for metric in MetricKey::ALL {
            let key = FetchKey {
                metric,
                range,
                generation,
            };

            if let Some(previous) = self.tasks.remove(&metric) {
                previous.abort();
            }
            self.active.insert(metric, key);
            self.pending.insert(metric);
            self.panels.insert(
                metric,
                Panel {
                    metric,
                    range,
                    state: PanelState::Loading,
                },
            );

            let client = Arc::clone(&self.client);
            let reporter = OutcomeReporter {
                key,
                tx: Some(self.tx.clone()),
            };
            let handle = tokio::spawn(async move {
                let result = client.fetch_series(key.metric, key.range).await;
                reporter.report(result);
            });
            self.tasks.insert(metric, handle);
        }

        tracing::debug!(range = %range, generation, metrics = MetricKey::ALL.len(), "Issued fetches");
    }

    /// Wait for the next result that belongs to the active range
    ///
    /// Superseded results are dropped without touching any panel. Returns
    /// the updated metric, or `None` once nothing is pending. Cancel-safe.
    pub async fn next_update(&mut self) -> Option<MetricKey> {
        while !self.pending.is_empty() {
            let outcome = self.rx.recv().await?;
            if let Some(metric) = self.apply(outcome) {
                return Some(metric);
            }
        }
        None
    }

    /// Wait until every active fetch has resolved
    pub async fn settle(&mut self) {
        while self.next_update().await.is_some() {}
    }

    /// Whether any active fetch is still outstanding
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn panel(&self, metric: MetricKey) -> Option<&Panel> {
        self.panels.get(&metric)
    }

    /// Panels in display order
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        MetricKey::ALL.iter().filter_map(|m| self.panels.get(m))
    }

    /// Drain queued notifications, oldest first
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn apply(&mut self, outcome: FetchOutcome) -> Option<MetricKey> {
        let key = outcome.key;
        let metric = key.metric;

        if self.active.get(&metric) != Some(&key) || !self.pending.remove(&metric) {
            tracing::debug!(
                metric = %metric,
                range = %key.range,
                generation = key.generation,
                "Discarding superseded result"
            );
            return None;
        }
        self.tasks.remove(&metric);

        let state = match outcome.result {
            Ok(points) => {
                let summary = MetricSummary::from_points(&points);
                tracing::debug!(metric = %metric, total = summary.total, "Panel ready");
                PanelState::Ready { points, summary }
            }
            Err(error) => {
                tracing::warn!(metric = %metric, range = %key.range, error = %error, "Panel failed");
                self.notify(Severity::Error, format!("Failed to load {} data", metric.noun()));
                PanelState::Failed { error }
            }
        };

        self.panels.insert(
            metric,
            Panel {
                metric,
                range: key.range,
                state,
            },
        );
        Some(metric)
    }

    fn notify(&mut self, severity: Severity, message: String) {
        self.notifications.push(Notification { severity, message });
    }
}

impl<C: Clock> Drop for DashboardSession<C> {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
