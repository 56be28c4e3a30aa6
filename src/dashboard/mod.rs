//! Dashboard Session
//!
//! Ties range selection to metric fetching:
//!
//! - **session**: `DashboardSession`, one keyed fetch task per metric, stale
//!   results discarded on arrival
//! - **card**: Display-ready text for a metric panel
//!
//! # Flow
//!
//! ```text
//! select_range(from, to) ─► DateRangeValidator ─► refresh()
//!                                                    │  spawn per metric, key = (metric, range)
//!                                                    ▼
//!                       next_update() ◄── mpsc ◄── fetch task
//!                          │ key == active key? apply : discard
//!                          ▼
//!                        Panel ─► Card
//! ```

pub mod card;
pub mod session;

pub use card::{Card, CardRow, CardStatus};
pub use session::{DashboardSession, FetchKey, Notification, Panel, PanelState, Severity};
