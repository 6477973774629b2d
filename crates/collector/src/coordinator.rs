//! Decides when pending events are transmitted and reconciles the log
//! with the outcome.
//!
//! Delivery is best-effort by design: a failed push leaves every event
//! pending and schedules nothing — the next attempt happens at the next
//! threshold crossing or forced flush. The single-slot lock makes the
//! non-reentrant contract explicit: one push in flight, ever.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use aggregate::UsageAggregate;
use store::EventLog;
use tracker_core::{Result, SYNC_BATCH_THRESHOLD};

use crate::client::Collector;

/// What a flush attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Pushed and drained `sent` events.
    Flushed { sent: usize },
    /// Not forced and below the batch threshold; nothing sent.
    BelowThreshold { pending: usize },
    /// Another push holds the slot; nothing sent.
    InFlight,
    /// Nothing pending.
    Empty,
}

/// Governs pushes to the remote collector.
pub struct SyncCoordinator {
    collector: Arc<dyn Collector>,
    /// Single-slot guard: at most one push in flight.
    in_flight: Mutex<()>,
    batch_threshold: usize,
}

impl SyncCoordinator {
    pub fn new(collector: Arc<dyn Collector>) -> Self {
        Self::with_threshold(collector, SYNC_BATCH_THRESHOLD)
    }

    pub fn with_threshold(collector: Arc<dyn Collector>, batch_threshold: usize) -> Self {
        Self {
            collector,
            in_flight: Mutex::new(()),
            batch_threshold,
        }
    }

    /// Attempts a flush.
    ///
    /// Takes a snapshot of the pending log, pushes it with the usage
    /// summary, and on success drains exactly the snapshot length —
    /// events appended while the push was in flight stay pending for the
    /// next cycle. On failure the log is untouched.
    pub async fn flush(
        &self,
        log: &EventLog,
        usage: &UsageAggregate,
        force: bool,
    ) -> Result<SyncOutcome> {
        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                debug!("Sync already in flight, skipping");
                return Ok(SyncOutcome::InFlight);
            }
        };

        let snapshot = log.snapshot();
        if snapshot.is_empty() {
            return Ok(SyncOutcome::Empty);
        }
        if !force && snapshot.len() < self.batch_threshold {
            return Ok(SyncOutcome::BelowThreshold {
                pending: snapshot.len(),
            });
        }

        let sent = snapshot.len();
        self.collector.push(&snapshot, usage).await?;

        // Persistence of the shrunk view can fail independently of the
        // push; the acknowledged events are already gone from memory.
        if let Err(e) = log.drain(sent).await {
            warn!(error = %e, "Failed to persist drained event log");
        }

        info!(sent, remaining = log.len(), "Flushed events to collector");
        Ok(SyncOutcome::Flushed { sent })
    }
}
