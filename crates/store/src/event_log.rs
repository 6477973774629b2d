//! Durable, ordered record of everything tracked.
//!
//! Events live in memory until the collector acknowledges them; the
//! persisted view is the most-recent-100 tail (see
//! [`tracker_core::limits::MAX_PERSISTED_EVENTS`]). Appends never reorder
//! and drains only remove from the front, so the log stays in
//! `track_event` invocation order.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::warn;

use tracker_core::{AnalyticsEvent, Result, MAX_PERSISTED_EVENTS};

use crate::kv::{KeyValueStore, EVENTS_KEY};

/// Append-only event log with tail-capped persistence.
pub struct EventLog {
    entries: Mutex<Vec<AnalyticsEvent>>,
    store: Arc<dyn KeyValueStore>,
}

impl EventLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            store,
        }
    }

    /// Restores the previously persisted tail.
    ///
    /// Fail-open: empty or unreadable storage starts an empty log. Never
    /// returns an error to the caller.
    pub async fn load(&self) {
        let restored = match self.store.load(EVENTS_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<AnalyticsEvent>>(&raw) {
                Ok(events) => events,
                Err(e) => {
                    warn!(error = %e, "Persisted event log unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted event log, starting empty");
                Vec::new()
            }
        };

        *self.entries.lock() = restored;
    }

    /// Appends an event and persists the tail-capped view.
    ///
    /// The event is in memory before persistence is attempted, so a
    /// storage failure (returned as `Err` for the caller to log) never
    /// loses it from the pending list.
    pub async fn append(&self, event: AnalyticsEvent) -> Result<()> {
        let tail = {
            let mut entries = self.entries.lock();
            entries.push(event);
            Self::persisted_view(&entries)
        };
        self.persist(&tail).await
    }

    /// Removes the first `n` events (after a confirmed sync) and
    /// re-persists. Returns how many were actually removed.
    pub async fn drain(&self, n: usize) -> Result<usize> {
        let (removed, tail) = {
            let mut entries = self.entries.lock();
            let removed = n.min(entries.len());
            entries.drain(..removed);
            (removed, Self::persisted_view(&entries))
        };
        self.persist(&tail).await?;
        Ok(removed)
    }

    /// Clone of the current pending sequence, oldest first.
    pub fn snapshot(&self) -> Vec<AnalyticsEvent> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn persisted_view(entries: &[AnalyticsEvent]) -> Vec<AnalyticsEvent> {
        let skip = entries.len().saturating_sub(MAX_PERSISTED_EVENTS);
        entries[skip..].to_vec()
    }

    async fn persist(&self, tail: &[AnalyticsEvent]) -> Result<()> {
        let raw = serde_json::to_string(tail)?;
        self.store.save(EVENTS_KEY, &raw).await
    }
}
