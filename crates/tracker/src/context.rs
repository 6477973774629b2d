//! The tracker context object.
//!
//! One `Tracker` per process, constructed explicitly with its storage and
//! collector injected — no hidden globals. Every failure inside the
//! tracker is swallowed here and logged; the host application's flow never
//! depends on telemetry succeeding.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};
use validator::Validate;

use aggregate::UsageAggregate;
use collector_client::{Collector, SyncCoordinator, SyncOutcome};
use store::{EventLog, KeyValueStore, USAGE_KEY};
use tracker_core::{
    AnalyticsEvent, EventPayload, GeoPoint, SessionEndData, SessionState, SYNC_BATCH_THRESHOLD,
};

/// Tracker tuning knobs.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Pending-event count that triggers an opportunistic sync
    pub batch_threshold: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            batch_threshold: SYNC_BATCH_THRESHOLD,
        }
    }
}

/// Client-side usage tracker.
pub struct Tracker {
    store: Arc<dyn KeyValueStore>,
    log: EventLog,
    usage: RwLock<UsageAggregate>,
    sync: SyncCoordinator,
    user_id: RwLock<Option<String>>,
    session: RwLock<Option<SessionState>>,
}

impl Tracker {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        collector: Arc<dyn Collector>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            log: EventLog::new(store.clone()),
            store,
            usage: RwLock::new(UsageAggregate::default()),
            sync: SyncCoordinator::with_threshold(collector, config.batch_threshold),
            user_id: RwLock::new(None),
            session: RwLock::new(None),
        }
    }

    /// Sets the owning user, restores persisted state, opens a session,
    /// and force-flushes anything left over from a previous run.
    ///
    /// Calling again while a session is open is a warned no-op; calling
    /// after `end_session` opens a fresh session for the same or a new
    /// user.
    pub async fn initialize(&self, user_id: impl Into<String>) {
        if self.session.read().is_some() {
            warn!("Tracker already initialized with an open session, ignoring");
            return;
        }

        let user_id = user_id.into();
        let first_run = self.user_id.read().is_none();
        if first_run {
            self.log.load().await;
            self.restore_usage().await;
        }
        *self.user_id.write() = Some(user_id.clone());
        *self.session.write() = Some(SessionState::begin(&user_id));

        debug!(user_id = %user_id, "Tracker initialized");
        self.record(EventPayload::SessionStart, None).await;
        self.flush(true).await;
    }

    /// Records one event. Warned no-op until `initialize` has set an
    /// owner; never fails from the caller's point of view.
    pub async fn track_event(&self, payload: EventPayload, location: Option<GeoPoint>) {
        if self.user_id.read().is_none() {
            warn!(
                event_type = payload.event_type(),
                "Tracker not initialized, dropping event"
            );
            return;
        }
        self.record(payload, location).await;
    }

    /// Closes the current session: emits session_end carrying the
    /// duration and forces a flush regardless of pending count.
    pub async fn end_session(&self) {
        let duration_seconds = match self.session.read().as_ref() {
            Some(session) => session.duration_seconds(),
            None => {
                warn!("No active session to end");
                return;
            }
        };

        self.record(
            EventPayload::SessionEnd(SessionEndData { duration_seconds }),
            None,
        )
        .await;
        *self.session.write() = None;
        self.flush(true).await;
    }

    /// Ends the session if one is open. Idempotent.
    pub async fn dispose(&self) {
        if self.session.read().is_some() {
            self.end_session().await;
        }
    }

    /// Forces a flush attempt outside the normal triggers.
    pub async fn sync_now(&self) {
        self.flush(true).await;
    }

    /// Snapshot of the current usage summary.
    pub fn usage(&self) -> UsageAggregate {
        self.usage.read().clone()
    }

    /// Events awaiting collector acknowledgment.
    pub fn pending_events(&self) -> usize {
        self.log.len()
    }

    pub fn is_initialized(&self) -> bool {
        self.user_id.read().is_some()
    }

    /// Start time of the open session, if any.
    pub fn session_started_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.session.read().as_ref().map(|s| s.started_at)
    }

    /// Append, fold, persist, then opportunistic sync. All failures are
    /// logged and swallowed.
    async fn record(&self, payload: EventPayload, location: Option<GeoPoint>) {
        let user_id = match self.user_id.read().clone() {
            Some(user_id) => user_id,
            None => return,
        };

        let event = AnalyticsEvent::new(user_id, payload, location);
        if let Err(e) = event.validate() {
            warn!(event_type = event.event_type(), error = %e, "Dropping invalid event");
            return;
        }

        if let Some(session) = self.session.write().as_mut() {
            session.record_event();
        }

        if let Err(e) = self.log.append(event.clone()).await {
            warn!(error = %e, "Failed to persist event log");
        }

        let snapshot = {
            let mut usage = self.usage.write();
            usage.apply(&event);
            usage.clone()
        };
        self.persist_usage(&snapshot).await;

        self.flush(false).await;
    }

    async fn flush(&self, force: bool) {
        let usage = self.usage.read().clone();
        match self.sync.flush(&self.log, &usage, force).await {
            Ok(SyncOutcome::Flushed { sent }) => {
                debug!(sent, "Sync flushed");
            }
            Ok(_) => {}
            Err(e) => {
                // best-effort delivery: events stay pending until the next
                // threshold crossing or forced flush
                warn!(error = %e, "Sync failed, events retained");
            }
        }
    }

    async fn restore_usage(&self) {
        let restored = match self.store.load(USAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<UsageAggregate>(&raw) {
                Ok(usage) => usage,
                Err(e) => {
                    warn!(error = %e, "Persisted usage data unreadable, starting zeroed");
                    UsageAggregate::default()
                }
            },
            Ok(None) => UsageAggregate::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted usage data, starting zeroed");
                UsageAggregate::default()
            }
        };
        *self.usage.write() = restored;
    }

    async fn persist_usage(&self, usage: &UsageAggregate) {
        let raw = match serde_json::to_string(usage) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to serialize usage data");
                return;
            }
        };
        if let Err(e) = self.store.save(USAGE_KEY, &raw).await {
            warn!(error = %e, "Failed to persist usage data");
        }
    }

    #[cfg(test)]
    pub(crate) fn backdate_session_start(&self, seconds: i64) {
        if let Some(session) = self.session.write().as_mut() {
            session.started_at = session.started_at - chrono::Duration::seconds(seconds);
        }
    }
}
