//! Session handling types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The currently open tracking session.
///
/// One per `initialize`/`end_session` pair. Duration is computed at close
/// time from the recorded start; nothing here ticks in the background.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Owning user
    pub user_id: String,
    /// Session start time
    pub started_at: DateTime<Utc>,
    /// Events recorded in this session
    pub events_recorded: u64,
}

impl SessionState {
    /// Opens a session for the given user, starting now.
    pub fn begin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            started_at: Utc::now(),
            events_recorded: 0,
        }
    }

    /// Records one tracked event against this session.
    pub fn record_event(&mut self) {
        self.events_recorded += 1;
    }

    /// Session duration in seconds as of `now`.
    pub fn duration_since(&self, now: DateTime<Utc>) -> f64 {
        (now - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Session duration in seconds as of the current instant.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_since(Utc::now())
    }
}
