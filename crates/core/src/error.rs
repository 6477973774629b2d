//! Unified error types for the usage tracker.
//!
//! Everything here is recoverable by design: the tracker swallows these at
//! its public boundary and the host application never sees them. The inner
//! operations still return `Result` so failure handling stays testable.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the usage tracker.
#[derive(Debug, Error)]
pub enum Error {
    /// `track_event` was called before `initialize`.
    #[error("tracker not initialized: {0}")]
    Uninitialized(String),

    /// Local key-value persistence failed (read or write).
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Collector answered with a non-2xx status.
    #[error("collector rejected push with status {status}")]
    CollectorStatus { status: u16 },

    /// Collector was unreachable (transport error or timeout).
    #[error("collector unreachable: {0}")]
    CollectorTransport(String),

    /// Event payload failed schema validation.
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn uninitialized(msg: impl Into<String>) -> Self {
        Self::Uninitialized(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::CollectorTransport(msg.into())
    }

    pub fn invalid_event(msg: impl Into<String>) -> Self {
        Self::InvalidEvent(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True when the error came from the collector side (status or
    /// transport) rather than from local state.
    pub fn is_sync_failure(&self) -> bool {
        matches!(
            self,
            Self::CollectorStatus { .. } | Self::CollectorTransport(_)
        )
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidEvent(errors.to_string())
    }
}
