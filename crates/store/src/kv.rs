//! Key-value persistence seam.
//!
//! The tracker persists two documents: the tail-capped event log and the
//! usage aggregate. Both go through this trait so the device storage layer
//! stays swappable (file-backed in production, in-memory in tests).

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use tracker_core::{Error, Result};

/// Storage key for the persisted event log tail.
pub const EVENTS_KEY: &str = "ANALYTICS_EVENTS";

/// Storage key for the usage aggregate snapshot.
pub const USAGE_KEY: &str = "ANALYTICS_USAGE_DATA";

/// Async key-value store with JSON string values.
///
/// Implementations are tolerant of missing keys: `load` returns `Ok(None)`
/// and `remove` succeeds when the key is absent.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn save(&self, key: &str, value: &str) -> Result<()>;
    async fn load(&self, key: &str) -> Result<Option<String>>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store for tests and ephemeral use.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate storage failures for error-handling tests.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }

    /// Raw value under `key`, bypassing the failure flag.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn save(&self, key: &str, value: &str) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::storage("memory store failure injected"));
        }
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<String>> {
        if *self.should_fail.lock() {
            return Err(Error::storage("memory store failure injected"));
        }
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::storage("memory store failure injected"));
        }
        self.entries.lock().remove(key);
        Ok(())
    }
}
