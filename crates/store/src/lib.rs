//! Local persistence for the Mercato usage tracker.

pub mod event_log;
pub mod file;
pub mod kv;

pub use event_log::EventLog;
pub use file::{FileStore, FileStoreConfig};
pub use kv::{KeyValueStore, MemoryStore, EVENTS_KEY, USAGE_KEY};
