//! Remote collector client and sync coordination.

pub mod client;
pub mod config;
pub mod coordinator;

pub use client::{Collector, HttpCollector, PushResult};
pub use config::CollectorConfig;
pub use coordinator::{SyncCoordinator, SyncOutcome};
