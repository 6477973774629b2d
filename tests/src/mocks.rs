//! Mock implementations for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use aggregate::UsageAggregate;
use collector_client::{Collector, PushResult};
use tracker_core::{AnalyticsEvent, Error, Result};

/// One captured `push` call.
#[derive(Clone)]
pub struct PushedBatch {
    pub events: Vec<AnalyticsEvent>,
    pub usage: UsageAggregate,
}

/// Mock collector that captures pushes in memory.
///
/// Implements the same `Collector` trait as the real `HttpCollector`, so
/// tests can verify the exact batches that would go over the wire without
/// a running collector service.
#[derive(Clone, Default)]
pub struct MockCollector {
    batches: Arc<Mutex<Vec<PushedBatch>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured batches, in push order.
    pub fn captured_batches(&self) -> Vec<PushedBatch> {
        self.batches.lock().clone()
    }

    /// Event counts per push, in push order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().iter().map(|b| b.events.len()).collect()
    }

    pub fn push_count(&self) -> usize {
        self.batches.lock().len()
    }

    /// Set failure mode for testing error handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

#[async_trait]
impl Collector for MockCollector {
    async fn push(&self, events: &[AnalyticsEvent], usage: &UsageAggregate) -> Result<PushResult> {
        if *self.should_fail.lock() {
            return Err(Error::transport("mock collector failure"));
        }

        self.batches.lock().push(PushedBatch {
            events: events.to_vec(),
            usage: usage.clone(),
        });

        Ok(PushResult {
            events_sent: events.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_mock_collector_captures_batches() {
        let mock = MockCollector::new();

        let events = vec![fixtures::session_start()];
        let result = mock
            .push(&events, &UsageAggregate::default())
            .await
            .unwrap();

        assert_eq!(result.events_sent, 1);
        assert_eq!(mock.push_count(), 1);
        assert_eq!(mock.batch_sizes(), vec![1]);
        assert_eq!(
            mock.captured_batches()[0].events[0].event_type(),
            "session_start"
        );
    }

    #[tokio::test]
    async fn test_mock_collector_failure_mode() {
        let mock = MockCollector::new();
        mock.set_should_fail(true);

        let result = mock.push(&[], &UsageAggregate::default()).await;
        assert!(result.is_err());
        assert_eq!(mock.push_count(), 0);
    }
}
