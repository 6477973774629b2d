//! Sync failure handling and batch accounting.

use std::sync::Arc;

use integration_tests::mocks::MockCollector;
use store::MemoryStore;
use tracker::{Tracker, TrackerConfig};
use tracker_core::ItemKind;

fn tracker_with(collector: &MockCollector) -> Tracker {
    Tracker::new(
        Arc::new(MemoryStore::new()),
        Arc::new(collector.clone()),
        TrackerConfig::default(),
    )
}

#[tokio::test]
async fn test_failed_syncs_retain_events_until_the_next_trigger() {
    let collector = MockCollector::new();
    collector.set_should_fail(true);
    let tracker = tracker_with(&collector);

    tracker.initialize("u1").await;
    for i in 0..9 {
        tracker.track_search(&format!("query-{i}"), 1).await;
    }

    // the forced initial sync and the threshold crossing both failed;
    // nothing was delivered and nothing was lost
    assert_eq!(collector.push_count(), 0);
    assert_eq!(tracker.pending_events(), 10);

    // no retry timer exists: recovery happens on the next natural trigger
    collector.set_should_fail(false);
    tracker.track_search("query-9", 1).await;

    assert_eq!(collector.batch_sizes(), vec![11]);
    assert_eq!(tracker.pending_events(), 0);
}

#[tokio::test]
async fn test_push_carries_the_current_usage_snapshot() {
    let collector = MockCollector::new();
    let tracker = tracker_with(&collector);
    tracker.initialize("u1").await;

    tracker
        .track_item_view("p-1", ItemKind::Product, Some("electronics"))
        .await;
    tracker
        .track_item_view("p-2", ItemKind::Product, Some("electronics"))
        .await;
    tracker.sync_now().await;

    let last = collector.captured_batches().pop().unwrap();
    assert_eq!(last.usage.total_products_viewed, 2);
    assert_eq!(last.usage.viewed_categories["electronics"], 2);
    assert_eq!(last.usage.total_sessions, 1);
}

#[tokio::test]
async fn test_forced_sync_with_nothing_pending_sends_nothing() {
    let collector = MockCollector::new();
    let tracker = tracker_with(&collector);
    tracker.initialize("u1").await;

    let before = collector.push_count();
    tracker.sync_now().await;

    assert_eq!(collector.push_count(), before);
}

#[tokio::test]
async fn test_custom_batch_threshold_is_honored() {
    let collector = MockCollector::new();
    let tracker = Tracker::new(
        Arc::new(MemoryStore::new()),
        Arc::new(collector.clone()),
        TrackerConfig { batch_threshold: 3 },
    );
    tracker.initialize("u1").await;

    tracker.track_search("one", 1).await;
    tracker.track_search("two", 1).await;
    assert_eq!(collector.push_count(), 1);

    tracker.track_search("three", 1).await;
    assert_eq!(collector.batch_sizes(), vec![1, 3]);
}
