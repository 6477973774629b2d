//! End-to-end tracker scenarios against the mock collector.

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
async fn test_initialize_starts_a_session_and_syncs_it() {
    let collector = MockCollector::new();
    let tracker = tracker_with(&collector);

    tracker.initialize("u1").await;

    assert_eq!(tracker.usage().total_sessions, 1);
    assert!(tracker.session_started_at().is_some());
    assert_eq!(collector.batch_sizes(), vec![1]);
    assert_eq!(
        collector.captured_batches()[0].events[0].event_type(),
        "session_start"
    );
    assert_eq!(tracker.pending_events(), 0);
}

#[tokio::test]
async fn test_three_product_views_fold_into_category_counts() {
    let collector = MockCollector::new();
    let tracker = tracker_with(&collector);
    tracker.initialize("u1").await;

    for _ in 0..3 {
        tracker
            .track_item_view("p-7", ItemKind::Product, Some("electronics"))
            .await;
    }

    let usage = tracker.usage();
    assert_eq!(usage.total_products_viewed, 3);
    assert_eq!(usage.viewed_categories["electronics"], 3);
}

#[tokio::test]
async fn test_tenth_pending_event_triggers_exactly_one_batched_sync() {
    let collector = MockCollector::new();
    let tracker = tracker_with(&collector);
    tracker.initialize("u1").await;
    // initial forced sync delivered the session_start
    assert_eq!(collector.push_count(), 1);

    for i in 0..9 {
        tracker.track_search(&format!("query-{i}"), 1).await;
    }
    // nine pending: below threshold, nothing new pushed
    assert_eq!(collector.push_count(), 1);
    assert_eq!(tracker.pending_events(), 9);

    tracker.track_search("query-9", 1).await;

    assert_eq!(collector.batch_sizes(), vec![1, 10]);
    assert_eq!(tracker.pending_events(), 0);
}

#[tokio::test]
async fn test_batch_preserves_tracking_order() {
    let collector = MockCollector::new();
    let tracker = tracker_with(&collector);
    tracker.initialize("u1").await;

    tracker
        .track_item_view("p-1", ItemKind::Product, Some("books"))
        .await;
    tracker.track_search("lamps", 4).await;
    tracker.track_apply_job("j-9").await;
    tracker.sync_now().await;

    let batches = collector.captured_batches();
    let types: Vec<&str> = batches
        .last()
        .unwrap()
        .events
        .iter()
        .map(|e| e.event_type())
        .collect();
    assert_eq!(types, vec!["view_product", "search", "apply_job"]);
}

#[tokio::test]
async fn test_end_session_forces_sync_below_threshold() {
    let collector = MockCollector::new();
    let tracker = tracker_with(&collector);
    tracker.initialize("u1").await;

    tracker.end_session().await;

    // one pending event was enough: the flush was forced
    assert_eq!(collector.batch_sizes(), vec![1, 1]);
    let last = collector.captured_batches().pop().unwrap();
    assert_eq!(last.events[0].event_type(), "session_end");
    assert!(last.usage.average_session_duration >= 0.0);
}

#[tokio::test]
async fn test_dispose_is_idempotent() {
    let collector = MockCollector::new();
    let tracker = tracker_with(&collector);
    tracker.initialize("u1").await;

    tracker.dispose().await;
    tracker.dispose().await;

    // initialize sync + one end-of-session sync, not two
    assert_eq!(collector.push_count(), 2);
}
