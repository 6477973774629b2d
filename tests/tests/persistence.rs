//! Persistence across process restarts, on the real file store, plus the
//! full HTTP wiring against a mock collector server.

use std::sync::Arc;

use httpmock::prelude::*;

use collector_client::{CollectorConfig, HttpCollector};
use integration_tests::mocks::MockCollector;
use store::{FileStore, FileStoreConfig, MemoryStore};
use tracker::{Tracker, TrackerConfig};
use tracker_core::ItemKind;

fn file_store(dir: &std::path::Path) -> Arc<FileStore> {
    Arc::new(
        FileStore::new(FileStoreConfig {
            dir: dir.to_path_buf(),
        })
        .unwrap(),
    )
}

#[tokio::test]
async fn test_state_survives_a_restart_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let collector = MockCollector::new();
    collector.set_should_fail(true); // keep everything local

    let first = Tracker::new(
        file_store(tmp.path()),
        Arc::new(collector.clone()),
        TrackerConfig::default(),
    );
    first.initialize("u1").await;
    first
        .track_item_view("p-1", ItemKind::Product, Some("electronics"))
        .await;
    first.end_session().await;
    drop(first);

    let second = Tracker::new(
        file_store(tmp.path()),
        Arc::new(collector.clone()),
        TrackerConfig::default(),
    );
    second.initialize("u1").await;

    let usage = second.usage();
    assert_eq!(usage.total_sessions, 2);
    assert_eq!(usage.total_products_viewed, 1);
    assert_eq!(usage.viewed_categories["electronics"], 1);
    // 3 unacknowledged events from the first run + this session_start
    assert_eq!(second.pending_events(), 4);
}

#[tokio::test]
async fn test_persisted_documents_use_the_documented_keys_and_shape() {
    let tmp = tempfile::tempdir().unwrap();
    let collector = MockCollector::new();
    collector.set_should_fail(true);

    let tracker = Tracker::new(
        file_store(tmp.path()),
        Arc::new(collector.clone()),
        TrackerConfig::default(),
    );
    tracker.initialize("u1").await;
    tracker.track_search("bikes", 2).await;

    let events_raw = std::fs::read_to_string(tmp.path().join("ANALYTICS_EVENTS.json")).unwrap();
    let events: serde_json::Value = serde_json::from_str(&events_raw).unwrap();
    assert_eq!(events.as_array().unwrap().len(), 2);
    assert_eq!(events[0]["eventType"], "session_start");
    assert_eq!(events[1]["data"]["query"], "bikes");

    let usage_raw = std::fs::read_to_string(tmp.path().join("ANALYTICS_USAGE_DATA.json")).unwrap();
    let usage: serde_json::Value = serde_json::from_str(&usage_raw).unwrap();
    assert_eq!(usage["totalSessions"], 1);
    assert_eq!(usage["searchQueries"][0], "bikes");
}

#[tokio::test]
async fn test_corrupt_event_log_starts_empty_and_keeps_working() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("ANALYTICS_EVENTS.json"), "{{{ not json").unwrap();

    let collector = MockCollector::new();
    let tracker = Tracker::new(
        file_store(tmp.path()),
        Arc::new(collector.clone()),
        TrackerConfig::default(),
    );
    tracker.initialize("u1").await;

    assert_eq!(tracker.usage().total_sessions, 1);
    assert_eq!(collector.batch_sizes(), vec![1]);
}

#[tokio::test]
async fn test_full_http_wiring_against_a_mock_server() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/analytics/events")
            .header("authorization", "Bearer session-token");
        then.status(202);
    });

    let collector = Arc::new(
        HttpCollector::new(CollectorConfig {
            base_url: server.base_url(),
            api_token: "session-token".into(),
            timeout_secs: 5,
        })
        .unwrap(),
    );
    let tracker = Tracker::new(
        Arc::new(MemoryStore::new()),
        collector,
        TrackerConfig::default(),
    );

    tracker.initialize("u1").await;
    tracker
        .track_item_view("p-1", ItemKind::Product, Some("electronics"))
        .await;
    tracker.end_session().await;

    // forced sync on initialize + forced sync on session end
    mock.assert_hits(2);
    assert_eq!(tracker.pending_events(), 0);
}
