//! Test fixtures and event builders.

use tracker_core::{
    AnalyticsEvent, EventPayload, GeoPoint, ItemViewData, SearchData, SessionEndData,
};

/// A session_start event for the default test user.
pub fn session_start() -> AnalyticsEvent {
    AnalyticsEvent::new("user-test", EventPayload::SessionStart, None)
}

/// A session_end event carrying `duration_seconds`.
pub fn session_end(duration_seconds: f64) -> AnalyticsEvent {
    AnalyticsEvent::new(
        "user-test",
        EventPayload::SessionEnd(SessionEndData { duration_seconds }),
        None,
    )
}

/// A product view in the given category.
pub fn product_view(category: &str) -> AnalyticsEvent {
    AnalyticsEvent::new(
        "user-test",
        EventPayload::ViewProduct(ItemViewData {
            item_id: "p-1".into(),
            category: Some(category.into()),
        }),
        None,
    )
}

/// A search event.
pub fn search(query: &str) -> AnalyticsEvent {
    AnalyticsEvent::new(
        "user-test",
        EventPayload::Search(SearchData {
            query: query.into(),
            results: 5,
        }),
        None,
    )
}

/// A location_change event at the given point.
pub fn location_change(latitude: f64, longitude: f64) -> AnalyticsEvent {
    AnalyticsEvent::new(
        "user-test",
        EventPayload::LocationChange,
        Some(GeoPoint::new(latitude, longitude)),
    )
}

/// N session_start events.
pub fn events(n: usize) -> Vec<AnalyticsEvent> {
    (0..n).map(|_| session_start()).collect()
}
