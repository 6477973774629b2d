//! Continuously-updated usage summary.
//!
//! One aggregate per installed app instance. Each tracked event is folded
//! in incrementally; nothing ever replays the full log. The persisted form
//! is camelCase JSON and survives a save/load round trip field for field.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use tracker_core::{
    AnalyticsEvent, EventPayload, GeoPoint, AREA_TOLERANCE_DEG, MAX_RECENT_QUERIES,
    MAX_VISITED_AREAS,
};

/// A cluster of location-change events within [`AREA_TOLERANCE_DEG`] of a
/// reference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitedArea {
    /// Reference point (the first visit that opened the cluster)
    pub location: GeoPoint,
    pub visits: u64,
    pub last_visit: DateTime<Utc>,
}

impl VisitedArea {
    fn contains(&self, point: GeoPoint) -> bool {
        (self.location.latitude - point.latitude).abs() < AREA_TOLERANCE_DEG
            && (self.location.longitude - point.longitude).abs() < AREA_TOLERANCE_DEG
    }
}

/// The derived usage summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageAggregate {
    pub total_sessions: u64,
    pub total_products_viewed: u64,
    pub total_jobs_viewed: u64,
    pub total_consultations_viewed: u64,
    /// Running mean of session durations, seconds
    pub average_session_duration: f64,
    /// Up to 20 most-recent distinct queries, oldest first
    pub search_queries: Vec<String>,
    /// Category -> view count
    pub viewed_categories: BTreeMap<String, u64>,
    /// Interactions per hour of day, index = hour 0-23
    pub interactions_by_hour: [u64; 24],
    /// Interactions per weekday, index 0 = Sunday
    pub interactions_by_day: [u64; 7],
    /// Bounded visited-area clusters
    pub areas_visited: Vec<VisitedArea>,
}

impl UsageAggregate {
    /// Folds one event into the summary.
    ///
    /// Deterministic and side-effect-free; the persisted snapshot write
    /// happens in the tracker facade after the fold.
    pub fn apply(&mut self, event: &AnalyticsEvent) {
        match &event.payload {
            EventPayload::SessionStart => {
                self.total_sessions += 1;
            }
            EventPayload::SessionEnd(data) => {
                self.fold_session_duration(data.duration_seconds);
            }
            EventPayload::ViewProduct(data) => {
                self.total_products_viewed += 1;
                self.bump_category(data.category.as_deref());
            }
            EventPayload::ViewJob(data) => {
                self.total_jobs_viewed += 1;
                self.bump_category(data.category.as_deref());
            }
            EventPayload::ViewConsultation(data) => {
                self.total_consultations_viewed += 1;
                self.bump_category(data.category.as_deref());
            }
            EventPayload::Search(data) => {
                self.push_query(&data.query);
            }
            EventPayload::LocationChange => {
                if let Some(point) = event.location {
                    self.visit_area(point, event.timestamp);
                }
            }
            EventPayload::FavoriteAdd(_)
            | EventPayload::FavoriteRemove(_)
            | EventPayload::ContactSeller(_)
            | EventPayload::ShareItem(_)
            | EventPayload::ApplyJob(_)
            | EventPayload::AskQuestion(_)
            | EventPayload::AnswerQuestion(_) => {}
        }

        // every tracked event counts as an interaction
        self.record_interaction(event.timestamp);
    }

    /// Running mean update, applied only on session end.
    ///
    /// Skips entirely when no session was ever started; a mean over zero
    /// sessions must not poison the persisted state with NaN.
    fn fold_session_duration(&mut self, duration_seconds: f64) {
        let n = self.total_sessions;
        if n == 0 {
            return;
        }
        self.average_session_duration =
            (self.average_session_duration * (n - 1) as f64 + duration_seconds) / n as f64;
    }

    /// Distinct recent queries, FIFO-capped at [`MAX_RECENT_QUERIES`].
    /// Re-tracking an existing query is a no-op.
    fn push_query(&mut self, query: &str) {
        if query.is_empty() || self.search_queries.iter().any(|q| q == query) {
            return;
        }
        self.search_queries.push(query.to_string());
        if self.search_queries.len() > MAX_RECENT_QUERIES {
            self.search_queries.remove(0);
        }
    }

    fn bump_category(&mut self, category: Option<&str>) {
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            *self.viewed_categories.entry(category.to_string()).or_insert(0) += 1;
        }
    }

    /// Joins the first cluster within tolerance, else opens a new one,
    /// evicting the least-visited cluster at capacity.
    fn visit_area(&mut self, point: GeoPoint, at: DateTime<Utc>) {
        if let Some(area) = self.areas_visited.iter_mut().find(|a| a.contains(point)) {
            area.visits += 1;
            area.last_visit = at;
            return;
        }

        if self.areas_visited.len() >= MAX_VISITED_AREAS {
            if let Some(least) = self
                .areas_visited
                .iter()
                .enumerate()
                .min_by_key(|(_, a)| a.visits)
                .map(|(i, _)| i)
            {
                self.areas_visited.remove(least);
            }
        }

        self.areas_visited.push(VisitedArea {
            location: point,
            visits: 1,
            last_visit: at,
        });
    }

    fn record_interaction(&mut self, at: DateTime<Utc>) {
        self.interactions_by_hour[at.hour() as usize] += 1;
        self.interactions_by_day[at.weekday().num_days_from_sunday() as usize] += 1;
    }
}
