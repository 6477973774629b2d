//! Event type definitions for the usage tracker.
//!
//! Wire and persisted form is camelCase JSON with the payload adjacently
//! tagged: `{"eventType": "search", "data": {"query": ...}, ...}`. Events
//! are immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// A latitude/longitude snapshot taken at event time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoPoint {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Marketplace listing kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Product,
    Job,
    Consultation,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Job => "job",
            Self::Consultation => "consultation",
        }
    }
}

/// Session end event data.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndData {
    /// Session duration in seconds
    #[validate(range(min = 0.0))]
    pub duration_seconds: f64,
}

/// Listing view event data (products, jobs, consultations).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemViewData {
    #[validate(length(min = 1, max = 64))]
    pub item_id: String,
    /// Listing category, feeds the viewed-categories aggregate
    #[validate(length(max = 100))]
    pub category: Option<String>,
}

/// Search event data.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    #[validate(length(min = 1, max = 256))]
    pub query: String,
    /// Result count shown to the user
    pub results: u32,
}

/// Favorite add/remove event data.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteData {
    #[validate(length(min = 1, max = 64))]
    pub item_id: String,
    pub item_type: ItemKind,
}

/// Contact-seller event data.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactSellerData {
    #[validate(length(min = 1, max = 64))]
    pub item_id: String,
    #[validate(length(min = 1, max = 128))]
    pub seller_id: String,
}

/// Share event data.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareItemData {
    #[validate(length(min = 1, max = 64))]
    pub item_id: String,
    /// Share target ("whatsapp", "copy_link", ...) when the platform
    /// reports one
    #[validate(length(max = 32))]
    pub channel: Option<String>,
}

/// Job application event data.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyJobData {
    #[validate(length(min = 1, max = 64))]
    pub job_id: String,
}

/// Community question event data.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionData {
    #[validate(length(min = 1, max = 64))]
    pub question_id: String,
}

/// Community answer event data.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnswerData {
    #[validate(length(min = 1, max = 64))]
    pub question_id: String,
    #[validate(length(min = 1, max = 64))]
    pub answer_id: String,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "eventType", content = "data", rename_all = "snake_case")]
pub enum EventPayload {
    SessionStart,
    SessionEnd(SessionEndData),
    ViewProduct(ItemViewData),
    ViewJob(ItemViewData),
    ViewConsultation(ItemViewData),
    Search(SearchData),
    FavoriteAdd(FavoriteData),
    FavoriteRemove(FavoriteData),
    ContactSeller(ContactSellerData),
    ShareItem(ShareItemData),
    ApplyJob(ApplyJobData),
    AskQuestion(QuestionData),
    AnswerQuestion(AnswerData),
    LocationChange,
}

impl EventPayload {
    /// Returns the event type as a string.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SessionStart => "session_start",
            Self::SessionEnd(_) => "session_end",
            Self::ViewProduct(_) => "view_product",
            Self::ViewJob(_) => "view_job",
            Self::ViewConsultation(_) => "view_consultation",
            Self::Search(_) => "search",
            Self::FavoriteAdd(_) => "favorite_add",
            Self::FavoriteRemove(_) => "favorite_remove",
            Self::ContactSeller(_) => "contact_seller",
            Self::ShareItem(_) => "share_item",
            Self::ApplyJob(_) => "apply_job",
            Self::AskQuestion(_) => "ask_question",
            Self::AnswerQuestion(_) => "answer_question",
            Self::LocationChange => "location_change",
        }
    }

    /// True for session boundary events.
    pub fn is_session_boundary(&self) -> bool {
        matches!(self, Self::SessionStart | Self::SessionEnd(_))
    }
}

impl Validate for EventPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::SessionStart | Self::LocationChange => Ok(()),
            Self::SessionEnd(d) => d.validate(),
            Self::ViewProduct(d) | Self::ViewJob(d) | Self::ViewConsultation(d) => d.validate(),
            Self::Search(d) => d.validate(),
            Self::FavoriteAdd(d) | Self::FavoriteRemove(d) => d.validate(),
            Self::ContactSeller(d) => d.validate(),
            Self::ShareItem(d) => d.validate(),
            Self::ApplyJob(d) => d.validate(),
            Self::AskQuestion(d) => d.validate(),
            Self::AnswerQuestion(d) => d.validate(),
        }
    }
}

/// A single analytics event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    /// Unique event ID
    pub id: Uuid,
    /// Owning user
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    /// Creation timestamp (ISO-8601 on the wire)
    pub timestamp: DateTime<Utc>,
    /// Typed payload, adjacently tagged as eventType/data
    #[serde(flatten)]
    #[validate(nested)]
    pub payload: EventPayload,
    /// Location snapshot at event time
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub location: Option<GeoPoint>,
}

impl AnalyticsEvent {
    /// Creates a new event with generated ID and current timestamp.
    pub fn new(user_id: impl Into<String>, payload: EventPayload, location: Option<GeoPoint>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            timestamp: Utc::now(),
            payload,
            location,
        }
    }

    pub fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }
}
