//! Per-feature tracking helpers.
//!
//! Thin wrappers that map domain actions onto the correct event type and
//! payload shape. They carry no state of their own; keeping them here is
//! what keeps event schemas consistent across the app's call sites.

use aggregate::UsageAggregate;

use tracker_core::{
    AnswerData, ApplyJobData, ContactSellerData, EventPayload, FavoriteData, GeoPoint,
    ItemKind, ItemViewData, QuestionData, SearchData, ShareItemData,
};

use crate::context::Tracker;

impl Tracker {
    /// Records a listing view for any marketplace item kind.
    pub async fn track_item_view(&self, item_id: &str, kind: ItemKind, category: Option<&str>) {
        let data = ItemViewData {
            item_id: item_id.to_string(),
            category: category.map(str::to_string),
        };
        let payload = match kind {
            ItemKind::Product => EventPayload::ViewProduct(data),
            ItemKind::Job => EventPayload::ViewJob(data),
            ItemKind::Consultation => EventPayload::ViewConsultation(data),
        };
        self.track_event(payload, None).await;
    }

    pub async fn track_search(&self, query: &str, results: u32) {
        self.track_event(
            EventPayload::Search(SearchData {
                query: query.to_string(),
                results,
            }),
            None,
        )
        .await;
    }

    /// Records a favorite being switched on (`favorited = true`) or off.
    pub async fn track_favorite_toggle(&self, item_id: &str, kind: ItemKind, favorited: bool) {
        let data = FavoriteData {
            item_id: item_id.to_string(),
            item_type: kind,
        };
        let payload = if favorited {
            EventPayload::FavoriteAdd(data)
        } else {
            EventPayload::FavoriteRemove(data)
        };
        self.track_event(payload, None).await;
    }

    pub async fn track_contact_seller(&self, item_id: &str, seller_id: &str) {
        self.track_event(
            EventPayload::ContactSeller(ContactSellerData {
                item_id: item_id.to_string(),
                seller_id: seller_id.to_string(),
            }),
            None,
        )
        .await;
    }

    pub async fn track_share_item(&self, item_id: &str, channel: Option<&str>) {
        self.track_event(
            EventPayload::ShareItem(ShareItemData {
                item_id: item_id.to_string(),
                channel: channel.map(str::to_string),
            }),
            None,
        )
        .await;
    }

    pub async fn track_apply_job(&self, job_id: &str) {
        self.track_event(
            EventPayload::ApplyJob(ApplyJobData {
                job_id: job_id.to_string(),
            }),
            None,
        )
        .await;
    }

    pub async fn track_ask_question(&self, question_id: &str) {
        self.track_event(
            EventPayload::AskQuestion(QuestionData {
                question_id: question_id.to_string(),
            }),
            None,
        )
        .await;
    }

    pub async fn track_answer_question(&self, question_id: &str, answer_id: &str) {
        self.track_event(
            EventPayload::AnswerQuestion(AnswerData {
                question_id: question_id.to_string(),
                answer_id: answer_id.to_string(),
            }),
            None,
        )
        .await;
    }

    /// Records the device moving to a new location snapshot.
    pub async fn track_location_change(&self, point: GeoPoint) {
        self.track_event(EventPayload::LocationChange, Some(point)).await;
    }

    /// Top categories from the current summary, for host-app surfaces
    /// like "popular near you".
    pub fn popular_categories(&self, limit: usize) -> Vec<(String, u64)> {
        self.usage().popular_categories(limit)
    }

    /// Current usage summary snapshot (alias kept close to the helpers
    /// that feed it).
    pub fn usage_summary(&self) -> UsageAggregate {
        self.usage()
    }
}
