//! Derived, non-mutating reads over the usage summary.
//!
//! All three follow the same sort-descending-then-slice pattern.

use crate::usage::UsageAggregate;

impl UsageAggregate {
    /// Top `limit` categories by view count, descending. Ties break by
    /// category name so the output is stable.
    pub fn popular_categories(&self, limit: usize) -> Vec<(String, u64)> {
        let mut entries: Vec<(String, u64)> = self
            .viewed_categories
            .iter()
            .map(|(category, count)| (category.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(limit);
        entries
    }

    /// Top `limit` hours of day (0-23) by interaction count, descending.
    pub fn most_active_hours(&self, limit: usize) -> Vec<(u8, u64)> {
        top_slots(&self.interactions_by_hour, limit)
    }

    /// Top `limit` weekdays (0 = Sunday) by interaction count, descending.
    pub fn most_active_days(&self, limit: usize) -> Vec<(u8, u64)> {
        top_slots(&self.interactions_by_day, limit)
    }
}

fn top_slots(histogram: &[u64], limit: usize) -> Vec<(u8, u64)> {
    let mut slots: Vec<(u8, u64)> = histogram
        .iter()
        .enumerate()
        .map(|(slot, count)| (slot as u8, *count))
        .collect();
    slots.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    slots.truncate(limit);
    slots
}
