//! Usage summary derived incrementally from tracked events.

pub mod report;
pub mod usage;

pub use usage::{UsageAggregate, VisitedArea};
