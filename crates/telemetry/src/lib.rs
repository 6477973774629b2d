//! Tracing initialization for the Mercato usage tracker.

pub mod tracing_setup;

pub use tracing_setup::*;
