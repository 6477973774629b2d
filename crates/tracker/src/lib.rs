//! Usage tracker facade for the Mercato marketplace app.

pub mod context;
pub mod helpers;
pub mod location;

pub use context::{Tracker, TrackerConfig};
pub use location::{FixedLocation, LocationProvider, NoLocation};
