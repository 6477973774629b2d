//! Core types, schemas, and limits for the Mercato usage tracker.

pub mod error;
pub mod event;
pub mod limits;
pub mod session;

pub use error::{Error, Result};
pub use event::*;
pub use limits::*;
pub use session::*;
