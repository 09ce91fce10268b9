//! Common types and utilities shared across the rasterframe crates.

pub mod bbox;
pub mod error;
pub mod time;

pub use bbox::BoundingBox;
pub use error::{FrameError, Result};
pub use time::{parse_datetime, TimeRange};
