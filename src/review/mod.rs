//! Spaced repetition reviews
//!
//! - SM-2 scheduling as a pure function
//! - Due selection, review submission, stats and practice shuffles

pub mod algorithm;
mod models;
mod service;

pub use algorithm::{preview_intervals, schedule, Quality, MIN_EASINESS_FACTOR};
pub use models::ReviewStats;
pub use service::ReviewService;
