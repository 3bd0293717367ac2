#![forbid(unsafe_code)]

pub mod drill_service;
pub mod error;
pub mod progress_store;
pub mod sessions;

pub use drill_core::Clock;

pub use drill_service::{DrillService, LevelListItem, TrackSummary};
pub use error::{LevelError, ReviewSessionError};
pub use progress_store::ProgressStore;
pub use sessions::{
    AnswerFeedback, LevelIntro, LevelOutcome, LevelSession, ReviewSession, ReviewSummary,
    SessionProgress,
};
