//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::model::{LevelIndex, Track};
use drill_core::review::ReviewRefusal;
use drill_core::scoring::ScoreError;
use storage::repository::StorageError;

/// Errors emitted while running a level.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LevelError {
    #[error("no {track} level at index {index}")]
    UnknownLevel { track: Track, index: LevelIndex },
    #[error("all exercises of this level were already answered")]
    Completed,
    #[error("{remaining} exercises are still unanswered")]
    Incomplete { remaining: usize },
    #[error("option {choice} does not exist; this exercise has {options} options")]
    InvalidChoice { choice: usize, options: usize },
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the daily review.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReviewSessionError {
    #[error(transparent)]
    Refused(#[from] ReviewRefusal),
    #[error("all review questions were already answered")]
    Completed,
    #[error("{remaining} review questions are still unanswered")]
    Incomplete { remaining: usize },
    #[error("option {choice} does not exist; this exercise has {options} options")]
    InvalidChoice { choice: usize, options: usize },
    #[error(transparent)]
    Storage(#[from] StorageError),
}
