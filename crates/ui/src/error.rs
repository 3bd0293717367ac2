use std::io;

use thiserror::Error;

use services::{LevelError, ReviewSessionError};

/// Failures that end the console loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UiError {
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Review(#[from] ReviewSessionError),
}
