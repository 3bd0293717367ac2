use thiserror::Error;

use crate::model::{CatalogError, QuestionError};
use crate::scoring::ScoreError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}
