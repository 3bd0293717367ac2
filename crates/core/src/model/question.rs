use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyPrompt,

    #[error("question '{prompt}' has no options")]
    NoOptions { prompt: String },

    #[error("question '{prompt}' points at option {index} but only has {len}")]
    CorrectIndexOutOfRange {
        prompt: String,
        index: usize,
        len: usize,
    },
}

/// A stored multiple-choice question of a grammar or comprehension level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl Question {
    /// Checks that the question can be asked and graded.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for an empty prompt, an empty option list, or a
    /// correct index that does not name an option.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.options.is_empty() {
            return Err(QuestionError::NoOptions {
                prompt: self.question.clone(),
            });
        }
        if self.correct_index >= self.options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                prompt: self.question.clone(),
                index: self.correct_index,
                len: self.options.len(),
            });
        }
        Ok(())
    }
}
