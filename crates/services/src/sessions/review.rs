use chrono::NaiveDate;
use tracing::info;

use drill_core::review::{ReviewBatch, ReviewItem};

use super::progress::{AnswerFeedback, SessionProgress};
use crate::error::ReviewSessionError;
use crate::progress_store::ProgressStore;

/// Tally of a finished daily review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewSummary {
    pub correct: u32,
    pub total: usize,
    pub reviewed_on: NaiveDate,
}

/// The daily review: one pass over a sampled batch.
///
/// Answers are graded for feedback only; the review cannot be failed.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    items: Vec<ReviewItem>,
    current: usize,
    correct: u32,
}

impl ReviewSession {
    #[must_use]
    pub fn new(batch: ReviewBatch) -> Self {
        Self {
            items: batch.into_items(),
            current: 0,
            correct: 0,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&ReviewItem> {
        self.items.get(self.current)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.items.len()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.items.len(),
            answered: self.current.min(self.items.len()),
            remaining: self.items.len().saturating_sub(self.current),
            correct: self.correct,
            is_complete: self.is_complete(),
        }
    }

    /// Grade `choice` (zero-based) against the current question and advance.
    ///
    /// # Errors
    ///
    /// Returns `ReviewSessionError::Completed` after the last question and
    /// `ReviewSessionError::InvalidChoice` for an option that does not exist.
    pub fn answer_current(&mut self, choice: usize) -> Result<AnswerFeedback, ReviewSessionError> {
        let item = self.current_item().ok_or(ReviewSessionError::Completed)?;
        let exercise = &item.exercise;
        if choice >= exercise.option_count() {
            return Err(ReviewSessionError::InvalidChoice {
                choice,
                options: exercise.option_count(),
            });
        }
        let feedback = AnswerFeedback {
            correct: exercise.is_correct(choice),
            correct_option: exercise.correct_option().to_owned(),
        };
        self.record_current(feedback.correct)?;
        Ok(feedback)
    }

    /// Record an externally judged answer and advance.
    ///
    /// # Errors
    ///
    /// Returns `ReviewSessionError::Completed` after the last question.
    pub fn record_current(&mut self, correct: bool) -> Result<(), ReviewSessionError> {
        if self.is_complete() {
            return Err(ReviewSessionError::Completed);
        }
        if correct {
            self.correct = self.correct.saturating_add(1);
        }
        self.current += 1;
        Ok(())
    }

    /// Commit the review as done on `today`, whatever the score.
    ///
    /// # Errors
    ///
    /// Returns `ReviewSessionError::Incomplete` if questions remain and
    /// `ReviewSessionError::Storage` if the date cannot be saved.
    pub fn finish(
        self,
        store: &mut ProgressStore,
        today: NaiveDate,
    ) -> Result<ReviewSummary, ReviewSessionError> {
        if !self.is_complete() {
            return Err(ReviewSessionError::Incomplete {
                remaining: self.progress().remaining,
            });
        }

        store.record_review(today)?;
        info!(
            %today,
            correct = self.correct,
            total = self.items.len(),
            "daily review committed"
        );

        Ok(ReviewSummary {
            correct: self.correct,
            total: self.items.len(),
            reviewed_on: today,
        })
    }
}
