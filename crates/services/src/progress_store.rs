use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use drill_core::model::{LevelIndex, ProgressState, ReviewContribution};
use storage::repository::{ProgressRepository, StorageError};

/// Owns the learner's progress and writes it back after every change.
///
/// There is no batching: each mutating call saves before returning, so the
/// last completed call is what survives if the process is killed.
pub struct ProgressStore {
    repo: Arc<dyn ProgressRepository>,
    state: ProgressState,
}

impl ProgressStore {
    /// Load the stored state, falling back to a fresh one.
    ///
    /// Missing storage is the first-run case. Unreadable or corrupt storage is
    /// logged and replaced by a fresh state; it never blocks the learner.
    #[must_use]
    pub fn load(repo: Arc<dyn ProgressRepository>) -> Self {
        let state = match repo.load() {
            Ok(Some(state)) => {
                debug!(
                    vocabulary = state.vocabulary_completed.len(),
                    grammar = state.grammar_completed.len(),
                    comprehension = state.comprehension_completed.len(),
                    "progress loaded"
                );
                state
            }
            Ok(None) => {
                debug!("no stored progress, starting fresh");
                ProgressState::new()
            }
            Err(err) => {
                warn!(error = %err, "stored progress unreadable, starting fresh");
                ProgressState::new()
            }
        };
        Self { repo, state }
    }

    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Write the full state to storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the repository rejects the write.
    pub fn save(&self) -> Result<(), StorageError> {
        self.repo.save(&self.state).inspect_err(|err| {
            warn!(error = %err, "failed to save progress");
        })
    }

    /// Mark a level as passed and persist.
    ///
    /// Returns `false` without touching storage when the level was already
    /// completed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated state cannot be saved. The
    /// in-memory state keeps the completion either way.
    pub fn mark_completed(
        &mut self,
        index: LevelIndex,
        contribution: ReviewContribution,
    ) -> Result<bool, StorageError> {
        if !self.state.mark_completed(index, contribution) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Stamp `today` as the last review date and persist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated state cannot be saved.
    pub fn record_review(&mut self, today: NaiveDate) -> Result<(), StorageError> {
        self.state.last_review = Some(today);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{Article, Track, VocabEntry};
    use drill_core::time::fixed_today;
    use storage::repository::InMemoryRepository;

    fn lager() -> ReviewContribution {
        ReviewContribution::Vocabulary(vec![VocabEntry::new(
            "Lager",
            "Lager",
            Article::Das,
            "magazzino",
        )])
    }

    #[test]
    fn missing_storage_starts_fresh() {
        let repo = InMemoryRepository::new();
        let store = ProgressStore::load(Arc::new(repo.clone()));
        assert_eq!(store.state(), &ProgressState::new());
        assert_eq!(repo.save_count(), 0);
    }

    #[test]
    fn corrupt_storage_soft_resets() {
        let store = ProgressStore::load(Arc::new(InMemoryRepository::corrupted()));
        assert_eq!(store.state(), &ProgressState::new());
    }

    #[test]
    fn existing_state_is_loaded() {
        let mut saved = ProgressState::new();
        saved.last_review = Some(fixed_today());
        let store = ProgressStore::load(Arc::new(InMemoryRepository::with_state(saved.clone())));
        assert_eq!(store.state(), &saved);
    }

    #[test]
    fn completion_is_saved_once() {
        let repo = InMemoryRepository::new();
        let mut store = ProgressStore::load(Arc::new(repo.clone()));

        assert!(store.mark_completed(LevelIndex::new(0), lager()).unwrap());
        assert!(!store.mark_completed(LevelIndex::new(0), lager()).unwrap());

        assert_eq!(repo.save_count(), 1);
        let persisted = repo.snapshot().unwrap().unwrap();
        assert!(persisted.is_completed(Track::Vocabulary, LevelIndex::new(0)));
        assert_eq!(persisted.review_vocab.len(), 1);
    }

    #[test]
    fn review_date_is_persisted() {
        let repo = InMemoryRepository::new();
        let mut store = ProgressStore::load(Arc::new(repo.clone()));

        store.record_review(fixed_today()).unwrap();

        let persisted = repo.snapshot().unwrap().unwrap();
        assert_eq!(persisted.last_review, Some(fixed_today()));
    }
}
