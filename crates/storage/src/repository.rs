use drill_core::model::ProgressState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("stored progress is corrupt: {0}")]
    Corrupt(String),
}

/// Repository contract for the learner's progress blob.
///
/// There is exactly one state per storage location; `save` replaces it whole.
pub trait ProgressRepository: Send + Sync {
    /// Read the stored state.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` if stored data cannot be decoded, or
    /// other storage errors.
    fn load(&self) -> Result<Option<ProgressState>, StorageError>;

    /// Replace the stored state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the state cannot be written.
    fn save(&self, state: &ProgressState) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<Option<ProgressState>>>,
    saves: Arc<AtomicUsize>,
    corrupt: bool,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already saved state.
    #[must_use]
    pub fn with_state(state: ProgressState) -> Self {
        Self {
            state: Arc::new(Mutex::new(Some(state))),
            ..Self::default()
        }
    }

    /// A repository whose stored data never decodes, as if the file were garbage.
    #[must_use]
    pub fn corrupted() -> Self {
        Self {
            corrupt: true,
            ..Self::default()
        }
    }

    /// Number of successful `save` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Last saved state, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Option<ProgressState>, StorageError> {
        let guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

impl ProgressRepository for InMemoryRepository {
    fn load(&self) -> Result<Option<ProgressState>, StorageError> {
        if self.corrupt {
            return Err(StorageError::Corrupt("in-memory data marked corrupt".into()));
        }
        self.snapshot()
    }

    fn save(&self, state: &ProgressState) -> Result<(), StorageError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{Article, LevelIndex, ReviewContribution, VocabEntry};
    use drill_core::time::fixed_today;

    #[test]
    fn empty_repository_loads_nothing() {
        let repo = InMemoryRepository::new();
        assert!(repo.load().unwrap().is_none());
        assert_eq!(repo.save_count(), 0);
    }

    #[test]
    fn round_trips_state_and_counts_saves() {
        let repo = InMemoryRepository::new();
        let mut state = ProgressState::new();
        state.mark_completed(
            LevelIndex::new(0),
            ReviewContribution::Vocabulary(vec![VocabEntry::new(
                "Lager",
                "Lager",
                Article::Das,
                "magazzino",
            )]),
        );
        state.last_review = Some(fixed_today());

        repo.save(&state).unwrap();
        repo.save(&state).unwrap();

        assert_eq!(repo.load().unwrap(), Some(state));
        assert_eq!(repo.save_count(), 2);
    }

    #[test]
    fn corrupted_repository_reports_corruption() {
        let repo = InMemoryRepository::corrupted();
        assert!(matches!(repo.load(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn clones_share_the_same_slot() {
        let repo = InMemoryRepository::new();
        let other = repo.clone();
        repo.save(&ProgressState::new()).unwrap();
        assert!(other.load().unwrap().is_some());
    }
}
