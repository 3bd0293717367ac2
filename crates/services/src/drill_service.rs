use std::sync::Arc;

use rand::Rng;

use drill_core::model::{Catalog, LevelIndex, LevelRef, ProgressState, Track};
use drill_core::review::{ReviewRefusal, can_review, select_batch};
use storage::repository::ProgressRepository;

use crate::error::{LevelError, ReviewSessionError};
use crate::progress_store::ProgressStore;
use crate::sessions::{
    LevelIntro, LevelOutcome, LevelSession, ReviewSession, ReviewSummary,
};
use crate::Clock;

/// One row of a level picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelListItem {
    pub index: LevelIndex,
    pub name: String,
    pub completed: bool,
}

/// Completed versus available levels of one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSummary {
    pub track: Track,
    pub completed: usize,
    pub total: usize,
}

/// Everything the presentation layer talks to.
///
/// Holds the read-only catalog, the progress store and the clock that decides
/// what "today" is.
pub struct DrillService {
    catalog: Arc<Catalog>,
    store: ProgressStore,
    clock: Clock,
}

impl DrillService {
    /// Load progress from `repo` (soft-failing to a fresh state) and wire up.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, repo: Arc<dyn ProgressRepository>, clock: Clock) -> Self {
        Self {
            catalog,
            store: ProgressStore::load(repo),
            clock,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn state(&self) -> &ProgressState {
        self.store.state()
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Levels of `track` in order, with completion flags.
    #[must_use]
    pub fn levels(&self, track: Track) -> Vec<LevelListItem> {
        let completed = self.store.state().completed(track);
        (0..self.catalog.level_count(track))
            .filter_map(LevelIndex::from_usize)
            .filter_map(|index| {
                let name = self.catalog.level_name(LevelRef::new(track, index))?;
                Some(LevelListItem {
                    index,
                    name: name.to_owned(),
                    completed: completed.contains(index),
                })
            })
            .collect()
    }

    #[must_use]
    pub fn track_summary(&self, track: Track) -> TrackSummary {
        let total = self.catalog.level_count(track);
        let completed = self
            .store
            .state()
            .completed(track)
            .iter()
            .filter(|index| index.as_usize() < total)
            .count();
        TrackSummary {
            track,
            completed,
            total,
        }
    }

    #[must_use]
    pub fn intro(&self, level: LevelRef) -> Option<LevelIntro<'_>> {
        LevelIntro::for_level(&self.catalog, level)
    }

    /// Start a fresh attempt at `level`.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::UnknownLevel` for an index outside the track.
    pub fn start_level<R: Rng + ?Sized>(
        &self,
        level: LevelRef,
        rng: &mut R,
    ) -> Result<LevelSession, LevelError> {
        LevelSession::start(&self.catalog, level, rng)
    }

    /// Score a finished attempt and record it if it passed.
    ///
    /// # Errors
    ///
    /// See `LevelSession::finish`.
    pub fn finish_level(&mut self, session: LevelSession) -> Result<LevelOutcome, LevelError> {
        session.finish(&self.catalog, &mut self.store)
    }

    /// Whether the daily review can run today.
    ///
    /// # Errors
    ///
    /// Returns the `ReviewRefusal` that applies.
    pub fn review_availability(&self) -> Result<(), ReviewRefusal> {
        can_review(self.store.state(), self.clock.today())
    }

    /// Sample today's review batch.
    ///
    /// # Errors
    ///
    /// Returns the `ReviewRefusal` that applies.
    pub fn start_review<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ReviewSession, ReviewRefusal> {
        self.review_availability()?;
        let batch = select_batch(self.store.state(), self.catalog.corpus(), rng);
        Ok(ReviewSession::new(batch))
    }

    /// Commit a finished review for today.
    ///
    /// # Errors
    ///
    /// See `ReviewSession::finish`.
    pub fn finish_review(
        &mut self,
        session: ReviewSession,
    ) -> Result<ReviewSummary, ReviewSessionError> {
        session.finish(&mut self.store, self.clock.today())
    }
}
