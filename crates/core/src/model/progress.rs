use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::model::{ComprehensionLevel, GrammarLevel, LevelIndex, Track, VocabEntry};

//
// ─── COMPLETED LEVELS ──────────────────────────────────────────────────────────
//

/// Set of level indices the learner has passed at least once.
///
/// Each index appears at most once; inserting a present index changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedLevels(BTreeSet<LevelIndex>);

impl CompletedLevels {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the index was not present before.
    pub fn insert(&mut self, index: LevelIndex) -> bool {
        self.0.insert(index)
    }

    #[must_use]
    pub fn contains(&self, index: LevelIndex) -> bool {
        self.0.contains(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = LevelIndex> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<LevelIndex> for CompletedLevels {
    fn from_iter<I: IntoIterator<Item = LevelIndex>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

//
// ─── REVIEW POOL ───────────────────────────────────────────────────────────────
//

/// Items eligible for the daily review.
///
/// Grows monotonically; pushing an item equal to one already queued is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPool<T> {
    items: Vec<T>,
}

impl<T> Default for ReviewPool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: PartialEq> ReviewPool<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the item was added.
    pub fn push_unique(&mut self, item: T) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Returns how many of the given items were new.
    pub fn extend_unique(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        items
            .into_iter()
            .map(|item| usize::from(self.push_unique(item)))
            .sum()
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: PartialEq> FromIterator<T> for ReviewPool<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut pool = Self::new();
        pool.extend_unique(iter);
        pool
    }
}

//
// ─── REVIEW CONTRIBUTION ───────────────────────────────────────────────────────
//

/// What a passed level adds to its track's review pool.
///
/// Vocabulary contributes raw entries (exercises are regenerated at review
/// time); grammar and comprehension contribute a snapshot of the whole level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewContribution {
    Vocabulary(Vec<VocabEntry>),
    Grammar(GrammarLevel),
    Comprehension(ComprehensionLevel),
}

impl ReviewContribution {
    #[must_use]
    pub fn track(&self) -> Track {
        match self {
            ReviewContribution::Vocabulary(_) => Track::Vocabulary,
            ReviewContribution::Grammar(_) => Track::Grammar,
            ReviewContribution::Comprehension(_) => Track::Comprehension,
        }
    }
}

//
// ─── PROGRESS STATE ────────────────────────────────────────────────────────────
//

/// Everything persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    pub vocabulary_completed: CompletedLevels,
    pub grammar_completed: CompletedLevels,
    pub comprehension_completed: CompletedLevels,
    pub review_vocab: ReviewPool<VocabEntry>,
    pub review_grammar: ReviewPool<GrammarLevel>,
    pub review_comp: ReviewPool<ComprehensionLevel>,
    /// `None` until the first review session is committed.
    pub last_review: Option<NaiveDate>,
}

impl ProgressState {
    /// A fresh state: nothing completed, nothing to review, never reviewed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn completed(&self, track: Track) -> &CompletedLevels {
        match track {
            Track::Vocabulary => &self.vocabulary_completed,
            Track::Grammar => &self.grammar_completed,
            Track::Comprehension => &self.comprehension_completed,
        }
    }

    fn completed_mut(&mut self, track: Track) -> &mut CompletedLevels {
        match track {
            Track::Vocabulary => &mut self.vocabulary_completed,
            Track::Grammar => &mut self.grammar_completed,
            Track::Comprehension => &mut self.comprehension_completed,
        }
    }

    #[must_use]
    pub fn is_completed(&self, track: Track, index: LevelIndex) -> bool {
        self.completed(track).contains(index)
    }

    /// Record a pass of level `index` in the contribution's track.
    ///
    /// The first pass inserts the index and merges the contribution into the
    /// review pool. Later passes of the same level change nothing. Returns
    /// `true` when the state changed.
    pub fn mark_completed(&mut self, index: LevelIndex, contribution: ReviewContribution) -> bool {
        let track = contribution.track();
        if !self.completed_mut(track).insert(index) {
            return false;
        }

        match contribution {
            ReviewContribution::Vocabulary(entries) => {
                self.review_vocab.extend_unique(entries);
            }
            ReviewContribution::Grammar(level) => {
                self.review_grammar.push_unique(level);
            }
            ReviewContribution::Comprehension(level) => {
                self.review_comp.push_unique(level);
            }
        }
        true
    }

    #[must_use]
    pub fn review_pool_len(&self, track: Track) -> usize {
        match track {
            Track::Vocabulary => self.review_vocab.len(),
            Track::Grammar => self.review_grammar.len(),
            Track::Comprehension => self.review_comp.len(),
        }
    }

    /// True when no track has anything to review yet.
    #[must_use]
    pub fn review_pools_empty(&self) -> bool {
        Track::ALL
            .iter()
            .all(|track| self.review_pool_len(*track) == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Article, Question};

    fn haus() -> VocabEntry {
        VocabEntry::new("Haus", "Häuser", Article::Das, "casa")
    }

    fn grammar() -> GrammarLevel {
        GrammarLevel {
            name: "Grammatica 01".into(),
            explanation: "der, die, das".into(),
            questions: vec![Question {
                question: "Femminile?".into(),
                options: vec!["der".into(), "die".into(), "das".into()],
                correct_index: 1,
            }],
        }
    }

    #[test]
    fn fresh_state_is_empty_and_never_reviewed() {
        let state = ProgressState::new();
        assert!(state.review_pools_empty());
        assert!(state.last_review.is_none());
        for track in Track::ALL {
            assert!(state.completed(track).is_empty());
        }
    }

    #[test]
    fn completing_vocabulary_level_adds_its_entries() {
        let mut state = ProgressState::new();
        let changed =
            state.mark_completed(LevelIndex::new(0), ReviewContribution::Vocabulary(vec![haus()]));

        assert!(changed);
        assert!(state.is_completed(Track::Vocabulary, LevelIndex::new(0)));
        assert_eq!(state.review_vocab.items(), &[haus()]);
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let mut once = ProgressState::new();
        once.mark_completed(LevelIndex::new(4), ReviewContribution::Grammar(grammar()));

        let mut twice = once.clone();
        let changed = twice.mark_completed(LevelIndex::new(4), ReviewContribution::Grammar(grammar()));

        assert!(!changed);
        assert_eq!(once, twice);
        assert_eq!(twice.review_grammar.len(), 1);
    }

    #[test]
    fn different_levels_with_same_entry_do_not_duplicate_pool() {
        let mut state = ProgressState::new();
        state.mark_completed(LevelIndex::new(0), ReviewContribution::Vocabulary(vec![haus()]));
        state.mark_completed(LevelIndex::new(1), ReviewContribution::Vocabulary(vec![haus()]));

        assert_eq!(state.vocabulary_completed.len(), 2);
        assert_eq!(state.review_vocab.len(), 1);
    }

    #[test]
    fn contribution_routes_to_its_own_track() {
        let mut state = ProgressState::new();
        state.mark_completed(LevelIndex::new(2), ReviewContribution::Grammar(grammar()));

        assert!(state.is_completed(Track::Grammar, LevelIndex::new(2)));
        assert!(!state.is_completed(Track::Vocabulary, LevelIndex::new(2)));
        assert_eq!(state.review_pool_len(Track::Grammar), 1);
        assert_eq!(state.review_pool_len(Track::Vocabulary), 0);
    }

    #[test]
    fn completed_levels_iterate_in_ascending_order() {
        let set: CompletedLevels = [5, 1, 3, 1].into_iter().map(LevelIndex::new).collect();
        let values: Vec<u32> = set.iter().map(|i| i.value()).collect();
        assert_eq!(values, vec![1, 3, 5]);
    }
}
