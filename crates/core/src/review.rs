use chrono::NaiveDate;
use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

use crate::model::exercise::random_vocab_exercise;
use crate::model::{Exercise, ProgressState, Question, Track, VocabEntry};

/// Vocabulary entries sampled per review session.
pub const VOCABULARY_REVIEW_CAP: usize = 3;
/// Grammar levels sampled per review session.
pub const GRAMMAR_REVIEW_CAP: usize = 2;
/// Comprehension levels sampled per review session.
pub const COMPREHENSION_REVIEW_CAP: usize = 1;

/// Per-track upper bound on sampled items.
#[must_use]
pub fn review_cap(track: Track) -> usize {
    match track {
        Track::Vocabulary => VOCABULARY_REVIEW_CAP,
        Track::Grammar => GRAMMAR_REVIEW_CAP,
        Track::Comprehension => COMPREHENSION_REVIEW_CAP,
    }
}

//
// ─── GATING ────────────────────────────────────────────────────────────────────
//

/// Why a review session cannot start. Each reason gets its own message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReviewRefusal {
    #[error("the daily review was already done today")]
    AlreadyReviewedToday,

    #[error("nothing to review yet")]
    NothingToReview,
}

/// Decide whether a review may start on `today`.
///
/// A review already committed today wins over empty pools.
///
/// # Errors
///
/// Returns the `ReviewRefusal` that applies.
pub fn can_review(state: &ProgressState, today: NaiveDate) -> Result<(), ReviewRefusal> {
    if state.last_review == Some(today) {
        return Err(ReviewRefusal::AlreadyReviewedToday);
    }
    if state.review_pools_empty() {
        return Err(ReviewRefusal::NothingToReview);
    }
    Ok(())
}

//
// ─── BATCH ─────────────────────────────────────────────────────────────────────
//

/// One review question and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub track: Track,
    /// Word for vocabulary items, level name otherwise.
    pub source: String,
    pub exercise: Exercise,
}

/// The sampled questions of one review session, grouped by track in menu order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewBatch {
    items: Vec<ReviewItem>,
}

impl ReviewBatch {
    #[must_use]
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<ReviewItem> {
        self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn count(&self, track: Track) -> usize {
        self.items.iter().filter(|item| item.track == track).count()
    }
}

/// Sample a review batch from the state's pools.
///
/// Each pool contributes `min(cap, len)` distinct items chosen uniformly. A
/// sampled vocabulary entry becomes one random exercise whose distractors
/// come from the current `corpus`; a sampled grammar or comprehension level
/// becomes one random question from its stored snapshot.
pub fn select_batch<R: Rng + ?Sized>(
    state: &ProgressState,
    corpus: &[VocabEntry],
    rng: &mut R,
) -> ReviewBatch {
    let mut items = Vec::new();

    let entries: Vec<&VocabEntry> = state
        .review_vocab
        .items()
        .choose_multiple(rng, VOCABULARY_REVIEW_CAP)
        .collect();
    for entry in entries {
        items.push(ReviewItem {
            track: Track::Vocabulary,
            source: entry.word.clone(),
            exercise: random_vocab_exercise(entry, corpus, rng),
        });
    }

    let grammar: Vec<(&str, &[Question])> = state
        .review_grammar
        .items()
        .choose_multiple(rng, GRAMMAR_REVIEW_CAP)
        .map(|level| (level.name.as_str(), level.questions.as_slice()))
        .collect();
    push_questions(&mut items, Track::Grammar, grammar, rng);

    let comprehension: Vec<(&str, &[Question])> = state
        .review_comp
        .items()
        .choose_multiple(rng, COMPREHENSION_REVIEW_CAP)
        .map(|level| (level.name.as_str(), level.questions.as_slice()))
        .collect();
    push_questions(&mut items, Track::Comprehension, comprehension, rng);

    ReviewBatch { items }
}

fn push_questions<R: Rng + ?Sized>(
    items: &mut Vec<ReviewItem>,
    track: Track,
    levels: Vec<(&str, &[Question])>,
    rng: &mut R,
) {
    for (name, questions) in levels {
        // Snapshots come from the progress file and may predate validation.
        let valid: Vec<&Question> = questions
            .iter()
            .filter(|question| question.validate().is_ok())
            .collect();
        let Some(question) = valid.choose(rng) else {
            continue;
        };
        items.push(ReviewItem {
            track,
            source: name.to_owned(),
            exercise: Exercise::from_question(question),
        });
    }
}
