use rand::Rng;
use tracing::info;

use drill_core::model::exercise::vocab_exercises;
use drill_core::model::{
    Catalog, Exercise, LevelRef, ReviewContribution, Track, VocabEntry,
};
use drill_core::scoring::Score;

use super::progress::{AnswerFeedback, SessionProgress};
use crate::error::LevelError;
use crate::progress_store::ProgressStore;

//
// ─── INTRO ─────────────────────────────────────────────────────────────────────
//

/// Material shown before a level's exercises start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelIntro<'a> {
    Vocabulary { entries: &'a [VocabEntry] },
    Grammar { explanation: &'a str },
    Comprehension { passage: &'a str },
}

impl<'a> LevelIntro<'a> {
    #[must_use]
    pub fn for_level(catalog: &'a Catalog, level: LevelRef) -> Option<Self> {
        match level.track {
            Track::Vocabulary => catalog
                .vocab_level(level.index)
                .map(|l| LevelIntro::Vocabulary { entries: &l.items }),
            Track::Grammar => catalog.grammar_level(level.index).map(|l| LevelIntro::Grammar {
                explanation: &l.explanation,
            }),
            Track::Comprehension => catalog
                .comprehension_level(level.index)
                .map(|l| LevelIntro::Comprehension { passage: &l.passage }),
        }
    }
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Verdict of a finished level attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOutcome {
    pub level: LevelRef,
    pub score: Score,
    pub passed: bool,
    /// True only on the first pass of this level.
    pub newly_completed: bool,
}

/// What passing `level` adds to the review pool.
///
/// Vocabulary levels contribute their raw entries, since exercises are
/// regenerated at review time. Grammar and comprehension levels contribute a
/// snapshot of the whole level.
#[must_use]
pub fn review_contribution(catalog: &Catalog, level: LevelRef) -> Option<ReviewContribution> {
    match level.track {
        Track::Vocabulary => catalog
            .vocab_level(level.index)
            .map(|l| ReviewContribution::Vocabulary(l.items.clone())),
        Track::Grammar => catalog
            .grammar_level(level.index)
            .map(|l| ReviewContribution::Grammar(l.clone())),
        Track::Comprehension => catalog
            .comprehension_level(level.index)
            .map(|l| ReviewContribution::Comprehension(l.clone())),
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a level.
///
/// Steps through the exercises in order, counting correct answers. Every
/// attempt builds its exercises afresh, so vocabulary distractors differ
/// between retries.
#[derive(Debug, Clone)]
pub struct LevelSession {
    level: LevelRef,
    name: String,
    exercises: Vec<Exercise>,
    current: usize,
    correct: u32,
}

impl LevelSession {
    /// Build the exercises for `level`.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::UnknownLevel` if the catalog has no such level.
    pub fn start<R: Rng + ?Sized>(
        catalog: &Catalog,
        level: LevelRef,
        rng: &mut R,
    ) -> Result<Self, LevelError> {
        let unknown = || LevelError::UnknownLevel {
            track: level.track,
            index: level.index,
        };

        let (name, exercises) = match level.track {
            Track::Vocabulary => {
                let vocab = catalog.vocab_level(level.index).ok_or_else(unknown)?;
                let exercises = vocab
                    .items
                    .iter()
                    .flat_map(|entry| vocab_exercises(entry, catalog.corpus(), rng))
                    .collect();
                (vocab.name.clone(), exercises)
            }
            Track::Grammar => {
                let grammar = catalog.grammar_level(level.index).ok_or_else(unknown)?;
                let exercises = grammar.questions.iter().map(Exercise::from_question).collect();
                (grammar.name.clone(), exercises)
            }
            Track::Comprehension => {
                let comp = catalog
                    .comprehension_level(level.index)
                    .ok_or_else(unknown)?;
                let exercises = comp.questions.iter().map(Exercise::from_question).collect();
                (comp.name.clone(), exercises)
            }
        };

        Ok(Self {
            level,
            name,
            exercises,
            current: 0,
            correct: 0,
        })
    }

    #[must_use]
    pub fn level(&self) -> LevelRef {
        self.level
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.exercises.get(self.current)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.exercises.len()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.exercises.len(),
            answered: self.current.min(self.exercises.len()),
            remaining: self.exercises.len().saturating_sub(self.current),
            correct: self.correct,
            is_complete: self.is_complete(),
        }
    }

    /// Grade `choice` (zero-based) against the current exercise and advance.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::Completed` after the last exercise and
    /// `LevelError::InvalidChoice` for an option that does not exist.
    pub fn answer_current(&mut self, choice: usize) -> Result<AnswerFeedback, LevelError> {
        let exercise = self.current_exercise().ok_or(LevelError::Completed)?;
        if choice >= exercise.option_count() {
            return Err(LevelError::InvalidChoice {
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

    /// Record an externally judged answer for the current exercise and advance.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::Completed` after the last exercise.
    pub fn record_current(&mut self, correct: bool) -> Result<(), LevelError> {
        if self.is_complete() {
            return Err(LevelError::Completed);
        }
        if correct {
            self.correct = self.correct.saturating_add(1);
        }
        self.current += 1;
        Ok(())
    }

    /// Score of the answers recorded so far against all exercises.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::Score` if the level has no exercises.
    pub fn score(&self) -> Result<Score, LevelError> {
        let total = u32::try_from(self.exercises.len()).unwrap_or(u32::MAX);
        Ok(Score::new(self.correct.min(total), total)?)
    }

    /// Score the attempt and, on a pass, record the completion.
    ///
    /// A failed attempt leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns `LevelError::Incomplete` if exercises remain unanswered,
    /// `LevelError::Score` for a level without exercises, and
    /// `LevelError::Storage` if saving the completion fails.
    pub fn finish(
        self,
        catalog: &Catalog,
        store: &mut ProgressStore,
    ) -> Result<LevelOutcome, LevelError> {
        let score = self.score()?;
        if !self.is_complete() {
            return Err(LevelError::Incomplete {
                remaining: self.progress().remaining,
            });
        }

        let passed = score.passed();
        let mut newly_completed = false;
        if passed {
            let contribution =
                review_contribution(catalog, self.level).ok_or(LevelError::UnknownLevel {
                    track: self.level.track,
                    index: self.level.index,
                })?;
            newly_completed = store.mark_completed(self.level.index, contribution)?;
            if newly_completed {
                info!(
                    level = %self.level,
                    correct = score.correct(),
                    total = score.total(),
                    "level completed"
                );
            }
        }

        Ok(LevelOutcome {
            level: self.level,
            score,
            passed,
            newly_completed,
        })
    }
}
