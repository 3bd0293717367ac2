use thiserror::Error;

use crate::model::Exercise;

/// Fraction of correct answers needed to pass a level.
///
/// `Score::passed` compares with exact integer arithmetic against 4/5.
pub const PASS_THRESHOLD: f64 = 0.8;

const PASS_NUMERATOR: u64 = 4;
const PASS_DENOMINATOR: u64 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("a level must contain at least one exercise")]
    EmptyLevel,

    #[error("correct answers ({correct}) exceed total exercises ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

/// Result of one level attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    correct: u32,
    total: u32,
}

impl Score {
    /// # Errors
    ///
    /// Returns `ScoreError::EmptyLevel` when `total` is zero and
    /// `ScoreError::CorrectExceedsTotal` when the counts are inconsistent.
    pub fn new(correct: u32, total: u32) -> Result<Self, ScoreError> {
        if total == 0 {
            return Err(ScoreError::EmptyLevel);
        }
        if correct > total {
            return Err(ScoreError::CorrectExceedsTotal { correct, total });
        }
        Ok(Self { correct, total })
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// `correct / total`, always in `[0, 1]`.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        f64::from(self.correct) / f64::from(self.total)
    }

    /// `ratio() >= PASS_THRESHOLD`, without floating-point rounding.
    #[must_use]
    pub fn passed(&self) -> bool {
        u64::from(self.correct) * PASS_DENOMINATOR >= u64::from(self.total) * PASS_NUMERATOR
    }
}

/// Grade every exercise with `judge` and score the attempt.
///
/// # Errors
///
/// Returns `ScoreError::EmptyLevel` if `exercises` is empty.
pub fn evaluate<F>(exercises: &[Exercise], mut judge: F) -> Result<Score, ScoreError>
where
    F: FnMut(&Exercise) -> bool,
{
    let total = u32::try_from(exercises.len()).unwrap_or(u32::MAX);
    let mut correct = 0_u32;
    for exercise in exercises {
        if judge(exercise) {
            correct = correct.saturating_add(1);
        }
    }
    Score::new(correct.min(total), total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExerciseKind, Question};

    #[test]
    fn exactly_eighty_percent_passes() {
        assert!(Score::new(4, 5).unwrap().passed());
        assert!(Score::new(8, 10).unwrap().passed());
    }

    #[test]
    fn just_below_threshold_fails() {
        let score = Score::new(11, 14).unwrap();
        assert!(score.ratio() < PASS_THRESHOLD);
        assert!(!score.passed());
        assert!(!Score::new(2, 3).unwrap().passed());
    }

    #[test]
    fn perfect_score_passes() {
        let score = Score::new(3, 3).unwrap();
        assert!(score.passed());
        assert!((score.ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_total_is_rejected() {
        assert_eq!(Score::new(0, 0).unwrap_err(), ScoreError::EmptyLevel);
    }

    #[test]
    fn inconsistent_counts_are_rejected() {
        assert!(matches!(
            Score::new(4, 3),
            Err(ScoreError::CorrectExceedsTotal { correct: 4, total: 3 })
        ));
    }

    #[test]
    fn evaluate_counts_judged_answers() {
        let question = Question {
            question: "Q".into(),
            options: vec!["a".into(), "b".into()],
            correct_index: 0,
        };
        let exercises: Vec<Exercise> = (0..5).map(|_| Exercise::from_question(&question)).collect();

        let mut seen = 0;
        let score = evaluate(&exercises, |exercise| {
            assert_eq!(exercise.kind, ExerciseKind::Question);
            seen += 1;
            seen != 3
        })
        .unwrap();

        assert_eq!(score.correct(), 4);
        assert_eq!(score.total(), 5);
        assert!(score.passed());
    }

    #[test]
    fn evaluate_rejects_empty_level() {
        let err = evaluate(&[], |_| true).unwrap_err();
        assert_eq!(err, ScoreError::EmptyLevel);
    }
}
