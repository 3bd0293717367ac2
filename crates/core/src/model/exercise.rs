use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::model::{Article, Question, VocabEntry};

/// Number of wrong options drawn for plural and translation exercises.
pub const DISTRACTOR_COUNT: usize = 2;

/// What an exercise asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseKind {
    Plural,
    Article,
    Translation,
    /// A stored grammar or comprehension question.
    Question,
}

/// The atomic gradable unit: one multiple-choice question.
///
/// Option order only affects display; grading compares against
/// `correct_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub kind: ExerciseKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl Exercise {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            kind: ExerciseKind::Question,
            prompt: question.question.clone(),
            options: question.options.clone(),
            correct_index: question.correct_index,
        }
    }

    /// Whether `choice` (zero-based) is the right option.
    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_index)
            .map_or("", String::as_str)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

/// Expand one lexical entry into its plural, article and translation exercises.
///
/// Distractors come from `corpus`, excluding the entry itself and any option
/// spelled exactly like the right answer. A corpus too small to supply
/// `DISTRACTOR_COUNT` distinct distractors yields fewer options instead of failing.
pub fn vocab_exercises<R: Rng + ?Sized>(
    entry: &VocabEntry,
    corpus: &[VocabEntry],
    rng: &mut R,
) -> Vec<Exercise> {
    let others = || corpus.iter().filter(|other| other.word != entry.word);

    let (options, correct_index) = with_distractors(
        &entry.plural,
        others().map(|other| other.plural.as_str()),
        rng,
    );
    let plural = Exercise {
        kind: ExerciseKind::Plural,
        prompt: format!("Qual è il plurale di '{}'?", entry.word),
        options,
        correct_index,
    };

    let article = Exercise {
        kind: ExerciseKind::Article,
        prompt: format!(
            "Qual è l'articolo determinativo corretto per '{}'?",
            entry.word
        ),
        options: Article::ALL.iter().map(|a| a.as_str().to_owned()).collect(),
        correct_index: Article::ALL
            .iter()
            .position(|a| *a == entry.article)
            .unwrap_or(0),
    };

    let (options, correct_index) = with_distractors(
        &entry.translation,
        others().map(|other| other.translation.as_str()),
        rng,
    );
    let translation = Exercise {
        kind: ExerciseKind::Translation,
        prompt: format!("Cosa significa '{}'?", entry.word),
        options,
        correct_index,
    };

    vec![plural, article, translation]
}

/// Generate the exercises for `entry` and keep a single random one.
pub fn random_vocab_exercise<R: Rng + ?Sized>(
    entry: &VocabEntry,
    corpus: &[VocabEntry],
    rng: &mut R,
) -> Exercise {
    let mut exercises = vocab_exercises(entry, corpus, rng);
    let pick = rng.random_range(0..exercises.len());
    exercises.swap_remove(pick)
}

fn with_distractors<'a, R: Rng + ?Sized>(
    correct: &str,
    candidates: impl Iterator<Item = &'a str>,
    rng: &mut R,
) -> (Vec<String>, usize) {
    let mut pool: Vec<&str> = Vec::new();
    for candidate in candidates {
        if candidate != correct && !pool.contains(&candidate) {
            pool.push(candidate);
        }
    }

    let mut options: Vec<String> = std::iter::once(correct.to_owned())
        .chain(
            pool.choose_multiple(rng, DISTRACTOR_COUNT)
                .map(|s| (*s).to_owned()),
        )
        .collect();
    options.shuffle(rng);

    let correct_index = options.iter().position(|o| o == correct).unwrap_or(0);
    (options, correct_index)
}
