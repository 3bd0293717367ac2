use serde::Deserialize;
use thiserror::Error;

use crate::model::{
    ComprehensionLevel, GrammarLevel, LevelIndex, LevelRef, Question, QuestionError, Track,
    VocabEntry, VocabLevel,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Content defects found while building the catalog.
///
/// All of these are authoring mistakes: the program refuses to start rather
/// than run a level that cannot be scored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("{track} level {number} ('{name}') has no exercises")]
    EmptyLevel {
        track: Track,
        number: u64,
        name: String,
    },

    #[error("{track} level {number} ('{name}') has an empty name")]
    EmptyName {
        track: Track,
        number: u64,
        name: String,
    },

    #[error("{track} level {number}: {source}")]
    InvalidQuestion {
        track: Track,
        number: u64,
        #[source]
        source: QuestionError,
    },

    #[error("{track} track has too many levels: {len}")]
    TooManyLevels { track: Track, len: usize },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated content as read from a content file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDraft {
    #[serde(default)]
    pub vocabulary: Vec<VocabLevel>,
    #[serde(default)]
    pub grammar: Vec<GrammarLevel>,
    #[serde(default)]
    pub comprehension: Vec<ComprehensionLevel>,
}

impl CatalogDraft {
    /// Validate the draft into an immutable catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for empty levels, empty names or malformed questions.
    pub fn validate(self) -> Result<Catalog, CatalogError> {
        for (position, level) in self.vocabulary.iter().enumerate() {
            check_level(Track::Vocabulary, position, &level.name, level.items.len(), &[])?;
        }
        for (position, level) in self.grammar.iter().enumerate() {
            check_level(
                Track::Grammar,
                position,
                &level.name,
                level.questions.len(),
                &level.questions,
            )?;
        }
        for (position, level) in self.comprehension.iter().enumerate() {
            check_level(
                Track::Comprehension,
                position,
                &level.name,
                level.questions.len(),
                &level.questions,
            )?;
        }
        check_len(Track::Vocabulary, self.vocabulary.len())?;
        check_len(Track::Grammar, self.grammar.len())?;
        check_len(Track::Comprehension, self.comprehension.len())?;

        let corpus = self
            .vocabulary
            .iter()
            .flat_map(|level| level.items.iter().cloned())
            .collect();

        Ok(Catalog {
            vocabulary: self.vocabulary,
            grammar: self.grammar,
            comprehension: self.comprehension,
            corpus,
        })
    }
}

fn check_level(
    track: Track,
    position: usize,
    name: &str,
    exercise_count: usize,
    questions: &[Question],
) -> Result<(), CatalogError> {
    let number = position as u64 + 1;
    if name.trim().is_empty() {
        return Err(CatalogError::EmptyName {
            track,
            number,
            name: name.to_owned(),
        });
    }
    if exercise_count == 0 {
        return Err(CatalogError::EmptyLevel {
            track,
            number,
            name: name.to_owned(),
        });
    }
    for question in questions {
        question
            .validate()
            .map_err(|source| CatalogError::InvalidQuestion {
                track,
                number,
                source,
            })?;
    }
    Ok(())
}

fn check_len(track: Track, len: usize) -> Result<(), CatalogError> {
    if u32::try_from(len).is_err() {
        return Err(CatalogError::TooManyLevels { track, len });
    }
    Ok(())
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The immutable level definitions for all three tracks.
///
/// Loaded once at startup and shared read-only. Levels are addressed by
/// `LevelRef`; their positions never change while the program runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    vocabulary: Vec<VocabLevel>,
    grammar: Vec<GrammarLevel>,
    comprehension: Vec<ComprehensionLevel>,
    corpus: Vec<VocabEntry>,
}

impl Catalog {
    #[must_use]
    pub fn vocabulary_levels(&self) -> &[VocabLevel] {
        &self.vocabulary
    }

    #[must_use]
    pub fn grammar_levels(&self) -> &[GrammarLevel] {
        &self.grammar
    }

    #[must_use]
    pub fn comprehension_levels(&self) -> &[ComprehensionLevel] {
        &self.comprehension
    }

    /// Every vocabulary entry of every level, in track order.
    ///
    /// This is the pool distractor options are drawn from.
    #[must_use]
    pub fn corpus(&self) -> &[VocabEntry] {
        &self.corpus
    }

    #[must_use]
    pub fn level_count(&self, track: Track) -> usize {
        match track {
            Track::Vocabulary => self.vocabulary.len(),
            Track::Grammar => self.grammar.len(),
            Track::Comprehension => self.comprehension.len(),
        }
    }

    #[must_use]
    pub fn contains(&self, level: LevelRef) -> bool {
        level.index.as_usize() < self.level_count(level.track)
    }

    #[must_use]
    pub fn level_name(&self, level: LevelRef) -> Option<&str> {
        let position = level.index.as_usize();
        match level.track {
            Track::Vocabulary => self.vocabulary.get(position).map(|l| l.name.as_str()),
            Track::Grammar => self.grammar.get(position).map(|l| l.name.as_str()),
            Track::Comprehension => self.comprehension.get(position).map(|l| l.name.as_str()),
        }
    }

    #[must_use]
    pub fn vocab_level(&self, index: LevelIndex) -> Option<&VocabLevel> {
        self.vocabulary.get(index.as_usize())
    }

    #[must_use]
    pub fn grammar_level(&self, index: LevelIndex) -> Option<&GrammarLevel> {
        self.grammar.get(index.as_usize())
    }

    #[must_use]
    pub fn comprehension_level(&self, index: LevelIndex) -> Option<&ComprehensionLevel> {
        self.comprehension.get(index.as_usize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Article;

    fn vocab_level(name: &str, items: Vec<VocabEntry>) -> VocabLevel {
        VocabLevel {
            name: name.into(),
            items,
        }
    }

    fn grammar_level(name: &str, questions: Vec<Question>) -> GrammarLevel {
        GrammarLevel {
            name: name.into(),
            explanation: "Regola".into(),
            questions,
        }
    }

    fn question(correct_index: usize) -> Question {
        Question {
            question: "Quale?".into(),
            options: vec!["a".into(), "b".into(), "c".into()],
            correct_index,
        }
    }

    #[test]
    fn corpus_flattens_all_vocabulary_levels() {
        let draft = CatalogDraft {
            vocabulary: vec![
                vocab_level(
                    "Uno",
                    vec![VocabEntry::new("Haus", "Häuser", Article::Das, "casa")],
                ),
                vocab_level(
                    "Due",
                    vec![
                        VocabEntry::new("Tisch", "Tische", Article::Der, "tavolo"),
                        VocabEntry::new("Tür", "Türen", Article::Die, "porta"),
                    ],
                ),
            ],
            ..CatalogDraft::default()
        };

        let catalog = draft.validate().unwrap();
        assert_eq!(catalog.level_count(Track::Vocabulary), 2);
        assert_eq!(catalog.corpus().len(), 3);
        assert_eq!(catalog.corpus()[2].word, "Tür");
    }

    #[test]
    fn empty_level_is_a_configuration_error() {
        let draft = CatalogDraft {
            grammar: vec![grammar_level("Vuoto", Vec::new())],
            ..CatalogDraft::default()
        };

        let err = draft.validate().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::EmptyLevel {
                track: Track::Grammar,
                number: 1,
                ..
            }
        ));
    }

    #[test]
    fn malformed_question_is_reported_with_its_level() {
        let draft = CatalogDraft {
            grammar: vec![
                grammar_level("Ok", vec![question(0)]),
                grammar_level("Rotto", vec![question(5)]),
            ],
            ..CatalogDraft::default()
        };

        let err = draft.validate().unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidQuestion { number: 2, .. }
        ));
    }

    #[test]
    fn lookups_respect_track_bounds() {
        let draft = CatalogDraft {
            grammar: vec![grammar_level("Articoli", vec![question(1)])],
            ..CatalogDraft::default()
        };
        let catalog = draft.validate().unwrap();

        let first = LevelRef::new(Track::Grammar, LevelIndex::new(0));
        let missing = LevelRef::new(Track::Grammar, LevelIndex::new(1));
        assert!(catalog.contains(first));
        assert!(!catalog.contains(missing));
        assert_eq!(catalog.level_name(first), Some("Articoli"));
        assert!(catalog.grammar_level(LevelIndex::new(1)).is_none());
    }
}
