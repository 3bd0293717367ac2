use chrono::NaiveDate;
use drill_core::model::{
    CompletedLevels, ComprehensionLevel, GrammarLevel, LevelIndex, ProgressState, VocabEntry,
};
use serde::{Deserialize, Serialize};

/// On-disk shape of the progress file.
///
/// Field names match the historical `progress_b2.json` layout so existing
/// files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub vocabulary_completed: Vec<u32>,
    pub grammar_completed: Vec<u32>,
    pub comprehension_completed: Vec<u32>,
    pub review_vocab: Vec<VocabEntry>,
    pub review_grammar: Vec<GrammarLevel>,
    pub review_comp: Vec<ComprehensionLevel>,
    /// `YYYY-MM-DD`, or `null` if never reviewed.
    pub last_review: Option<NaiveDate>,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_state(state: &ProgressState) -> Self {
        Self {
            vocabulary_completed: indices(&state.vocabulary_completed),
            grammar_completed: indices(&state.grammar_completed),
            comprehension_completed: indices(&state.comprehension_completed),
            review_vocab: state.review_vocab.items().to_vec(),
            review_grammar: state.review_grammar.items().to_vec(),
            review_comp: state.review_comp.items().to_vec(),
            last_review: state.last_review,
        }
    }

    /// Convert the record back into domain state.
    ///
    /// Duplicate indices or pool items in hand-edited files collapse.
    #[must_use]
    pub fn into_state(self) -> ProgressState {
        ProgressState {
            vocabulary_completed: completed(self.vocabulary_completed),
            grammar_completed: completed(self.grammar_completed),
            comprehension_completed: completed(self.comprehension_completed),
            review_vocab: self.review_vocab.into_iter().collect(),
            review_grammar: self.review_grammar.into_iter().collect(),
            review_comp: self.review_comp.into_iter().collect(),
            last_review: self.last_review,
        }
    }
}

fn indices(levels: &CompletedLevels) -> Vec<u32> {
    levels.iter().map(|index| index.value()).collect()
}

fn completed(raw: Vec<u32>) -> CompletedLevels {
    raw.into_iter().map(LevelIndex::new).collect()
}
