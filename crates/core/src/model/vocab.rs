use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammatical gender marker of a German noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Article {
    Der,
    Die,
    Das,
}

impl Article {
    /// Options of an article exercise, always in this order.
    pub const ALL: [Article; 3] = [Article::Der, Article::Die, Article::Das];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Article::Der => "der",
            Article::Die => "die",
            Article::Das => "das",
        }
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexical entry of the vocabulary corpus.
///
/// Entries are compared by value: the review pool relies on this to avoid
/// queueing the same word twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabEntry {
    pub word: String,
    pub plural: String,
    pub article: Article,
    pub translation: String,
}

impl VocabEntry {
    #[must_use]
    pub fn new(
        word: impl Into<String>,
        plural: impl Into<String>,
        article: Article,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            plural: plural.into(),
            article,
            translation: translation.into(),
        }
    }
}
