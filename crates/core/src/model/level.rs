use serde::{Deserialize, Serialize};

use crate::model::{Question, VocabEntry};

/// A vocabulary level: the entries it introduces.
///
/// Exercises are not stored; they are generated from the entries on every
/// attempt so the distractors change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabLevel {
    pub name: String,
    pub items: Vec<VocabEntry>,
}

/// A grammar level: one rule and the questions that drill it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrammarLevel {
    pub name: String,
    pub explanation: String,
    pub questions: Vec<Question>,
}

/// A reading-comprehension level: a passage followed by questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComprehensionLevel {
    pub name: String,
    pub passage: String,
    pub questions: Vec<Question>,
}
