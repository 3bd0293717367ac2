mod catalog;
pub mod exercise;
mod ids;
mod level;
mod progress;
mod question;
mod track;
mod vocab;

pub use catalog::{Catalog, CatalogDraft, CatalogError};
pub use exercise::{Exercise, ExerciseKind};
pub use ids::{LevelIndex, LevelRef};
pub use level::{ComprehensionLevel, GrammarLevel, VocabLevel};
pub use progress::{CompletedLevels, ProgressState, ReviewContribution, ReviewPool};
pub use question::{Question, QuestionError};
pub use track::Track;
pub use vocab::{Article, VocabEntry};
