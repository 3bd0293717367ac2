use serde::{Deserialize, Serialize};
use std::fmt;

/// The three learning paths. Each owns its own ordered list of levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Vocabulary,
    Grammar,
    Comprehension,
}

impl Track {
    /// All tracks in menu order.
    pub const ALL: [Track; 3] = [Track::Vocabulary, Track::Grammar, Track::Comprehension];

    /// Stable machine-readable name, used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Track::Vocabulary => "vocabulary",
            Track::Grammar => "grammar",
            Track::Comprehension => "comprehension",
        }
    }

    /// Learner-facing title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Track::Vocabulary => "Percorso Vocabolario",
            Track::Grammar => "Percorso Grammatica",
            Track::Comprehension => "Comprensione del testo",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
