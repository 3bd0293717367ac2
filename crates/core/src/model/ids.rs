use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Track;

/// Zero-based position of a level inside its track.
///
/// This is the persisted key for completion, so a level keeps its index for
/// the lifetime of the content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelIndex(u32);

impl LevelIndex {
    /// Creates a new `LevelIndex`
    #[must_use]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns the index as a slice position.
    #[must_use]
    pub fn as_usize(&self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }

    /// Builds an index from a slice position, if it fits.
    #[must_use]
    pub fn from_usize(position: usize) -> Option<Self> {
        u32::try_from(position).ok().map(Self)
    }

    /// One-based number shown to the learner.
    #[must_use]
    pub fn display_number(&self) -> u64 {
        u64::from(self.0) + 1
    }
}

/// Track plus index: the stable address of one level.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelRef {
    pub track: Track,
    pub index: LevelIndex,
}

impl LevelRef {
    #[must_use]
    pub fn new(track: Track, index: LevelIndex) -> Self {
        Self { track, index }
    }
}

impl fmt::Debug for LevelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LevelIndex({})", self.0)
    }
}

impl fmt::Debug for LevelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LevelRef({:?}, {})", self.track, self.index.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for LevelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LevelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.track, self.index.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_index_serializes_as_plain_integer() {
        let json = serde_json::to_string(&LevelIndex::new(7)).unwrap();
        assert_eq!(json, "7");
        let parsed: LevelIndex = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, LevelIndex::new(12));
    }

    #[test]
    fn display_number_is_one_based() {
        assert_eq!(LevelIndex::new(0).display_number(), 1);
        assert_eq!(LevelIndex::from_usize(4).unwrap().display_number(), 5);
    }

    #[test]
    fn level_ref_display_names_track() {
        let level = LevelRef::new(Track::Grammar, LevelIndex::new(3));
        assert_eq!(level.to_string(), "grammar/3");
    }
}
