mod level;
mod progress;
mod review;

// Public API of the session subsystem.
pub use level::{LevelIntro, LevelOutcome, LevelSession, review_contribution};
pub use progress::{AnswerFeedback, SessionProgress};
pub use review::{ReviewSession, ReviewSummary};
