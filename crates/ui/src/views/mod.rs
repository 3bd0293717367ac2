mod exercise;
mod home;
mod level_picker;
mod review;
mod session;

pub use exercise::{ask_exercise, show_feedback};
pub use home::{MenuChoice, show_menu};
pub use level_picker::{Picked, level_line, pick_level};
pub use review::run_review;
pub use session::run_level;

/// Whether the main loop should keep going after a view returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}
