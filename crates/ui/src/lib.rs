#![forbid(unsafe_code)]

pub mod app;
pub mod console;
pub mod error;
pub mod views;

pub use app::run_app;
pub use console::{Console, Selection};
pub use error::UiError;
pub use views::Flow;
