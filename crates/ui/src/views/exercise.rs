use std::io::{BufRead, Write};

use drill_core::model::Exercise;
use services::AnswerFeedback;

use crate::console::Console;
use crate::error::UiError;

/// Print one exercise with numbered options and read the learner's pick.
///
/// Returns the zero-based choice, or `None` once input ends.
///
/// # Errors
///
/// Returns `UiError::Io` if the console fails.
pub fn ask_exercise<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    exercise: &Exercise,
) -> Result<Option<usize>, UiError> {
    console.blank()?;
    console.line(&exercise.prompt)?;
    for (number, option) in exercise.options.iter().enumerate() {
        console.line(format_args!("{}. {option}", number + 1))?;
    }
    let prompt = format!(
        "Scegli l'opzione corretta (1-{}): ",
        exercise.option_count()
    );
    console.choose(&prompt, exercise.option_count())
}

/// # Errors
///
/// Returns `UiError::Io` if the console fails.
pub fn show_feedback<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    feedback: &AnswerFeedback,
) -> Result<(), UiError> {
    if feedback.correct {
        console.line("✅ Corretto!")
    } else {
        console.line(format_args!(
            "❌ Sbagliato! La risposta corretta è: {}",
            feedback.correct_option
        ))
    }
}
