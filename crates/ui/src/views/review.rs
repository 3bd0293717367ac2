use std::io::{BufRead, Write};

use rand::Rng;

use drill_core::review::ReviewRefusal;
use services::{DrillService, ReviewSessionError};

use super::Flow;
use super::exercise::{ask_exercise, show_feedback};
use crate::console::Console;
use crate::error::UiError;

/// Run today's review, or explain why there is none.
///
/// # Errors
///
/// Returns `UiError` if the console fails. A failed save is reported to the
/// learner and does not end the loop.
pub fn run_review<R, W, G>(
    console: &mut Console<R, W>,
    drill: &mut DrillService,
    rng: &mut G,
) -> Result<Flow, UiError>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let mut session = match drill.start_review(rng) {
        Ok(session) => session,
        Err(ReviewRefusal::AlreadyReviewedToday) => {
            console.line("Hai già effettuato il ripasso oggi. Riprova domani.")?;
            return Ok(Flow::Continue);
        }
        Err(ReviewRefusal::NothingToReview) => {
            console.line("Non ci sono ancora elementi da ripassare. Completa alcuni livelli prima!")?;
            return Ok(Flow::Continue);
        }
    };

    console.rule()?;
    console.line("Sessione di ripasso quotidiano")?;

    while let Some(item) = session.current_item() {
        let Some(choice) = ask_exercise(console, &item.exercise)? else {
            return Ok(Flow::Quit);
        };
        let feedback = session.answer_current(choice)?;
        show_feedback(console, &feedback)?;
    }

    match drill.finish_review(session) {
        Ok(summary) => {
            console.blank()?;
            console.line(format_args!(
                "Risposte corrette: {}/{}",
                summary.correct, summary.total
            ))?;
            console.line("Ripasso completato! Continua così 🎉")?;
            Ok(Flow::Continue)
        }
        Err(ReviewSessionError::Storage(_)) => {
            console.line("⚠️ Impossibile salvare la data del ripasso.")?;
            Ok(Flow::Continue)
        }
        Err(err) => Err(err.into()),
    }
}
