use std::io::{BufRead, Write};

use rand::Rng;
use tracing::debug;

use drill_core::model::LevelRef;
use services::{DrillService, LevelError, LevelIntro};

use super::Flow;
use super::exercise::{ask_exercise, show_feedback};
use crate::console::Console;
use crate::error::UiError;

/// Run one attempt at `level`: intro, every exercise, verdict.
///
/// Leaving mid-level (end of input) records nothing.
///
/// # Errors
///
/// Returns `UiError` if the console fails or the level does not exist.
/// A failed save is reported to the learner and does not end the loop.
pub fn run_level<R, W, G>(
    console: &mut Console<R, W>,
    drill: &mut DrillService,
    level: LevelRef,
    rng: &mut G,
) -> Result<Flow, UiError>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let mut session = drill.start_level(level, rng)?;

    console.rule()?;
    console.line(format_args!("Inizio {}", session.name()))?;
    let enter_prompt = match drill.intro(level) {
        Some(LevelIntro::Vocabulary { entries }) => {
            console.line("Vocaboli introdotti:")?;
            for entry in entries {
                console.line(format_args!(
                    " - {} {} | plurale: {} | traduzione: {}",
                    entry.article, entry.word, entry.plural, entry.translation
                ))?;
            }
            "Premi Invio per iniziare gli esercizi..."
        }
        Some(LevelIntro::Grammar { explanation }) => {
            console.line("Regola:")?;
            console.line(explanation)?;
            "Premi Invio per iniziare gli esercizi..."
        }
        Some(LevelIntro::Comprehension { passage }) => {
            console.blank()?;
            console.line("Testo:")?;
            console.line(passage)?;
            "Premi Invio per rispondere alle domande..."
        }
        None => "Premi Invio per iniziare gli esercizi...",
    };
    if !console.wait_for_enter(enter_prompt)? {
        return Ok(Flow::Quit);
    }

    while let Some(exercise) = session.current_exercise() {
        let Some(choice) = ask_exercise(console, exercise)? else {
            debug!(%level, "level abandoned");
            return Ok(Flow::Quit);
        };
        let feedback = session.answer_current(choice)?;
        show_feedback(console, &feedback)?;
    }

    match drill.finish_level(session) {
        Ok(outcome) => {
            let score = outcome.score;
            console.blank()?;
            if outcome.passed {
                console.line(format_args!(
                    "Hai superato il livello! Punteggio {}/{}",
                    score.correct(),
                    score.total()
                ))?;
            } else {
                console.line(format_args!(
                    "Non hai raggiunto il punteggio sufficiente ({}/{}). Ritenta questo livello.",
                    score.correct(),
                    score.total()
                ))?;
            }
            Ok(Flow::Continue)
        }
        Err(LevelError::Storage(_)) => {
            console.line("⚠️ Impossibile salvare i progressi. Il livello resta superato per questa sessione.")?;
            Ok(Flow::Continue)
        }
        Err(err) => Err(err.into()),
    }
}
