use std::io::{BufRead, Write};

use rand::Rng;

use drill_core::model::LevelRef;
use services::DrillService;

use crate::console::Console;
use crate::error::UiError;
use crate::views::{Flow, MenuChoice, Picked, pick_level, run_level, run_review, show_menu};

pub const WELCOME: &str = "✨ Benvenuto in Deutschland B2! ✨";
pub const FAREWELL: &str = "Auf Wiedersehen! Buono studio 👋";

/// Main menu loop. Returns when the learner exits or input ends.
///
/// # Errors
///
/// Returns `UiError` if the console fails or a session hits an
/// unrecoverable error.
pub fn run_app<R, W, G>(
    console: &mut Console<R, W>,
    drill: &mut DrillService,
    rng: &mut G,
) -> Result<(), UiError>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    console.line(WELCOME)?;

    loop {
        let Some(choice) = show_menu(console, drill)? else {
            break;
        };

        let flow = match choice {
            MenuChoice::Track(track) => match pick_level(console, drill, track)? {
                Picked::Level(index) => {
                    run_level(console, drill, LevelRef::new(track, index), rng)?
                }
                Picked::Back => Flow::Continue,
                Picked::Quit => Flow::Quit,
            },
            MenuChoice::Review => run_review(console, drill, rng)?,
            MenuChoice::Exit => Flow::Quit,
        };

        if flow == Flow::Quit {
            break;
        }
    }

    console.line(FAREWELL)?;
    Ok(())
}
