use std::io::{BufRead, Write};

use drill_core::model::{LevelIndex, Track};
use services::{DrillService, LevelListItem};
use tracing::debug;

use crate::console::{Console, Selection};
use crate::error::UiError;

/// Result of the level picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Picked {
    Level(LevelIndex),
    Back,
    Quit,
}

/// `NN. name ✅`, with the check mark only on completed levels.
#[must_use]
pub fn level_line(item: &LevelListItem) -> String {
    let status = if item.completed { " ✅" } else { "" };
    format!("{:02}. {}{status}", item.index.display_number(), item.name)
}

/// List the levels of `track` and let the learner pick one.
///
/// # Errors
///
/// Returns `UiError::Io` if the console fails.
pub fn pick_level<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    drill: &DrillService,
    track: Track,
) -> Result<Picked, UiError> {
    let levels = drill.levels(track);
    if levels.is_empty() {
        console.line("Nessun livello disponibile.")?;
        return Ok(Picked::Back);
    }

    console.blank()?;
    console.line(track.title())?;
    for item in &levels {
        console.line(level_line(item))?;
    }

    let prompt = format!(
        "Scegli un livello (1-{}) o 'b' per tornare indietro: ",
        levels.len()
    );
    match console.choose_or_back(&prompt, levels.len())? {
        Selection::Pick(position) => {
            let Some(item) = levels.get(position) else {
                return Ok(Picked::Back);
            };
            debug!(%track, index = %item.index, "level picked");
            Ok(Picked::Level(item.index))
        }
        Selection::Back => Ok(Picked::Back),
        Selection::Quit => Ok(Picked::Quit),
    }
}
