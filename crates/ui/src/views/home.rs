use std::io::{BufRead, Write};

use drill_core::model::Track;
use services::DrillService;

use crate::console::Console;
use crate::error::UiError;

/// Entries of the main menu, in the order they are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Track(Track),
    Review,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::Track(Track::Vocabulary),
        MenuChoice::Track(Track::Grammar),
        MenuChoice::Track(Track::Comprehension),
        MenuChoice::Review,
        MenuChoice::Exit,
    ];
}

/// Print the main menu with per-track progress and read a choice.
///
/// Returns `None` once input ends.
///
/// # Errors
///
/// Returns `UiError::Io` if the console fails.
pub fn show_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    drill: &DrillService,
) -> Result<Option<MenuChoice>, UiError> {
    console.blank()?;
    console.line("Menù principale:")?;
    for (number, choice) in MenuChoice::ALL.iter().enumerate() {
        let number = number + 1;
        match choice {
            MenuChoice::Track(track) => {
                let summary = drill.track_summary(*track);
                console.line(format_args!(
                    "{number}. {} ({}/{})",
                    track.title(),
                    summary.completed,
                    summary.total
                ))?;
            }
            MenuChoice::Review => console.line(format_args!("{number}. Ripasso quotidiano"))?,
            MenuChoice::Exit => console.line(format_args!("{number}. Esci"))?,
        }
    }

    let prompt = format!("Scegli un'opzione (1-{}): ", MenuChoice::ALL.len());
    let choice = console.choose(&prompt, MenuChoice::ALL.len())?;
    Ok(choice.and_then(|index| MenuChoice::ALL.get(index).copied()))
}
