use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::UiError;

pub const INVALID_CHOICE: &str = "Scelta non valida. Riprova.";

const RULE_WIDTH: usize = 60;

/// Answer to a prompt that also accepts `b` for "back".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based position of the picked entry.
    Pick(usize),
    Back,
    /// Input ended.
    Quit,
}

/// Line-oriented terminal I/O.
///
/// Generic over the reader and writer so tests can script a whole run with
/// an in-memory cursor. End of input is reported as `None` (or
/// `Selection::Quit`), never as an error.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }

    /// # Errors
    ///
    /// Returns `UiError::Io` if the writer fails.
    pub fn line(&mut self, text: impl Display) -> Result<(), UiError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `UiError::Io` if the writer fails.
    pub fn blank(&mut self) -> Result<(), UiError> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Blank line followed by a horizontal rule.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Io` if the writer fails.
    pub fn rule(&mut self) -> Result<(), UiError> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "=".repeat(RULE_WIDTH))?;
        Ok(())
    }

    /// Print `prompt` without a newline and read one trimmed line.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Io` if reading or writing fails.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>, UiError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(buf.trim().to_owned()))
    }

    /// Block until the learner presses Enter. `false` means input ended.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Io` if reading or writing fails.
    pub fn wait_for_enter(&mut self, prompt: &str) -> Result<bool, UiError> {
        Ok(self.ask(prompt)?.is_some())
    }

    /// Ask for a number in `1..=count` until one is given.
    ///
    /// Returns the zero-based choice, or `None` once input ends.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Io` if reading or writing fails.
    pub fn choose(&mut self, prompt: &str, count: usize) -> Result<Option<usize>, UiError> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            if let Some(choice) = parse_choice(&answer, count) {
                return Ok(Some(choice));
            }
            self.line(INVALID_CHOICE)?;
        }
    }

    /// Like [`Console::choose`], but `b` (any case) goes back.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Io` if reading or writing fails.
    pub fn choose_or_back(&mut self, prompt: &str, count: usize) -> Result<Selection, UiError> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(Selection::Quit);
            };
            if answer.eq_ignore_ascii_case("b") {
                return Ok(Selection::Back);
            }
            if let Some(choice) = parse_choice(&answer, count) {
                return Ok(Selection::Pick(choice));
            }
            self.line(INVALID_CHOICE)?;
        }
    }
}

/// Parse a one-based menu answer into a zero-based index.
///
/// Only plain ASCII digits are accepted; signs and whitespace inside the
/// number are rejected.
#[must_use]
pub fn parse_choice(raw: &str, count: usize) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number: usize = raw.parse().ok()?;
    (1..=count).contains(&number).then(|| number - 1)
}
