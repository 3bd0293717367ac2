use chrono::{Days, Local, NaiveDate};

/// A simple clock abstraction for deterministic dates in services and tests.
///
/// Only calendar days matter here: review gating compares the learner's local
/// date, never a timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    /// Returns a clock that follows the local system date.
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    /// Returns a clock pinned to the given date.
    #[must_use]
    pub fn fixed(on: NaiveDate) -> Self {
        Self::Fixed(on)
    }

    /// Returns today's date according to the clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(day) => *day,
        }
    }

    /// If this is a fixed clock, move it forward by `days`.
    ///
    /// Has no effect on `Clock::System`.
    pub fn advance_days(&mut self, days: u64) {
        if let Clock::Fixed(day) = self {
            *day = day.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
        }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Returns a deterministic date for tests and doc examples (2024-01-01).
#[must_use]
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Returns a `Clock` fixed at the deterministic test date.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_today())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_pinned_date() {
        let clock = fixed_clock();
        assert!(clock.is_fixed());
        assert_eq!(clock.today().to_string(), "2024-01-01");
    }

    #[test]
    fn advancing_fixed_clock_moves_to_next_day() {
        let mut clock = fixed_clock();
        clock.advance_days(1);
        assert_eq!(clock.today().to_string(), "2024-01-02");
    }

    #[test]
    fn advancing_system_clock_is_a_no_op() {
        let mut clock = Clock::system();
        clock.advance_days(3);
        assert!(!clock.is_fixed());
    }
}
