//! Mapping between calendar dates and horizon days.

use chrono::{Days, NaiveDate};
use roadie_core::Day;

/// Date format used by every Roadie CSV file, e.g. `17-01-2024`.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a date written in [`DATE_FORMAT`].
///
/// # Errors
/// Returns the `chrono` parse error for malformed dates.
pub fn parse_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
}

/// Render `date` in [`DATE_FORMAT`].
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A planning horizon anchored at a start date.
///
/// # Examples
/// ```
/// use roadie_core::Day;
/// use roadie_data::{Calendar, parse_date};
///
/// let calendar = Calendar::new(parse_date("01-01-2024")?, 31);
/// assert_eq!(calendar.day_of(parse_date("17-01-2024")?), Some(Day::new(16)));
/// assert_eq!(calendar.day_of(parse_date("31-12-2023")?), None);
/// # Ok::<(), chrono::ParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    start: NaiveDate,
    horizon_days: u16,
}

impl Calendar {
    /// Horizon of `horizon_days` days beginning on `start`.
    #[must_use]
    pub const fn new(start: NaiveDate, horizon_days: u16) -> Self {
        Self {
            start,
            horizon_days,
        }
    }

    /// Date of day 0.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Number of days in the horizon.
    #[must_use]
    pub const fn horizon_days(&self) -> u16 {
        self.horizon_days
    }

    /// Day index of `date`, or `None` when it precedes the start date.
    ///
    /// Dates past the horizon still map to a day (saturating at
    /// `u16::MAX`) so that the profit table reports them as out of range.
    #[must_use]
    pub fn day_of(&self, date: NaiveDate) -> Option<Day> {
        let offset = date.signed_duration_since(self.start).num_days();
        if offset < 0 {
            return None;
        }
        Some(Day::new(u16::try_from(offset).unwrap_or(u16::MAX)))
    }

    /// Calendar date of `day`, if representable.
    #[must_use]
    pub fn date_of(&self, day: Day) -> Option<NaiveDate> {
        self.start
            .checked_add_days(Days::new(u64::from(day.value())))
    }

    /// Every date of the horizon in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        Day::horizon(self.horizon_days).filter_map(|day| self.date_of(day))
    }
}
