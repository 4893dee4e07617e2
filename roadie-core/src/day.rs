//! Day indices within the planning horizon.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Zero-based day index within a planning horizon.
///
/// # Examples
/// ```
/// use roadie_core::Day;
///
/// let days: Vec<Day> = Day::horizon(3).collect();
/// assert_eq!(days, vec![Day::new(0), Day::new(1), Day::new(2)]);
/// assert_eq!(Day::new(2).previous(), Some(Day::new(1)));
/// assert_eq!(Day::new(0).previous(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Day(u16);

impl Day {
    /// Wrap a raw day index.
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Raw day number.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Day number as a slice index.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// The day before this one, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self.0.checked_sub(1) {
            Some(day) => Some(Self(day)),
            None => None,
        }
    }

    /// Final day of a horizon of `days` days, or `None` for an empty horizon.
    #[must_use]
    pub const fn last_of(days: u16) -> Option<Self> {
        match days.checked_sub(1) {
            Some(day) => Some(Self(day)),
            None => None,
        }
    }

    /// Iterate over every day of a horizon of `days` days.
    pub fn horizon(days: u16) -> impl Iterator<Item = Self> {
        (0..days).map(Self)
    }

    /// Iterate over the days that can end a transition: all but day 0.
    pub fn transition_days(days: u16) -> impl Iterator<Item = Self> {
        (1..days).map(Self)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {}", self.0)
    }
}
