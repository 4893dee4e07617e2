//! Extracted itinerary.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Day;

/// Where the agent is on one day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stop {
    /// Day of the stop.
    pub day: Day,
    /// City occupied.
    pub city: String,
    /// Whether the day's event revenue was collected.
    pub attending: bool,
    /// Revenue collected on this day.
    pub revenue: f64,
}

/// A move between two cities.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leg {
    /// Day of arrival.
    pub day: Day,
    /// Departure city.
    pub from: String,
    /// Arrival city.
    pub to: String,
    /// Transport cost paid.
    pub cost: f64,
}

/// Day-by-day plan together with its value.
///
/// `objective` is what the solver reported; `recomputed_objective` is
/// `revenue - transport_cost` derived from the tables.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Itinerary {
    /// One stop per day, in day order.
    pub stops: Vec<Stop>,
    /// Moves in day order.
    pub transitions: Vec<Leg>,
    /// Total event revenue collected.
    pub revenue: f64,
    /// Total transport spend.
    pub transport_cost: f64,
    /// Objective reported by the solver.
    pub objective: f64,
    /// Objective recomputed from the tables.
    pub recomputed_objective: f64,
}

impl Itinerary {
    /// City names in day order.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.stops.iter().map(|stop| stop.city.as_str())
    }

    /// Number of days covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the itinerary covers no days.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
