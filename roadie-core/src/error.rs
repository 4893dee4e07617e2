//! Error taxonomy for itinerary planning.
//!
//! Every failure is fatal for the run that produced it. No variant carries a
//! partial itinerary.

use std::time::Duration;

use thiserror::Error;

use crate::Day;

/// Malformed or cross-referencing-invalid input tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// The city catalogue contained no cities.
    #[error("city catalogue must contain at least one city")]
    EmptyCatalog,
    /// A city name was registered twice.
    #[error("city {city:?} is listed more than once")]
    DuplicateCity {
        /// Offending city name.
        city: String,
    },
    /// A table referenced a city that is not in the catalogue.
    #[error("city {city:?} is not in the city catalogue")]
    UnknownCity {
        /// Name or handle of the unknown city.
        city: String,
    },
    /// A profit record named a different country than the catalogue.
    #[error("city {city:?} belongs to {expected:?}, not {found:?}")]
    CountryMismatch {
        /// City named by the record.
        city: String,
        /// Country recorded in the catalogue.
        expected: String,
        /// Country named by the record.
        found: String,
    },
    /// A profit entry fell outside the planning horizon.
    #[error("day {day} lies outside the {horizon_days}-day horizon")]
    DayOutOfRange {
        /// Day index of the entry.
        day: u16,
        /// Number of days in the horizon.
        horizon_days: u16,
    },
    /// A profit was negative or not finite.
    #[error("profit {value} for {city:?} on {day} must be finite and non-negative")]
    InvalidProfit {
        /// City of the entry.
        city: String,
        /// Day of the entry.
        day: Day,
        /// Rejected value.
        value: f64,
    },
    /// A profit cell could not be read as a number.
    #[error("profit for {city:?} is not numeric: {value:?}")]
    NonNumericProfit {
        /// City of the entry.
        city: String,
        /// Raw cell content.
        value: String,
    },
    /// A date cell did not parse as a calendar date.
    #[error("cannot parse date {value:?}: {reason}")]
    InvalidDate {
        /// Raw cell content.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// A dated entry fell before the first day of the horizon.
    #[error("{date} precedes the horizon start {start}")]
    DateBeforeStart {
        /// Offending date, as written in the table.
        date: String,
        /// First day of the horizon, in the same format.
        start: String,
    },
    /// Two profit entries targeted the same city and day.
    #[error("profit for {city:?} on {day} is defined more than once")]
    DuplicateProfit {
        /// City of the entry.
        city: String,
        /// Day of the entry.
        day: Day,
    },
    /// A cost entry connected a city to itself.
    #[error("transport cost from {city:?} to itself is not a route")]
    SelfRoute {
        /// City named on both ends.
        city: String,
    },
    /// A cost was negative or not finite.
    #[error("transport cost {value} between {from:?} and {to:?} must be finite and non-negative")]
    InvalidCost {
        /// First city of the pair.
        from: String,
        /// Second city of the pair.
        to: String,
        /// Rejected value.
        value: f64,
    },
    /// A cost matrix cell could not be read as a number.
    #[error("transport cost between {from:?} and {to:?} is not numeric: {value:?}")]
    NonNumericCost {
        /// Row city.
        from: String,
        /// Column city.
        to: String,
        /// Raw cell content.
        value: String,
    },
    /// The two directions of a pair disagreed.
    #[error(
        "transport cost between {from:?} and {to:?} is asymmetric ({existing} vs {conflicting})"
    )]
    AsymmetricCost {
        /// First city of the pair.
        from: String,
        /// Second city of the pair.
        to: String,
        /// Value already recorded.
        existing: f64,
        /// Value that conflicts with it.
        conflicting: f64,
    },
    /// A cost was requested for a pair without a direct route.
    #[error("no direct route between {from:?} and {to:?}")]
    NoRoute {
        /// Departure city.
        from: String,
        /// Arrival city.
        to: String,
    },
    /// A table was built against a different city catalogue.
    #[error("the {table} table was built for a different city catalogue")]
    CatalogMismatch {
        /// Which table disagreed.
        table: &'static str,
    },
}

/// Invalid planning configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The horizon contained no days.
    #[error("horizon must span at least one day")]
    ZeroHorizon,
    /// The home city is not in the catalogue.
    #[error("home city {city:?} is not in the city catalogue")]
    UnknownHomeCity {
        /// Configured home city.
        city: String,
    },
    /// The solver tolerance was not a positive finite number.
    #[error("solver tolerance must be positive and finite (got {value})")]
    InvalidTolerance {
        /// Rejected tolerance.
        value: f64,
    },
    /// The solver time budget was zero.
    #[error("solver time budget must be positive")]
    ZeroTimeBudget,
    /// The acceptance threshold cannot single out one city per day.
    #[error("acceptance threshold must lie in (0.5, 1.0] (got {value})")]
    InvalidThreshold {
        /// Rejected threshold.
        value: f64,
    },
    /// A timeout retry factor would shrink the budget or tighten the tolerance.
    #[error("timeout retry factors must be finite and at least 1.0 (got {value})")]
    InvalidRetryFactor {
        /// Rejected factor.
        value: f64,
    },
    /// The profit table covers a different horizon than configured.
    #[error("profit table spans {table} days but the plan is configured for {configured}")]
    HorizonMismatch {
        /// Configured horizon length.
        configured: u16,
        /// Horizon length of the profit table.
        table: u16,
    },
}

/// Failure reported by a [`SolverAdapter`](crate::SolverAdapter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverFailure {
    /// No assignment satisfies every constraint.
    #[error("the itinerary model is infeasible")]
    Infeasible,
    /// The objective can grow without bound.
    #[error("the itinerary model is unbounded")]
    Unbounded,
    /// The solver did not finish within its time budget.
    #[error("the solver exceeded its {budget:?} time budget")]
    Timeout {
        /// Budget that was exhausted.
        budget: Duration,
    },
    /// The solver returned an assignment that fails numerical checks.
    #[error("solver numerical error: {diagnostic}")]
    NumericalError {
        /// Solver-provided diagnostic.
        diagnostic: String,
    },
    /// The solver backend could not run at all.
    #[error("solver backend failure: {diagnostic}")]
    Backend {
        /// Backend-provided diagnostic.
        diagnostic: String,
    },
}

/// A solution could not be read back as a single itinerary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    /// The assignment does not cover the model's variables.
    #[error("solution holds {found} values but the model has {expected} variables")]
    VariableCountMismatch {
        /// Variables in the model.
        expected: usize,
        /// Values in the solution.
        found: usize,
    },
    /// No city cleared the acceptance threshold on a day.
    #[error("no city clears the acceptance threshold on {day}: {values:?}")]
    NoCity {
        /// Offending day.
        day: Day,
        /// Occupancy value of every city on that day.
        values: Vec<(String, f64)>,
    },
    /// More than one city cleared the acceptance threshold on a day.
    #[error("several cities clear the acceptance threshold on {day}: {candidates:?}")]
    Ambiguous {
        /// Offending day.
        day: Day,
        /// Competing cities and their occupancy values.
        candidates: Vec<(String, f64)>,
    },
    /// Transition variables disagree with the occupancy path.
    #[error("transitions selected for {day} do not match the occupancy path")]
    TransitionMismatch {
        /// Offending day.
        day: Day,
    },
    /// The occupancy path moves along a pair without a direct route.
    #[error("itinerary moves from {from:?} to {to:?} on {day} without a direct route")]
    UnroutedMove {
        /// Day of arrival.
        day: Day,
        /// Departure city.
        from: String,
        /// Arrival city.
        to: String,
    },
    /// The solver objective disagrees with the recomputed itinerary value.
    #[error("solver reported objective {reported} but the itinerary is worth {recomputed}")]
    ObjectiveMismatch {
        /// Objective reported by the solver.
        reported: f64,
        /// Objective recomputed from the extracted itinerary.
        recomputed: f64,
    },
}

/// Tagged failure reason for a planning run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Input tables were invalid.
    #[error("invalid input data: {0}")]
    Data(#[from] DataError),
    /// Configuration was invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The solver failed.
    #[error(transparent)]
    Solver(#[from] SolverFailure),
    /// The solution could not be extracted.
    #[error("failed to extract itinerary: {0}")]
    Extraction(#[from] ExtractionError),
}

impl PlanError {
    /// Short tag naming the failure family.
    ///
    /// # Examples
    /// ```
    /// use roadie_core::{PlanError, SolverFailure};
    ///
    /// let err = PlanError::from(SolverFailure::Infeasible);
    /// assert_eq!(err.reason(), "Infeasible");
    /// ```
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Data(_) => "DataError",
            Self::Config(_) => "ConfigError",
            Self::Solver(SolverFailure::Infeasible) => "Infeasible",
            Self::Solver(SolverFailure::Unbounded) => "Unbounded",
            Self::Solver(SolverFailure::Timeout { .. }) => "Timeout",
            Self::Solver(SolverFailure::NumericalError { .. }) => "NumericalError",
            Self::Solver(SolverFailure::Backend { .. }) => "SolverBackend",
            Self::Extraction(_) => "ExtractionError",
        }
    }
}
