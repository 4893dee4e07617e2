//! Core domain types for the Roadie itinerary planner.
//!
//! A tour is planned over a fixed horizon of days: each day the agent is in
//! exactly one city, starts and ends at home, and may only move between
//! cities joined by a direct route. Being present for an event earns its
//! revenue; every move pays its transport cost. [`ItineraryModel`] expresses
//! this as a mixed-integer linear program, a [`SolverAdapter`] solves it and
//! [`ResultExtractor`] turns the assignment back into an [`Itinerary`].
//!
//! Constructors return `Result` so invalid tables never reach a solver.

#![forbid(unsafe_code)]

mod city;
mod config;
mod cost;
mod day;
mod error;
mod extract;
mod itinerary;
mod model;
mod planner;
mod profit;
mod program;
mod solver;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use city::{City, CityCatalog, CityId};
pub use config::{
    AttendanceMode, DEFAULT_ACCEPTANCE_THRESHOLD, DEFAULT_TIME_BUDGET, DEFAULT_TOLERANCE,
    PlanConfig, TimeoutRetry,
};
pub use cost::{DirectRoute, Route, TransportCostTable};
pub use day::Day;
pub use error::{ConfigError, DataError, ExtractionError, PlanError, SolverFailure};
pub use extract::ResultExtractor;
pub use itinerary::{Itinerary, Leg, Stop};
pub use model::{ItineraryModel, TransitionVariable};
pub use planner::Planner;
pub use profit::{ProfitRecord, ProfitTable};
pub use program::{
    ConstraintKind, LinearConstraint, LinearExpr, LinearProgram, Relation, Sense, VariableId,
    VariableSpec,
};
pub use solver::{Solution, SolveOptions, SolveStatus, SolverAdapter};
