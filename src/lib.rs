//! Facade crate for the Roadie itinerary planner.
//!
//! This crate re-exports the core domain types and exposes the optional
//! solver backend behind a feature flag.

#![forbid(unsafe_code)]

pub use roadie_core::{
    AttendanceMode, City, CityCatalog, CityId, ConfigError, DataError, Day, ExtractionError,
    Itinerary, ItineraryModel, Leg, PlanConfig, PlanError, Planner, ProfitRecord, ProfitTable,
    ResultExtractor, Solution, SolveOptions, SolveStatus, SolverAdapter, SolverFailure, Stop,
    TimeoutRetry, TransportCostTable,
};

#[cfg(feature = "solver-milp")]
pub use roadie_solver_milp::{MilpSolver, MilpSolverConfig};
