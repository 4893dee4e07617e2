//! Mixed-integer solver backend for Roadie.
//!
//! This crate provides [`MilpSolver`], the default implementation of the
//! [`SolverAdapter`](roadie_core::SolverAdapter) trait. It hands the
//! itinerary program to `good_lp` with the pure-Rust `microlp` branch and
//! bound solver, passes the caller's time budget to microlp as its time
//! limit, and verifies every returned assignment before it reaches the extractor.

#![forbid(unsafe_code)]

mod lp;
mod solver;

pub use solver::{MilpSolver, MilpSolverConfig};
