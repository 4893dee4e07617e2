//! `MilpSolver` implementation backed by `good_lp`.

use std::time::Instant;

use roadie_core::{LinearProgram, Solution, SolveOptions, SolverAdapter, SolverFailure};

use crate::lp::{self, RawSolution, SolveLimits};

/// How many offending items a numerical diagnostic lists.
const DIAGNOSTIC_SAMPLE: usize = 5;

/// Configuration for [`MilpSolver`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilpSolverConfig {
    /// Relative optimality gap at which branch and bound may stop with its
    /// incumbent. `None` asks for a proven optimum.
    pub mip_gap: Option<f32>,
}

/// Exact solver for itinerary programs using `good_lp` with `microlp`.
///
/// The caller's time budget is handed to microlp, which checks it inside the
/// branch and bound loop and stops the solve on the calling thread. A limit
/// that fires before any incumbent exists is a [`SolverFailure::Timeout`];
/// one that fires with an incumbent yields
/// [`SolveStatus::Feasible`](roadie_core::SolveStatus::Feasible).
/// Returned assignments are verified against every constraint and snapped to
/// exact integers.
///
/// # Examples
/// ```
/// use roadie_core::{CityCatalog, PlanConfig, Planner, ProfitTable, TransportCostTable};
/// use roadie_solver_milp::MilpSolver;
///
/// let catalog = CityCatalog::new([("Home", "Here")])?;
/// let profits = ProfitTable::new(&catalog, 2);
/// let costs = TransportCostTable::new(&catalog);
///
/// let planner = Planner::new(MilpSolver::new(), PlanConfig::new(2, "Home"));
/// let itinerary = planner.plan(&catalog, &profits, &costs)?;
/// assert_eq!(itinerary.cities().collect::<Vec<_>>(), ["Home", "Home"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MilpSolver {
    config: MilpSolverConfig,
}

impl MilpSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: MilpSolverConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &MilpSolverConfig {
        &self.config
    }
}

impl SolverAdapter for MilpSolver {
    fn solve(
        &self,
        program: &LinearProgram,
        options: &SolveOptions,
    ) -> Result<Solution, SolverFailure> {
        let started_at = Instant::now();
        let limits = SolveLimits {
            time_budget: options.time_budget,
            mip_gap: self.config.mip_gap,
        };
        let raw = match lp::solve_program(program, limits) {
            Ok(raw) => raw,
            Err(failure) => {
                log::info!(
                    "MILP solve failed after {:?}: {failure}",
                    started_at.elapsed()
                );
                return Err(failure);
            }
        };
        let solution = verify(program, raw, options.tolerance)?;
        log::debug!(
            "MILP solve finished in {:?} as {:?} with objective {}",
            started_at.elapsed(),
            solution.status,
            solution.objective
        );
        Ok(solution)
    }
}

/// Check a raw assignment against `program` and snap integer variables.
///
/// Every value must be finite, within its bounds and, for integer variables,
/// within `tolerance` of an integer. Every constraint must hold within
/// `tolerance` scaled by its magnitude. The objective is evaluated on the
/// snapped values.
fn verify(
    program: &LinearProgram,
    raw: RawSolution,
    tolerance: f64,
) -> Result<Solution, SolverFailure> {
    let RawSolution { status, values } = raw;
    let numerical = |diagnostic: String| SolverFailure::NumericalError { diagnostic };
    if values.len() != program.variables().len() {
        return Err(numerical(format!(
            "solver returned {} values for {} variables",
            values.len(),
            program.variables().len()
        )));
    }
    if values.iter().any(|value| !value.is_finite()) {
        return Err(numerical("solver returned a non-finite value".to_owned()));
    }

    let off_grid: Vec<&str> = program
        .bound_violations(&values, tolerance)
        .take(DIAGNOSTIC_SAMPLE)
        .map(|spec| spec.name.as_str())
        .collect();
    if !off_grid.is_empty() {
        return Err(numerical(format!(
            "variables outside bounds or integrality tolerance {tolerance}: {}",
            off_grid.join(", ")
        )));
    }

    let violated: Vec<String> = program
        .violations(&values, tolerance)
        .take(DIAGNOSTIC_SAMPLE)
        .map(|constraint| format!("{:?}", constraint.kind))
        .collect();
    if !violated.is_empty() {
        return Err(numerical(format!(
            "constraints violated beyond tolerance {tolerance}: {}",
            violated.join(", ")
        )));
    }

    let snapped: Vec<f64> = program
        .variables()
        .iter()
        .zip(values)
        .map(|(spec, value)| if spec.integer { value.round() } else { value })
        .collect();
    let objective = program
        .objective()
        .evaluate(&snapped)
        .ok_or_else(|| numerical("objective references unknown variables".to_owned()))?;
    Ok(Solution {
        status,
        objective,
        values: snapped,
    })
}

#[cfg(test)]
mod tests;
