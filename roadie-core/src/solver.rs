//! Contract between the itinerary model and an external solving engine.

use std::time::Duration;

use crate::{LinearProgram, SolverFailure, VariableId};

/// Limits handed to a solver for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveOptions {
    /// Acceptable numerical tolerance.
    pub tolerance: f64,
    /// Wall-clock budget.
    pub time_budget: Duration,
}

impl SolveOptions {
    /// Options for a retry: a longer budget and a looser tolerance.
    #[expect(clippy::float_arithmetic, reason = "tolerance is scaled by a factor")]
    #[must_use]
    pub fn relaxed(self, budget_factor: f64, tolerance_factor: f64) -> Self {
        Self {
            tolerance: self.tolerance * tolerance_factor,
            time_budget: self.time_budget.mul_f64(budget_factor),
        }
    }
}

/// Quality of a returned assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// Feasible but not proven optimal.
    Feasible,
}

/// Assignment returned by a successful solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Optimality status.
    pub status: SolveStatus,
    /// Objective value reported by the solver.
    pub objective: f64,
    /// One value per program variable, indexed by [`VariableId::index`].
    pub values: Vec<f64>,
}

impl Solution {
    /// Value assigned to `variable`.
    #[must_use]
    pub fn value(&self, variable: VariableId) -> Option<f64> {
        self.values.get(variable.index()).copied()
    }
}

/// Solve a [`LinearProgram`], producing an assignment or a failure.
///
/// Implementations must not return a [`Solution`] for an infeasible or
/// timed-out run. Adapters must be `Send + Sync` so planners can be shared
/// across threads.
///
/// # Examples
/// ```
/// use roadie_core::{LinearProgram, Solution, SolveOptions, SolverAdapter, SolverFailure};
///
/// struct AlwaysInfeasible;
///
/// impl SolverAdapter for AlwaysInfeasible {
///     fn solve(&self, _: &LinearProgram, _: &SolveOptions) -> Result<Solution, SolverFailure> {
///         Err(SolverFailure::Infeasible)
///     }
/// }
/// ```
pub trait SolverAdapter: Send + Sync {
    /// Solve `program` within `options`.
    ///
    /// # Errors
    /// Returns a [`SolverFailure`] describing why no usable assignment exists.
    fn solve(
        &self,
        program: &LinearProgram,
        options: &SolveOptions,
    ) -> Result<Solution, SolverFailure>;
}

impl<T> SolverAdapter for Box<T>
where
    T: SolverAdapter + ?Sized,
{
    fn solve(
        &self,
        program: &LinearProgram,
        options: &SolveOptions,
    ) -> Result<Solution, SolverFailure> {
        (**self).solve(program, options)
    }
}

impl<T> SolverAdapter for &T
where
    T: SolverAdapter + ?Sized,
{
    fn solve(
        &self,
        program: &LinearProgram,
        options: &SolveOptions,
    ) -> Result<Solution, SolverFailure> {
        (**self).solve(program, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn relaxing_scales_budget_and_tolerance() {
        let options = SolveOptions {
            tolerance: 1e-8,
            time_budget: Duration::from_secs(10),
        };
        let relaxed = options.relaxed(2.0, 100.0);
        assert_eq!(relaxed.time_budget, Duration::from_secs(20));
        assert!((relaxed.tolerance - 1e-6).abs() < 1e-18);
    }

    #[rstest]
    fn boxed_adapters_delegate() {
        struct Failing;
        impl SolverAdapter for Failing {
            fn solve(
                &self,
                _: &LinearProgram,
                _: &SolveOptions,
            ) -> Result<Solution, SolverFailure> {
                Err(SolverFailure::Unbounded)
            }
        }

        let adapter: Box<dyn SolverAdapter> = Box::new(Failing);
        let options = SolveOptions {
            tolerance: 1e-8,
            time_budget: Duration::from_secs(1),
        };
        let program = LinearProgram::new(crate::Sense::Maximise);
        assert_eq!(
            adapter.solve(&program, &options),
            Err(SolverFailure::Unbounded)
        );
    }
}
