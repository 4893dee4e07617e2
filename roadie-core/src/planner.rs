//! Orchestration: build, solve, extract.

use crate::{
    CityCatalog, Itinerary, ItineraryModel, PlanConfig, PlanError, ProfitTable, ResultExtractor,
    Solution, SolverAdapter, SolverFailure, TransportCostTable,
};

/// Plans itineraries with a fixed solver adapter and configuration.
///
/// # Examples
/// ```
/// use roadie_core::{
///     CityCatalog, LinearProgram, PlanConfig, Planner, ProfitTable, Solution, SolveOptions,
///     SolverAdapter, SolverFailure, TransportCostTable,
/// };
///
/// struct Infeasible;
///
/// impl SolverAdapter for Infeasible {
///     fn solve(&self, _: &LinearProgram, _: &SolveOptions) -> Result<Solution, SolverFailure> {
///         Err(SolverFailure::Infeasible)
///     }
/// }
///
/// let catalog = CityCatalog::new([("Home", "Here")])?;
/// let profits = ProfitTable::new(&catalog, 2);
/// let costs = TransportCostTable::new(&catalog);
/// let planner = Planner::new(Infeasible, PlanConfig::new(2, "Home"));
///
/// let err = planner.plan(&catalog, &profits, &costs).unwrap_err();
/// assert_eq!(err.reason(), "Infeasible");
/// # Ok::<(), roadie_core::DataError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Planner<A> {
    adapter: A,
    config: PlanConfig,
}

impl<A: SolverAdapter> Planner<A> {
    /// Planner solving with `adapter` under `config`.
    pub const fn new(adapter: A, config: PlanConfig) -> Self {
        Self { adapter, config }
    }

    /// Planning configuration.
    #[must_use]
    pub const fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Solver adapter.
    #[must_use]
    pub const fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Plan the most profitable itinerary for the given tables.
    ///
    /// # Errors
    /// Returns a [`PlanError`] tagged with the failing stage. No partial
    /// itinerary is ever produced.
    pub fn plan(
        &self,
        catalog: &CityCatalog,
        profits: &ProfitTable,
        costs: &TransportCostTable,
    ) -> Result<Itinerary, PlanError> {
        let model = ItineraryModel::build(catalog, profits, costs, &self.config)?;
        let solution = self.solve(&model)?;
        log::info!(
            "solver returned {:?} with objective {}",
            solution.status,
            solution.objective
        );
        let itinerary = ResultExtractor::new(self.config.acceptance_threshold)
            .extract(&model, profits, costs, &solution)?;
        Ok(itinerary)
    }

    fn solve(&self, model: &ItineraryModel) -> Result<Solution, SolverFailure> {
        let options = self.config.solve_options();
        match self.adapter.solve(model.program(), &options) {
            Err(SolverFailure::Timeout { budget }) => {
                let Some(retry) = self.config.timeout_retry else {
                    return Err(SolverFailure::Timeout { budget });
                };
                let relaxed = options.relaxed(retry.budget_factor, retry.tolerance_factor);
                log::warn!(
                    "solver timed out after {budget:?}; retrying once with {:?} and tolerance {}",
                    relaxed.time_budget,
                    relaxed.tolerance
                );
                self.adapter.solve(model.program(), &relaxed)
            }
            Err(failure) => {
                log::debug!("solver failed: {failure}");
                Err(failure)
            }
            Ok(solution) => Ok(solution),
        }
    }
}
