//! Fixtures and a scripted solver shared by unit, behaviour and CLI tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::{
    CityCatalog, CityId, Day, ItineraryModel, LinearProgram, PlanConfig, PlanError, ProfitTable,
    Solution, SolveOptions, SolveStatus, SolverAdapter, SolverFailure, TransportCostTable,
};

/// Tables for the canonical two-city scenario.
#[derive(Debug, Clone)]
pub struct TwoCityTables {
    /// `Home` in `Here`, `Away` in `There`.
    pub catalog: CityCatalog,
    /// 500 in `Away` on day 1, nothing else.
    pub profits: ProfitTable,
    /// `Home <-> Away` at 100.
    pub costs: TransportCostTable,
    /// Handle of `Home`.
    pub home: CityId,
    /// Handle of `Away`.
    pub away: CityId,
}

/// Build the two-city scenario over `horizon_days` days (at least 2).
///
/// # Errors
/// Returns [`PlanError::Data`] when the horizon is too short to hold the
/// day-1 event.
pub fn two_city_tables(horizon_days: u16) -> Result<TwoCityTables, PlanError> {
    let catalog = CityCatalog::new([("Home", "Here"), ("Away", "There")])?;
    let home = catalog.resolve("Home")?;
    let away = catalog.resolve("Away")?;
    let mut profits = ProfitTable::new(&catalog, horizon_days);
    profits.insert(away, Day::new(1), 500.0)?;
    let mut costs = TransportCostTable::new(&catalog);
    costs.insert(home, away, 100.0)?;
    Ok(TwoCityTables {
        catalog,
        profits,
        costs,
        home,
        away,
    })
}

/// Encode a path of city names as a [`Solution`] for `model`, with the
/// objective evaluated from the model.
///
/// # Errors
/// Returns [`PlanError::Data`] for unknown names and
/// [`SolverFailure::Backend`] when the path does not fit the horizon.
pub fn solution_for_path(model: &ItineraryModel, path: &[&str]) -> Result<Solution, PlanError> {
    let ids = path
        .iter()
        .map(|name| model.catalog().resolve(name))
        .collect::<Result<Vec<_>, _>>()?;
    let backend = |diagnostic: &str| SolverFailure::Backend {
        diagnostic: diagnostic.to_owned(),
    };
    let values = model
        .assignment_for_path(&ids)
        .ok_or_else(|| backend("path does not fit the horizon"))?;
    let objective = model
        .program()
        .objective()
        .evaluate(&values)
        .ok_or_else(|| backend("objective references unknown variables"))?;
    Ok(Solution {
        status: SolveStatus::Optimal,
        objective,
        values,
    })
}

/// Adapter replaying a fixed sequence of outcomes and recording the budget
/// of every call. Once the script runs out it reports a backend failure.
#[derive(Debug, Default)]
pub struct ScriptedSolver {
    script: Mutex<VecDeque<Result<Solution, SolverFailure>>>,
    budgets: Mutex<Vec<Duration>>,
}

impl ScriptedSolver {
    /// Solver replaying `outcomes` in order.
    pub fn new<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Result<Solution, SolverFailure>>,
    {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            budgets: Mutex::new(Vec::new()),
        }
    }

    /// Solver that always answers with `path` through the presence-mode
    /// model of `tables`.
    ///
    /// # Errors
    /// Propagates model build or path encoding failures.
    pub fn path(tables: &TwoCityTables, path: &[&str]) -> Result<Self, PlanError> {
        let solution = Self::encode(tables, path)?;
        Ok(Self::new([Ok(solution)]))
    }

    /// Solver that times out once, then answers with `path`.
    ///
    /// # Errors
    /// Propagates model build or path encoding failures.
    pub fn timeout_then_path(tables: &TwoCityTables, path: &[&str]) -> Result<Self, PlanError> {
        let solution = Self::encode(tables, path)?;
        Ok(Self::new([
            Err(SolverFailure::Timeout {
                budget: crate::DEFAULT_TIME_BUDGET,
            }),
            Ok(solution),
        ]))
    }

    fn encode(tables: &TwoCityTables, path: &[&str]) -> Result<Solution, PlanError> {
        let config = PlanConfig::new(tables.profits.horizon_days(), "Home");
        let model =
            ItineraryModel::build(&tables.catalog, &tables.profits, &tables.costs, &config)?;
        solution_for_path(&model, path)
    }

    /// Time budgets passed to each call so far.
    #[must_use]
    pub fn budgets(&self) -> Vec<Duration> {
        self.budgets
            .lock()
            .map(|budgets| budgets.clone())
            .unwrap_or_default()
    }
}

impl SolverAdapter for ScriptedSolver {
    fn solve(
        &self,
        _program: &LinearProgram,
        options: &SolveOptions,
    ) -> Result<Solution, SolverFailure> {
        if let Ok(mut budgets) = self.budgets.lock() {
            budgets.push(options.time_budget);
        }
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| {
                Err(SolverFailure::Backend {
                    diagnostic: "scripted solver has no outcome left".to_owned(),
                })
            })
    }
}
