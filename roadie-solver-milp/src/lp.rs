//! `good_lp` modelling helpers for `MilpSolver`.
//!
//! This module converts a [`LinearProgram`] into a `good_lp` problem, runs the
//! `microlp` branch and bound solver under a time limit, and reads back one
//! value per program variable in declaration order.

use std::time::Duration;

use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution as _, SolutionStatus, SolverModel,
    Variable, WithMipGap, WithTimeLimit, microlp, variable,
};
use roadie_core::{LinearExpr, LinearProgram, Relation, Sense, SolveStatus, SolverFailure};

/// Error text `good_lp` reports when microlp's time limit fires before any
/// incumbent exists.
const TIME_LIMIT_WITHOUT_INCUMBENT: &str = "Time limit reached";

/// Limits handed to microlp for one solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SolveLimits {
    /// Wall-clock limit enforced inside the branch and bound loop.
    pub(crate) time_budget: Duration,
    /// Relative optimality gap at which the search may stop early.
    pub(crate) mip_gap: Option<f32>,
}

/// Raw assignment read back from microlp.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawSolution {
    /// Whether optimality was proven or a limit stopped the search.
    pub(crate) status: SolveStatus,
    /// One value per program variable.
    pub(crate) values: Vec<f64>,
}

/// Solve `program` within `limits` and return the raw value of every
/// variable.
pub(crate) fn solve_program(
    program: &LinearProgram,
    limits: SolveLimits,
) -> Result<RawSolution, SolverFailure> {
    let mut vars = ProblemVariables::new();
    let handles: Vec<Variable> = program
        .variables()
        .iter()
        .map(|spec| {
            let definition = variable()
                .min(spec.lower)
                .max(spec.upper)
                .name(spec.name.clone());
            vars.add(if spec.integer {
                definition.integer()
            } else {
                definition
            })
        })
        .collect();

    let objective = expression(program.objective(), &handles)?;
    let unsolved = match program.sense() {
        Sense::Maximise => vars.maximise(objective),
        Sense::Minimise => vars.minimise(objective),
    };
    let mut problem = unsolved
        .using(microlp)
        .with_time_limit(limits.time_budget.as_secs_f64());
    if let Some(gap) = limits.mip_gap {
        problem = problem
            .with_mip_gap(gap)
            .map_err(|err| SolverFailure::Backend {
                diagnostic: format!("invalid MIP gap {gap}: {err}"),
            })?;
    }
    for constraint in program.constraints() {
        let lhs = expression(&constraint.expr, &handles)?;
        problem = problem.with(match constraint.relation {
            Relation::Eq => lhs.eq(constraint.rhs),
            Relation::Leq => lhs.leq(constraint.rhs),
            Relation::Geq => lhs.geq(constraint.rhs),
        });
    }

    log::debug!(
        "handing {} variables and {} constraints to microlp",
        handles.len(),
        program.constraints().len()
    );
    let solution = problem
        .solve()
        .map_err(|err| failure_from_resolution(err, limits.time_budget))?;
    let status = match solution.status() {
        SolutionStatus::Optimal => SolveStatus::Optimal,
        SolutionStatus::TimeLimit | SolutionStatus::GapLimit => SolveStatus::Feasible,
    };
    Ok(RawSolution {
        status,
        values: handles
            .iter()
            .map(|&handle| solution.value(handle))
            .collect(),
    })
}

fn expression(expr: &LinearExpr, handles: &[Variable]) -> Result<Expression, SolverFailure> {
    let mut translated = Expression::with_capacity(expr.terms().len());
    for &(variable_id, coefficient) in expr.terms() {
        let handle = handles
            .get(variable_id.index())
            .ok_or_else(|| SolverFailure::Backend {
                diagnostic: format!(
                    "expression references undeclared variable {}",
                    variable_id.index()
                ),
            })?;
        translated.add_mul(coefficient, *handle);
    }
    Ok(translated)
}

fn failure_from_resolution(err: ResolutionError, budget: Duration) -> SolverFailure {
    match err {
        ResolutionError::Infeasible => SolverFailure::Infeasible,
        ResolutionError::Unbounded => SolverFailure::Unbounded,
        ResolutionError::Other(message) if message.starts_with(TIME_LIMIT_WITHOUT_INCUMBENT) => {
            SolverFailure::Timeout { budget }
        }
        other => SolverFailure::Backend {
            diagnostic: other.to_string(),
        },
    }
}
