//! Unit tests for the MILP solver.

use std::time::Duration;

use rstest::{fixture, rstest};
use roadie_core::test_support::two_city_tables;
use roadie_core::{
    ConstraintKind, Day, ItineraryModel, LinearExpr, PlanConfig, Relation, Sense, SolveStatus,
    VariableSpec,
};

use super::*;

const TOLERANCE: f64 = 1e-8;

#[fixture]
fn pick_one() -> LinearProgram {
    let mut program = LinearProgram::new(Sense::Maximise);
    let x = program.add_variable(VariableSpec::binary("x"));
    let y = program.add_variable(VariableSpec::binary("y"));
    program.add_constraint(
        ConstraintKind::Exclusivity { day: Day::new(0) },
        LinearExpr::new().with_term(x, 1.0).with_term(y, 1.0),
        Relation::Eq,
        1.0,
    );
    program.set_objective(LinearExpr::new().with_term(x, 4.0).with_term(y, 1.0));
    program
}

fn optimal(values: Vec<f64>) -> RawSolution {
    RawSolution {
        status: SolveStatus::Optimal,
        values,
    }
}

fn options(budget: Duration) -> SolveOptions {
    SolveOptions {
        tolerance: TOLERANCE,
        time_budget: budget,
    }
}

#[rstest]
fn snaps_near_integral_values(pick_one: LinearProgram) {
    let solution = verify(&pick_one, optimal(vec![1.0 - 1e-10, 1e-10]), TOLERANCE)
        .expect("within tolerance");
    assert_eq!(solution.values, vec![1.0, 0.0]);
    assert_eq!(solution.objective, 4.0);
    assert_eq!(solution.status, SolveStatus::Optimal);
}

#[rstest]
fn rejects_fractional_binaries(pick_one: LinearProgram) {
    let err = verify(&pick_one, optimal(vec![0.5, 0.5]), TOLERANCE).expect_err("fractional");
    assert!(matches!(err, SolverFailure::NumericalError { diagnostic } if diagnostic.contains('x')));
}

#[rstest]
fn rejects_violated_constraints(pick_one: LinearProgram) {
    let err = verify(&pick_one, optimal(vec![1.0, 1.0]), TOLERANCE).expect_err("exclusivity broken");
    assert!(
        matches!(err, SolverFailure::NumericalError { diagnostic } if diagnostic.contains("Exclusivity"))
    );
}

#[rstest]
fn rejects_non_finite_and_short_assignments(pick_one: LinearProgram) {
    assert!(matches!(
        verify(&pick_one, optimal(vec![f64::NAN, 1.0]), TOLERANCE),
        Err(SolverFailure::NumericalError { .. })
    ));
    assert!(matches!(
        verify(&pick_one, optimal(vec![1.0]), TOLERANCE),
        Err(SolverFailure::NumericalError { .. })
    ));
}

#[rstest]
fn solves_small_program(pick_one: LinearProgram) {
    let solution = MilpSolver::new()
        .solve(&pick_one, &options(Duration::from_secs(10)))
        .expect("feasible");
    assert_eq!(solution.values, vec![1.0, 0.0]);
    assert_eq!(solution.objective, 4.0);
}

#[rstest]
fn incumbent_status_is_carried_through(pick_one: LinearProgram) {
    let raw = RawSolution {
        status: SolveStatus::Feasible,
        values: vec![1.0, 0.0],
    };
    let solution = verify(&pick_one, raw, TOLERANCE).expect("within tolerance");
    assert_eq!(solution.status, SolveStatus::Feasible);
}

#[rstest]
fn zero_budget_reports_timeout(pick_one: LinearProgram) {
    let budget = Duration::ZERO;
    let outcome = MilpSolver::new().solve(&pick_one, &options(budget));
    assert_eq!(outcome, Err(SolverFailure::Timeout { budget }));
}

#[rstest]
fn mip_gap_is_forwarded_to_the_backend(pick_one: LinearProgram) {
    let solver = MilpSolver::with_config(MilpSolverConfig {
        mip_gap: Some(f32::INFINITY),
    });
    let outcome = solver.solve(&pick_one, &options(Duration::from_secs(10)));
    assert!(matches!(outcome, Err(SolverFailure::Backend { .. })));
}

#[rstest]
fn solves_two_city_model_to_the_round_trip() {
    let tables = two_city_tables(3).expect("fixture tables");
    let model = ItineraryModel::build(
        &tables.catalog,
        &tables.profits,
        &tables.costs,
        &PlanConfig::new(3, "Home"),
    )
    .expect("model builds");
    let solution = MilpSolver::new()
        .solve(model.program(), &options(Duration::from_secs(30)))
        .expect("feasible");
    assert!((solution.objective - 300.0).abs() < 1e-6);
    let away_day_one = model
        .occupancy(tables.away, Day::new(1))
        .and_then(|variable| solution.value(variable));
    assert_eq!(away_day_one, Some(1.0));
}
