//! Behaviour-driven step definitions driving the solve CLI scenarios.

use super::helpers::{ScriptedSolverBuilder, TwoCityWorkspace};
use super::*;
use crate::solve::run_solve_with;
use roadie_core::Itinerary;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

struct SolveWorld {
    workspace: TwoCityWorkspace,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl SolveWorld {
    fn new() -> Self {
        Self {
            workspace: TwoCityWorkspace::new(),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec![
            "roadie".to_owned(),
            "solve".to_owned(),
            format!("--{ARG_DATA_DIR}"),
            self.workspace.root().as_str().to_owned(),
            format!("--{ARG_HORIZON_DAYS}"),
            "3".to_owned(),
        ];
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> SolveWorld {
    SolveWorld::new()
}

#[given("the two-city tables exist on disk")]
fn two_city_tables_exist(#[from(world)] world: &SolveWorld) {
    assert!(world.workspace.root().join("cities.csv").is_file());
}

#[given("the cost matrix has been removed")]
fn cost_matrix_removed(#[from(world)] world: &SolveWorld) {
    fs::remove_file(world.workspace.root().join("transportation_costs.csv"))
        .expect("remove cost matrix");
}

#[given("the home city is {city}")]
fn home_city_is(#[from(world)] world: &SolveWorld, city: String) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_HOME_CITY}"), city]);
}

#[when("I run the solve command")]
fn run_solve_command(#[from(world)] world: &SolveWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Solve(args) => {
            let builder = ScriptedSolverBuilder {
                path: vec!["Home", "Away", "Home"],
            };
            let mut buffer = world.stdout.borrow_mut();
            run_solve_with(args, &builder, &mut *buffer)
        }
        Command::Generate(_) => panic!("expected solve command"),
    });

    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints an itinerary through Away")]
fn command_succeeds_and_prints_json(#[from(world)] world: &SolveWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let itinerary = printed_itinerary(world);
    assert_eq!(
        itinerary.cities().collect::<Vec<_>>(),
        vec!["Home", "Away", "Home"]
    );
}

#[then("the printed itinerary earns {objective}")]
fn printed_itinerary_earns(#[from(world)] world: &SolveWorld, objective: f64) {
    let itinerary = printed_itinerary(world);
    assert_eq!(itinerary.recomputed_objective, objective);
    assert_eq!(itinerary.objective, objective);
}

#[then("the command fails because the costs path is missing")]
fn command_fails_missing_costs(#[from(world)] world: &SolveWorld) {
    match &*world.error() {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_COSTS),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[then("the command fails with planning reason {reason}")]
fn command_fails_with_reason(#[from(world)] world: &SolveWorld, reason: String) {
    match &*world.error() {
        CliError::Plan(source) => assert_eq!(source.reason(), reason),
        other => panic!("expected Plan, found {other:?}"),
    }
}

fn printed_itinerary(world: &SolveWorld) -> Itinerary {
    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    serde_json::from_str(&stdout).expect("output should be a JSON itinerary")
}

#[test]
fn scenario_indices_follow_feature_order() {
    let feature =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/features/solve_command.feature");
    let contents = fs::read_to_string(&feature).unwrap_or_else(|err| {
        panic!("failed to read feature file {feature:?}: {err}");
    });
    let titles: Vec<&str> = contents
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Scenario: "))
        .collect();
    assert_eq!(
        titles,
        [
            "planning the two-city tour",
            "rejecting a missing cost matrix",
            "rejecting an unknown home city",
        ]
    );
}

#[scenario(path = "tests/features/solve_command.feature", index = 0)]
fn solve_two_city_tour(#[from(world)] world: SolveWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/solve_command.feature", index = 1)]
fn solve_missing_costs(#[from(world)] world: SolveWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/solve_command.feature", index = 2)]
fn solve_unknown_home_city(#[from(world)] world: SolveWorld) {
    let _ = world;
}
