//! Property-based tests for the MILP solver.
//!
//! These tests use `proptest` to check invariants that must hold for every
//! valid planning instance, complementing the scenario and behavioural tests.
//!
//! # Invariants tested
//!
//! - **Optimality:** the planned objective matches an exhaustive search.
//! - **Exclusivity:** exactly one city is occupied each day.
//! - **Boundaries:** the itinerary starts and ends at home.
//! - **Flow:** every change of city is a routed move, and no other move is
//!   reported.
//! - **Sparsity:** pairs without a route never get a transition variable.
//! - **Objective round trip:** the recomputed value matches the solver.


use std::time::Duration;

use proptest::prelude::*;
use roadie_core::{Day, ItineraryModel, PlanConfig, Planner, SolverAdapter};
use roadie_solver_milp::MilpSolver;

use proptest_support::{brute_force_best, instance_strategy};

const TOLERANCE: f64 = 1e-6;

fn config(days: u16) -> PlanConfig {
    PlanConfig::new(days, "City0").with_time_budget(Duration::from_secs(60))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Property: the solver finds the exhaustive-search optimum.
    #[test]
    fn objective_matches_exhaustive_search(instance in instance_strategy()) {
        let tables = instance.tables();
        let itinerary = Planner::new(MilpSolver::new(), config(instance.days))
            .plan(&tables.catalog, &tables.profits, &tables.costs)
            .expect("staying home is always feasible");
        let best = brute_force_best(&tables, instance.days);
        prop_assert!(
            (itinerary.objective - best).abs() < TOLERANCE,
            "solver found {} but exhaustive search found {best}",
            itinerary.objective
        );
        prop_assert!((itinerary.recomputed_objective - itinerary.objective).abs() < TOLERANCE);
    }

    /// Property: itineraries have one stop per day, start and end at home,
    /// and only move along routes.
    #[test]
    fn itinerary_respects_structure(instance in instance_strategy()) {
        let tables = instance.tables();
        let itinerary = Planner::new(MilpSolver::new(), config(instance.days))
            .plan(&tables.catalog, &tables.profits, &tables.costs)
            .expect("staying home is always feasible");
        prop_assert_eq!(itinerary.len(), usize::from(instance.days));
        prop_assert_eq!(itinerary.cities().next(), Some("City0"));
        prop_assert_eq!(itinerary.cities().last(), Some("City0"));

        let cities: Vec<&str> = itinerary.cities().collect();
        let moves = cities.windows(2).filter(|pair| pair.first() != pair.last()).count();
        prop_assert_eq!(itinerary.transitions.len(), moves);
        for leg in &itinerary.transitions {
            let from = tables.catalog.resolve(&leg.from).expect("known city");
            let to = tables.catalog.resolve(&leg.to).expect("known city");
            prop_assert!(tables.costs.route(from, to).cost().is_some());
        }
    }

    /// Property: raw solutions satisfy every constraint, occupy one city per
    /// day and leave undefined pairs without variables.
    #[test]
    fn raw_solution_satisfies_model(instance in instance_strategy()) {
        let tables = instance.tables();
        let plan_config = config(instance.days);
        let model = ItineraryModel::build(&tables.catalog, &tables.profits, &tables.costs, &plan_config)
            .expect("model builds");
        let solution = MilpSolver::new()
            .solve(model.program(), &plan_config.solve_options())
            .expect("staying home is always feasible");
        prop_assert_eq!(model.program().violations(&solution.values, TOLERANCE).count(), 0);

        for day in Day::horizon(instance.days) {
            let occupied = tables
                .catalog
                .ids()
                .filter(|&city| {
                    model
                        .occupancy(city, day)
                        .and_then(|variable| solution.value(variable))
                        == Some(1.0)
                })
                .count();
            prop_assert_eq!(occupied, 1);
        }

        for from in tables.catalog.ids() {
            for to in tables.catalog.ids() {
                let routed = tables.costs.route(from, to).cost().is_some();
                for day in Day::transition_days(instance.days) {
                    prop_assert_eq!(model.transition(from, to, day).is_some(), routed);
                }
            }
        }
    }
}
