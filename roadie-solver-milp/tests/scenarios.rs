//! End-to-end planning scenarios solved with `MilpSolver`.

use rstest::rstest;
use roadie_core::test_support::two_city_tables;
use roadie_core::{
    AttendanceMode, CityCatalog, Day, PlanConfig, PlanError, Planner, ProfitTable, SolverFailure,
    TransportCostTable,
};
use roadie_solver_milp::MilpSolver;

fn planner(config: PlanConfig) -> Planner<MilpSolver> {
    Planner::new(MilpSolver::new(), config)
}

#[rstest]
fn two_city_tour_collects_the_event() {
    let tables = two_city_tables(3).expect("fixture tables");
    let itinerary = planner(PlanConfig::new(3, "Home"))
        .plan(&tables.catalog, &tables.profits, &tables.costs)
        .expect("plan succeeds");
    assert_eq!(itinerary.cities().collect::<Vec<_>>(), ["Home", "Away", "Home"]);
    assert!((itinerary.objective - 300.0).abs() < 1e-6);
    assert!((itinerary.recomputed_objective - 300.0).abs() < 1e-6);
    assert_eq!(itinerary.transitions.len(), 2);
    assert!((itinerary.transport_cost - 200.0).abs() < 1e-6);
}

#[rstest]
fn unreachable_event_is_not_fabricated() {
    let catalog = CityCatalog::new([("Home", "Here"), ("Away", "There")]).expect("catalogue");
    let away = catalog.resolve("Away").expect("Away");
    let mut profits = ProfitTable::new(&catalog, 3);
    profits.insert(away, Day::new(1), 500.0).expect("profit");
    let costs = TransportCostTable::new(&catalog);
    let itinerary = planner(PlanConfig::new(3, "Home"))
        .plan(&catalog, &profits, &costs)
        .expect("staying home is feasible");
    assert_eq!(itinerary.cities().collect::<Vec<_>>(), ["Home"; 3]);
    assert!(itinerary.transitions.is_empty());
    assert!(itinerary.objective.abs() < 1e-6);
}

#[rstest]
fn single_day_horizon_stays_home() {
    let tables = two_city_tables(2).expect("fixture tables");
    let catalog = tables.catalog;
    let profits = ProfitTable::new(&catalog, 1);
    let itinerary = planner(PlanConfig::new(1, "Home"))
        .plan(&catalog, &profits, &tables.costs)
        .expect("plan succeeds");
    assert_eq!(itinerary.cities().collect::<Vec<_>>(), ["Home"]);
    assert!(itinerary.transitions.is_empty());
}

#[rstest]
fn unprofitable_trip_is_skipped() {
    let tables = two_city_tables(3).expect("fixture tables");
    let mut costs = TransportCostTable::new(&tables.catalog);
    costs
        .insert(tables.home, tables.away, 300.0)
        .expect("valid cost");
    let itinerary = planner(PlanConfig::new(3, "Home"))
        .plan(&tables.catalog, &tables.profits, &costs)
        .expect("plan succeeds");
    assert_eq!(itinerary.cities().collect::<Vec<_>>(), ["Home"; 3]);
}

#[rstest]
fn explicit_attendance_needs_a_rest_day_before_the_event() {
    let tables = two_city_tables(4).expect("fixture tables");
    let config = PlanConfig::new(4, "Home").with_attendance(AttendanceMode::Explicit);

    // The only event falls on the arrival day, so the trip cannot pay off.
    let itinerary = planner(config.clone())
        .plan(&tables.catalog, &tables.profits, &tables.costs)
        .expect("plan succeeds");
    assert_eq!(itinerary.cities().collect::<Vec<_>>(), ["Home"; 4]);

    let mut profits = ProfitTable::new(&tables.catalog, 4);
    profits
        .insert(tables.away, Day::new(2), 500.0)
        .expect("profit");
    let itinerary = planner(config)
        .plan(&tables.catalog, &profits, &tables.costs)
        .expect("plan succeeds");
    assert_eq!(
        itinerary.cities().collect::<Vec<_>>(),
        ["Home", "Away", "Away", "Home"]
    );
    assert!((itinerary.objective - 300.0).abs() < 1e-6);
    assert!((itinerary.revenue - 500.0).abs() < 1e-6);
    assert!(
        itinerary
            .stops
            .iter()
            .any(|stop| stop.attending && stop.day == Day::new(2))
    );
}

#[rstest]
fn zero_country_cap_with_event_at_home_is_infeasible() {
    let tables = two_city_tables(3).expect("fixture tables");
    let mut profits = tables.profits.clone();
    profits
        .insert(tables.home, Day::new(0), 50.0)
        .expect("profit");
    let config = PlanConfig::new(3, "Home").with_max_events_per_country(Some(0));
    let err = planner(config)
        .plan(&tables.catalog, &profits, &tables.costs)
        .expect_err("home is pinned to an event day");
    assert_eq!(err, PlanError::Solver(SolverFailure::Infeasible));
    assert_eq!(err.reason(), "Infeasible");
}

#[rstest]
fn country_cap_limits_events_per_country() {
    let catalog = CityCatalog::new([("Home", "Here"), ("Paris", "France"), ("Lyon", "France")])
        .expect("catalogue");
    let [home, paris, lyon] =
        ["Home", "Paris", "Lyon"].map(|name| catalog.resolve(name).expect("city"));
    let mut profits = ProfitTable::new(&catalog, 5);
    profits.insert(paris, Day::new(1), 400.0).expect("profit");
    profits.insert(paris, Day::new(2), 400.0).expect("profit");
    profits.insert(lyon, Day::new(3), 400.0).expect("profit");
    let mut costs = TransportCostTable::new(&catalog);
    costs.insert(home, paris, 10.0).expect("cost");
    costs.insert(home, lyon, 10.0).expect("cost");
    costs.insert(paris, lyon, 10.0).expect("cost");

    let uncapped = planner(PlanConfig::new(5, "Home"))
        .plan(&catalog, &profits, &costs)
        .expect("plan succeeds");
    assert!((uncapped.revenue - 1200.0).abs() < 1e-6);

    let capped = planner(PlanConfig::new(5, "Home").with_max_events_per_country(Some(1)))
        .plan(&catalog, &profits, &costs)
        .expect("plan succeeds");
    assert!((capped.revenue - 400.0).abs() < 1e-6);
    assert_eq!(capped.stops.iter().filter(|stop| stop.attending).count(), 1);
}
