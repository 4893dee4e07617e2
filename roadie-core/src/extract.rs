//! Read a solver assignment back as an [`Itinerary`].

use crate::{
    AttendanceMode, CityId, DEFAULT_ACCEPTANCE_THRESHOLD, Day, ExtractionError, Itinerary,
    ItineraryModel, Leg, ProfitTable, Solution, Stop, TransportCostTable,
};

/// Relative tolerance when comparing reported and recomputed objectives.
const OBJECTIVE_TOLERANCE: f64 = 1e-6;

/// Converts a [`Solution`] into an [`Itinerary`] and cross-checks its value.
///
/// # Examples
/// ```
/// use roadie_core::{
///     CityCatalog, ItineraryModel, PlanConfig, ProfitTable, ResultExtractor, Solution,
///     SolveStatus, TransportCostTable,
/// };
///
/// let catalog = CityCatalog::new([("Home", "Here")])?;
/// let profits = ProfitTable::new(&catalog, 2);
/// let costs = TransportCostTable::new(&catalog);
/// let model = ItineraryModel::build(&catalog, &profits, &costs, &PlanConfig::new(2, "Home"))?;
///
/// let solution = Solution { status: SolveStatus::Optimal, objective: 0.0, values: vec![1.0, 1.0] };
/// let itinerary = ResultExtractor::default().extract(&model, &profits, &costs, &solution)?;
/// assert_eq!(itinerary.cities().collect::<Vec<_>>(), ["Home", "Home"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultExtractor {
    threshold: f64,
}

impl Default for ResultExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_ACCEPTANCE_THRESHOLD)
    }
}

impl ResultExtractor {
    /// Extractor that treats values above `threshold` as selected.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Selection threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Build the itinerary encoded by `solution`.
    ///
    /// # Errors
    /// Returns an [`ExtractionError`] when the assignment does not describe
    /// exactly one routed path or its value disagrees with the solver.
    #[expect(
        clippy::float_arithmetic,
        reason = "revenue and cost totals are floating-point sums"
    )]
    pub fn extract(
        &self,
        model: &ItineraryModel,
        profits: &ProfitTable,
        costs: &TransportCostTable,
        solution: &Solution,
    ) -> Result<Itinerary, ExtractionError> {
        let expected = model.program().variables().len();
        if solution.values.len() != expected {
            return Err(ExtractionError::VariableCountMismatch {
                expected,
                found: solution.values.len(),
            });
        }

        let path = self.path(model, solution)?;
        let catalog = model.catalog();

        let mut transitions = Vec::new();
        let mut previous: Option<CityId> = None;
        for (day, &city) in Day::horizon(model.horizon_days()).zip(&path) {
            let moved = previous.filter(|&from| from != city);
            if let Some(from) = moved {
                let cost = costs
                    .lookup(from, city)
                    .map_err(|_| ExtractionError::UnroutedMove {
                        day,
                        from: catalog.label(from),
                        to: catalog.label(city),
                    })?;
                transitions.push(Leg {
                    day,
                    from: catalog.label(from),
                    to: catalog.label(city),
                    cost,
                });
            }
            if previous.is_some() {
                self.check_transitions(model, solution, day, moved.zip(Some(city)))?;
            }
            previous = Some(city);
        }

        let mut stops = Vec::with_capacity(path.len());
        for (day, &city) in Day::horizon(model.horizon_days()).zip(&path) {
            let attending = match model.attendance_mode() {
                AttendanceMode::Presence => profits.has_event(city, day),
                AttendanceMode::Explicit => model
                    .attendance(city, day)
                    .and_then(|variable| solution.value(variable))
                    .is_some_and(|value| value > self.threshold),
            };
            let revenue = if attending {
                profits.lookup(city, day)
            } else {
                0.0
            };
            stops.push(Stop {
                day,
                city: catalog.label(city),
                attending,
                revenue,
            });
        }

        let revenue: f64 = stops.iter().map(|stop| stop.revenue).sum();
        let transport_cost: f64 = transitions.iter().map(|leg| leg.cost).sum();
        let recomputed = revenue - transport_cost;
        let allowed = OBJECTIVE_TOLERANCE * solution.objective.abs().max(1.0);
        if (recomputed - solution.objective).abs() > allowed {
            return Err(ExtractionError::ObjectiveMismatch {
                reported: solution.objective,
                recomputed,
            });
        }

        log::debug!(
            "extracted itinerary with {} moves, revenue {revenue}, transport {transport_cost}",
            transitions.len()
        );
        Ok(Itinerary {
            stops,
            transitions,
            revenue,
            transport_cost,
            objective: solution.objective,
            recomputed_objective: recomputed,
        })
    }

    /// The single city selected on each day.
    fn path(
        &self,
        model: &ItineraryModel,
        solution: &Solution,
    ) -> Result<Vec<CityId>, ExtractionError> {
        let catalog = model.catalog();
        let mut path = Vec::with_capacity(usize::from(model.horizon_days()));
        for day in Day::horizon(model.horizon_days()) {
            let values: Vec<(CityId, f64)> = catalog
                .ids()
                .map(|city| {
                    let value = model
                        .occupancy(city, day)
                        .and_then(|variable| solution.value(variable))
                        .unwrap_or(0.0);
                    (city, value)
                })
                .collect();
            let named = |pairs: &[(CityId, f64)]| -> Vec<(String, f64)> {
                pairs
                    .iter()
                    .map(|&(city, value)| (catalog.label(city), value))
                    .collect()
            };
            let candidates: Vec<(CityId, f64)> = values
                .iter()
                .copied()
                .filter(|&(_, value)| value > self.threshold)
                .collect();
            match candidates.as_slice() {
                [(city, _)] => path.push(*city),
                [] => {
                    return Err(ExtractionError::NoCity {
                        day,
                        values: named(&values),
                    });
                }
                _ => {
                    return Err(ExtractionError::Ambiguous {
                        day,
                        candidates: named(&candidates),
                    });
                }
            }
        }
        Ok(path)
    }

    /// Transitions selected on `day` must be exactly the move on the path.
    fn check_transitions(
        &self,
        model: &ItineraryModel,
        solution: &Solution,
        day: Day,
        expected: Option<(CityId, CityId)>,
    ) -> Result<(), ExtractionError> {
        let mut selected = model.transitions_on(day).filter(|transition| {
            solution
                .value(transition.variable)
                .is_some_and(|value| value > self.threshold)
        });
        let first = selected.next().map(|transition| (transition.from, transition.to));
        if first != expected || selected.next().is_some() {
            return Err(ExtractionError::TransitionMismatch { day });
        }
        Ok(())
    }
}
