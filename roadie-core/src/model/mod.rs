//! The itinerary optimisation model.
//!
//! Decision variables:
//!
//! - `occupancy(c, d)`: the agent is in city `c` on day `d`;
//! - `transition(a, b, d)`: the agent was in `a` on day `d - 1` and is in `b`
//!   on day `d`. Only allocated for pairs with a direct route;
//! - `attend(c, d)`: only in [`AttendanceMode::Explicit`], the agent attends
//!   the event in `c` on day `d`.
//!
//! The constraint builders tie these together with linear
//! constraints only, and [`ItineraryModel::build_objective`] prices them with
//! `variable × constant` terms.

use std::collections::HashMap;

use crate::{
    AttendanceMode, CityCatalog, CityId, ConfigError, DataError, Day, LinearProgram, PlanConfig,
    PlanError, ProfitTable, Sense, TransportCostTable, VariableId, VariableSpec,
};

mod constraints;
mod objective;

/// A transition variable and the route it prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionVariable {
    /// Departure city.
    pub from: CityId,
    /// Arrival city.
    pub to: CityId,
    /// Day of arrival; always at least 1.
    pub day: Day,
    /// Cost of the route.
    pub cost: f64,
    /// Program variable.
    pub variable: VariableId,
}

/// Variables, constraints and objective for one optimisation run.
///
/// # Examples
/// ```
/// use roadie_core::{CityCatalog, ItineraryModel, PlanConfig, ProfitTable, TransportCostTable};
///
/// let catalog = CityCatalog::new([("Home", "Here"), ("Away", "There")])?;
/// let [home, away] = ["Home", "Away"].map(|name| catalog.resolve(name).unwrap());
/// let profits = ProfitTable::new(&catalog, 3);
/// let mut costs = TransportCostTable::new(&catalog);
/// costs.insert(home, away, 100.0)?;
///
/// let model = ItineraryModel::build(&catalog, &profits, &costs, &PlanConfig::new(3, "Home"))?;
/// // 2 cities × 3 days of occupancy, 2 directions × 2 arrival days of transitions.
/// assert_eq!(model.program().variables().len(), 10);
/// # Ok::<(), roadie_core::PlanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ItineraryModel {
    catalog: CityCatalog,
    horizon_days: u16,
    attendance_mode: AttendanceMode,
    program: LinearProgram,
    occupancy: Vec<VariableId>,
    attendance: Vec<VariableId>,
    transitions: Vec<TransitionVariable>,
    transition_index: HashMap<(CityId, CityId, Day), VariableId>,
}

impl ItineraryModel {
    /// Build the canonical model: allocate variables, register every
    /// constraint and set the objective.
    ///
    /// # Errors
    /// Returns [`PlanError::Config`] for invalid configuration, an unknown
    /// home city or a horizon that disagrees with the profit table, and
    /// [`PlanError::Data`] when a table was built for another catalogue.
    pub fn build(
        catalog: &CityCatalog,
        profits: &ProfitTable,
        costs: &TransportCostTable,
        config: &PlanConfig,
    ) -> Result<Self, PlanError> {
        if profits.catalog() != catalog {
            return Err(DataError::CatalogMismatch { table: "profit" }.into());
        }
        if profits.horizon_days() != config.horizon_days {
            return Err(ConfigError::HorizonMismatch {
                configured: config.horizon_days,
                table: profits.horizon_days(),
            }
            .into());
        }
        let mut model = Self::allocate(catalog, costs, config)?;
        model.build_occupancy_exclusivity();
        model.build_boundary_constraints(&config.home_city)?;
        model.build_flow_conservation();
        model.build_transition_linkage();
        model.build_mutual_exclusion();
        if let Some(limit) = config.max_events_per_country {
            model.build_country_event_limits(profits, limit);
        }
        model.build_objective(profits);
        log::info!(
            "built itinerary model: {} cities, {} days, {} variables, {} constraints",
            model.catalog.len(),
            model.horizon_days,
            model.program.variables().len(),
            model.program.constraints().len()
        );
        Ok(model)
    }

    /// Allocate every decision variable without registering constraints.
    ///
    /// # Errors
    /// Returns [`PlanError::Config`] when the configuration is invalid and
    /// [`PlanError::Data`] when `costs` was built for another catalogue.
    pub fn allocate(
        catalog: &CityCatalog,
        costs: &TransportCostTable,
        config: &PlanConfig,
    ) -> Result<Self, PlanError> {
        config.validate()?;
        if costs.catalog() != catalog {
            return Err(DataError::CatalogMismatch { table: "cost" }.into());
        }
        let horizon_days = config.horizon_days;
        let mut program = LinearProgram::new(Sense::Maximise);

        let mut occupancy = Vec::with_capacity(catalog.len() * usize::from(horizon_days));
        for (_, city) in catalog.iter() {
            for day in Day::horizon(horizon_days) {
                occupancy.push(program.add_variable(VariableSpec::binary(format!(
                    "occupancy[{},{}]",
                    city.name,
                    day.value()
                ))));
            }
        }

        let routes = costs.direct_routes();
        let mut transitions = Vec::new();
        let mut transition_index = HashMap::new();
        for day in Day::transition_days(horizon_days) {
            for route in &routes {
                let variable = program.add_variable(VariableSpec::binary(format!(
                    "transition[{}->{},{}]",
                    catalog.label(route.from),
                    catalog.label(route.to),
                    day.value()
                )));
                transition_index.insert((route.from, route.to, day), variable);
                transitions.push(TransitionVariable {
                    from: route.from,
                    to: route.to,
                    day,
                    cost: route.cost,
                    variable,
                });
            }
        }

        let mut attendance = Vec::new();
        if config.attendance == AttendanceMode::Explicit {
            for (_, city) in catalog.iter() {
                for day in Day::horizon(horizon_days) {
                    attendance.push(program.add_variable(VariableSpec::binary(format!(
                        "attend[{},{}]",
                        city.name,
                        day.value()
                    ))));
                }
            }
        }

        log::debug!(
            "allocated {} occupancy, {} transition and {} attendance variables",
            occupancy.len(),
            transitions.len(),
            attendance.len()
        );
        Ok(Self {
            catalog: catalog.clone(),
            horizon_days,
            attendance_mode: config.attendance,
            program,
            occupancy,
            attendance,
            transitions,
            transition_index,
        })
    }

    fn slot(&self, city: CityId, day: Day) -> Option<usize> {
        (self.catalog.contains(city) && day.value() < self.horizon_days)
            .then(|| city.index() * usize::from(self.horizon_days) + day.index())
    }

    /// Occupancy variable for `city` on `day`.
    #[must_use]
    pub fn occupancy(&self, city: CityId, day: Day) -> Option<VariableId> {
        self.slot(city, day)
            .and_then(|slot| self.occupancy.get(slot).copied())
    }

    /// Attendance variable for `city` on `day`; `None` in presence mode.
    #[must_use]
    pub fn attendance(&self, city: CityId, day: Day) -> Option<VariableId> {
        self.slot(city, day)
            .and_then(|slot| self.attendance.get(slot).copied())
    }

    /// Variable whose value earns the revenue of `city` on `day`: attendance
    /// in explicit mode, occupancy otherwise.
    #[must_use]
    pub fn event_variable(&self, city: CityId, day: Day) -> Option<VariableId> {
        match self.attendance_mode {
            AttendanceMode::Presence => self.occupancy(city, day),
            AttendanceMode::Explicit => self.attendance(city, day),
        }
    }

    /// Transition variable for moving `from -> to` and arriving on `day`;
    /// `None` when the pair has no direct route.
    #[must_use]
    pub fn transition(&self, from: CityId, to: CityId, day: Day) -> Option<VariableId> {
        self.transition_index.get(&(from, to, day)).copied()
    }

    /// All transition variables, ordered by day then route.
    #[must_use]
    pub fn transitions(&self) -> &[TransitionVariable] {
        &self.transitions
    }

    /// Transition variables arriving on `day`.
    pub fn transitions_on(&self, day: Day) -> impl Iterator<Item = &TransitionVariable> {
        self.transitions.iter().filter(move |t| t.day == day)
    }

    /// The assembled linear program.
    #[must_use]
    pub const fn program(&self) -> &LinearProgram {
        &self.program
    }

    /// Catalogue the model was built for.
    #[must_use]
    pub const fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }

    /// Number of days in the horizon.
    #[must_use]
    pub const fn horizon_days(&self) -> u16 {
        self.horizon_days
    }

    /// Attendance mode the model was built with.
    #[must_use]
    pub const fn attendance_mode(&self) -> AttendanceMode {
        self.attendance_mode
    }

    /// Encode a day-by-day city path as a full assignment.
    ///
    /// Occupancy follows `path`, transitions are set for every change of
    /// city, and in explicit mode attendance is set on every day without an
    /// arrival. Moves without a direct route simply have no transition set,
    /// so the assignment then violates flow conservation. Returns `None` when
    /// the path length differs from the horizon or names a foreign city.
    #[must_use]
    pub fn assignment_for_path(&self, path: &[CityId]) -> Option<Vec<f64>> {
        if path.len() != usize::from(self.horizon_days) {
            return None;
        }
        let mut values = vec![0.0; self.program.variables().len()];
        let mut previous: Option<CityId> = None;
        for (day, &city) in Day::horizon(self.horizon_days).zip(path) {
            *values.get_mut(self.occupancy(city, day)?.index())? = 1.0;
            let arrived = previous.filter(|&from| from != city);
            if let Some(from) = arrived
                && let Some(variable) = self.transition(from, city, day)
            {
                *values.get_mut(variable.index())? = 1.0;
            }
            if arrived.is_none()
                && let Some(variable) = self.attendance(city, day)
            {
                *values.get_mut(variable.index())? = 1.0;
            }
            previous = Some(city);
        }
        Some(values)
    }
}
