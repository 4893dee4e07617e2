//! Constraint builders for [`ItineraryModel`].
//!
//! Every builder only registers constraints; none of them allocates
//! variables. All constraints are linear with unit coefficients, so no
//! product of decision variables ever reaches the solver.

use crate::{
    AttendanceMode, ConfigError, ConstraintKind, Day, LinearExpr, ProfitTable, Relation,
};

use super::ItineraryModel;

impl ItineraryModel {
    /// For every day, exactly one city is occupied:
    /// `Σ_c occupancy(c, d) == 1`.
    pub fn build_occupancy_exclusivity(&mut self) {
        for day in Day::horizon(self.horizon_days) {
            let mut expr = LinearExpr::new();
            for city in self.catalog.ids() {
                if let Some(variable) = self.occupancy(city, day) {
                    expr.add_term(variable, 1.0);
                }
            }
            self.program
                .add_constraint(ConstraintKind::Exclusivity { day }, expr, Relation::Eq, 1.0);
        }
    }

    /// Pin the home city on day 0 and on the final day. Exclusivity then
    /// forces every other city to zero on those days. A single-day horizon
    /// yields one constraint.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownHomeCity`] when `home_city` is not in
    /// the catalogue.
    pub fn build_boundary_constraints(&mut self, home_city: &str) -> Result<(), ConfigError> {
        let home = self
            .catalog
            .resolve(home_city)
            .map_err(|_| ConfigError::UnknownHomeCity {
                city: home_city.to_owned(),
            })?;
        let first = Day::new(0);
        let boundary_days = match Day::last_of(self.horizon_days) {
            Some(last) if last != first => vec![first, last],
            _ => vec![first],
        };
        for day in boundary_days {
            if let Some(variable) = self.occupancy(home, day) {
                self.program.add_constraint(
                    ConstraintKind::Boundary { day },
                    LinearExpr::new().with_term(variable, 1.0),
                    Relation::Eq,
                    1.0,
                );
            }
        }
        Ok(())
    }

    /// Per-city, per-day flow conservation for every day `d >= 1`:
    ///
    /// `occupancy(c, d) = occupancy(c, d-1) + Σ_b transition(b, c, d) - Σ_b transition(c, b, d)`
    ///
    /// registered as `occupancy(c, d) - occupancy(c, d-1) - inbound + outbound == 0`.
    /// Each step is balanced on its own, so violations on different days
    /// cannot cancel out.
    pub fn build_flow_conservation(&mut self) {
        for day in Day::transition_days(self.horizon_days) {
            let Some(yesterday) = day.previous() else {
                continue;
            };
            for city in self.catalog.ids() {
                let (Some(today_var), Some(yesterday_var)) =
                    (self.occupancy(city, day), self.occupancy(city, yesterday))
                else {
                    continue;
                };
                let mut expr = LinearExpr::new()
                    .with_term(today_var, 1.0)
                    .with_term(yesterday_var, -1.0);
                for transition in self.transitions_on(day) {
                    if transition.to == city {
                        expr.add_term(transition.variable, -1.0);
                    } else if transition.from == city {
                        expr.add_term(transition.variable, 1.0);
                    }
                }
                self.program.add_constraint(
                    ConstraintKind::FlowConservation { city, day },
                    expr,
                    Relation::Eq,
                    0.0,
                );
            }
        }
    }

    /// Fortet linearisation of `transition(a, b, d) = occupancy(a, d-1) · occupancy(b, d)`:
    ///
    /// - `transition >= occupancy(a, d-1) + occupancy(b, d) - 1`
    /// - `transition <= occupancy(a, d-1)`
    /// - `transition <= occupancy(b, d)`
    ///
    /// The upper bounds stop a transition from firing without its endpoints,
    /// which also rules out chaining several moves inside one day boundary.
    pub fn build_transition_linkage(&mut self) {
        for &transition in &self.transitions {
            let Some(yesterday) = transition.day.previous() else {
                continue;
            };
            let (Some(origin), Some(destination)) = (
                self.occupancy(transition.from, yesterday),
                self.occupancy(transition.to, transition.day),
            ) else {
                continue;
            };
            let (from, to, day) = (transition.from, transition.to, transition.day);
            self.program.add_constraint(
                ConstraintKind::LinkageLower { from, to, day },
                LinearExpr::new()
                    .with_term(transition.variable, 1.0)
                    .with_term(origin, -1.0)
                    .with_term(destination, -1.0),
                Relation::Geq,
                -1.0,
            );
            self.program.add_constraint(
                ConstraintKind::LinkageOrigin { from, to, day },
                LinearExpr::new()
                    .with_term(transition.variable, 1.0)
                    .with_term(origin, -1.0),
                Relation::Leq,
                0.0,
            );
            self.program.add_constraint(
                ConstraintKind::LinkageDestination { from, to, day },
                LinearExpr::new()
                    .with_term(transition.variable, 1.0)
                    .with_term(destination, -1.0),
                Relation::Leq,
                0.0,
            );
        }
    }

    /// Attending and travelling are exclusive on the same day:
    /// `Σ_c attend(c, d) + Σ_{a,b} transition(a, b, d) <= 1`, and attending
    /// requires presence: `attend(c, d) <= occupancy(c, d)`.
    ///
    /// In [`AttendanceMode::Presence`] occupancy is attendance and this
    /// builder registers nothing.
    pub fn build_mutual_exclusion(&mut self) {
        if self.attendance_mode == AttendanceMode::Presence {
            log::debug!("presence mode: occupancy doubles as attendance, no exclusion needed");
            return;
        }
        for day in Day::horizon(self.horizon_days) {
            let mut expr = LinearExpr::new();
            for city in self.catalog.ids() {
                let (Some(attend), Some(occupied)) =
                    (self.attendance(city, day), self.occupancy(city, day))
                else {
                    continue;
                };
                expr.add_term(attend, 1.0);
                self.program.add_constraint(
                    ConstraintKind::AttendanceRequiresPresence { city, day },
                    LinearExpr::new()
                        .with_term(attend, 1.0)
                        .with_term(occupied, -1.0),
                    Relation::Leq,
                    0.0,
                );
            }
            for transition in self.transitions_on(day) {
                expr.add_term(transition.variable, 1.0);
            }
            self.program.add_constraint(
                ConstraintKind::MutualExclusion { day },
                expr,
                Relation::Leq,
                1.0,
            );
        }
    }

    /// Cap the number of events attended in each country at `limit`.
    ///
    /// Only `(city, day)` slots with positive revenue count as events.
    /// Countries without any event get no constraint.
    pub fn build_country_event_limits(&mut self, profits: &ProfitTable, limit: u32) {
        let countries: Vec<String> = self
            .catalog
            .countries()
            .into_iter()
            .map(str::to_owned)
            .collect();
        for country in countries {
            let mut expr = LinearExpr::new();
            for city in self.catalog.cities_in(&country) {
                for day in Day::horizon(self.horizon_days) {
                    if !profits.has_event(city, day) {
                        continue;
                    }
                    if let Some(variable) = self.event_variable(city, day) {
                        expr.add_term(variable, 1.0);
                    }
                }
            }
            if expr.is_empty() {
                continue;
            }
            self.program.add_constraint(
                ConstraintKind::CountryEventLimit { country },
                expr,
                Relation::Leq,
                f64::from(limit),
            );
        }
    }
}
