//! Net-profit objective.

use crate::{Day, LinearExpr, ProfitTable};

use super::ItineraryModel;

impl ItineraryModel {
    /// Set the objective to event revenue minus transport spend:
    ///
    /// `Σ profit(c, d) · event(c, d) - Σ cost(a, b) · transition(a, b, d)`
    ///
    /// where `event` is occupancy in presence mode and attendance in
    /// explicit mode. Slots without revenue and free routes contribute no
    /// term.
    #[expect(clippy::float_arithmetic, reason = "costs enter the objective negated")]
    pub fn build_objective(&mut self, profits: &ProfitTable) {
        let mut objective = LinearExpr::new();
        for city in self.catalog.ids() {
            for day in Day::horizon(self.horizon_days) {
                let profit = profits.lookup(city, day);
                if profit <= 0.0 {
                    continue;
                }
                if let Some(variable) = self.event_variable(city, day) {
                    objective.add_term(variable, profit);
                }
            }
        }
        for transition in &self.transitions {
            if transition.cost > 0.0 {
                objective.add_term(transition.variable, -transition.cost);
            }
        }
        log::debug!("objective holds {} terms", objective.terms().len());
        self.program.set_objective(objective);
    }
}
