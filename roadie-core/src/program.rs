//! Solver-agnostic linear program.
//!
//! [`ItineraryModel`](crate::ItineraryModel) assembles one of these and a
//! [`SolverAdapter`](crate::SolverAdapter) consumes it. Expressions only hold
//! `variable × constant` terms, so every program is a MILP.

use crate::{CityId, Day};

/// Index of a variable within its [`LinearProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl VariableId {
    /// Position of the variable in [`LinearProgram::variables`] and in a
    /// solution's value vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Declaration of one decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpec {
    /// Human-readable name used in diagnostics.
    pub name: String,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Whether the variable must take an integral value.
    pub integer: bool,
}

impl VariableSpec {
    /// A `{0, 1}` variable.
    #[must_use]
    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lower: 0.0,
            upper: 1.0,
            integer: true,
        }
    }
}

/// Sum of `coefficient × variable` terms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearExpr {
    terms: Vec<(VariableId, f64)>,
}

impl LinearExpr {
    /// Empty expression.
    #[must_use]
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Append a term and return the expression for chaining.
    #[must_use]
    pub fn with_term(mut self, variable: VariableId, coefficient: f64) -> Self {
        self.add_term(variable, coefficient);
        self
    }

    /// Append a term.
    pub fn add_term(&mut self, variable: VariableId, coefficient: f64) {
        self.terms.push((variable, coefficient));
    }

    /// Terms in insertion order.
    #[must_use]
    pub fn terms(&self) -> &[(VariableId, f64)] {
        &self.terms
    }

    /// Whether the expression has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under `values`, or `None` when a variable has
    /// no value.
    #[expect(
        clippy::float_arithmetic,
        reason = "expression evaluation is floating-point by nature"
    )]
    #[must_use]
    pub fn evaluate(&self, values: &[f64]) -> Option<f64> {
        self.terms.iter().try_fold(0.0, |sum, (variable, coefficient)| {
            values
                .get(variable.index())
                .map(|value| sum + coefficient * value)
        })
    }

    /// Sum of absolute coefficients.
    #[expect(clippy::float_arithmetic, reason = "sums coefficient magnitudes")]
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.terms.iter().map(|(_, coefficient)| coefficient.abs()).sum()
    }
}

/// Comparison between an expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `expr == rhs`
    Eq,
    /// `expr <= rhs`
    Leq,
    /// `expr >= rhs`
    Geq,
}

/// What a constraint encodes and where it applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Exactly one city is occupied on `day`.
    Exclusivity {
        /// Day constrained.
        day: Day,
    },
    /// The home city is occupied on a boundary day.
    Boundary {
        /// Boundary day.
        day: Day,
    },
    /// Occupancy of `city` changes only through transitions arriving on `day`.
    FlowConservation {
        /// City constrained.
        city: CityId,
        /// Day constrained.
        day: Day,
    },
    /// A transition is taken whenever both of its endpoints are occupied.
    LinkageLower {
        /// Departure city.
        from: CityId,
        /// Arrival city.
        to: CityId,
        /// Day of arrival.
        day: Day,
    },
    /// A transition requires presence at its origin the day before.
    LinkageOrigin {
        /// Departure city.
        from: CityId,
        /// Arrival city.
        to: CityId,
        /// Day of arrival.
        day: Day,
    },
    /// A transition requires presence at its destination on arrival.
    LinkageDestination {
        /// Departure city.
        from: CityId,
        /// Arrival city.
        to: CityId,
        /// Day of arrival.
        day: Day,
    },
    /// Attending an event and travelling are exclusive on `day`.
    MutualExclusion {
        /// Day constrained.
        day: Day,
    },
    /// Attending an event in `city` requires being there.
    AttendanceRequiresPresence {
        /// City constrained.
        city: CityId,
        /// Day constrained.
        day: Day,
    },
    /// Events attended in `country` stay within the configured cap.
    CountryEventLimit {
        /// Country constrained.
        country: String,
    },
}

/// A linear (in)equality over program variables.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// What the constraint encodes.
    pub kind: ConstraintKind,
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Comparison operator.
    pub relation: Relation,
    /// Right-hand side constant.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Amount by which `values` violate the constraint; `0.0` when satisfied
    /// and `None` when a variable has no value.
    #[expect(clippy::float_arithmetic, reason = "violation is a signed difference")]
    #[must_use]
    pub fn violation(&self, values: &[f64]) -> Option<f64> {
        let lhs = self.expr.evaluate(values)?;
        let excess = match self.relation {
            Relation::Eq => (lhs - self.rhs).abs(),
            Relation::Leq => lhs - self.rhs,
            Relation::Geq => self.rhs - lhs,
        };
        Some(excess.max(0.0))
    }

    /// Whether `values` satisfy the constraint within `tolerance`, scaled by
    /// the magnitude of the constraint's coefficients and right-hand side.
    #[expect(clippy::float_arithmetic, reason = "scales tolerance by magnitude")]
    #[must_use]
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let scale = self.expr.magnitude().max(self.rhs.abs()).max(1.0);
        self.violation(values)
            .is_some_and(|violation| violation <= tolerance * scale)
    }
}

/// Optimisation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Maximise the objective.
    Maximise,
    /// Minimise the objective.
    Minimise,
}

/// Variables, constraints and objective handed to a solver.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearProgram {
    variables: Vec<VariableSpec>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
    sense: Sense,
}

impl LinearProgram {
    /// Empty program with the given sense.
    #[must_use]
    pub const fn new(sense: Sense) -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: LinearExpr::new(),
            sense,
        }
    }

    /// Declare a variable.
    pub fn add_variable(&mut self, spec: VariableSpec) -> VariableId {
        let id = VariableId(self.variables.len());
        self.variables.push(spec);
        id
    }

    /// Register a constraint.
    pub fn add_constraint(
        &mut self,
        kind: ConstraintKind,
        expr: LinearExpr,
        relation: Relation,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            kind,
            expr,
            relation,
            rhs,
        });
    }

    /// Replace the objective expression.
    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Declared variables, indexed by [`VariableId::index`].
    #[must_use]
    pub fn variables(&self) -> &[VariableSpec] {
        &self.variables
    }

    /// Registered constraints in build order.
    #[must_use]
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Objective expression.
    #[must_use]
    pub const fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Optimisation direction.
    #[must_use]
    pub const fn sense(&self) -> Sense {
        self.sense
    }

    /// Constraints violated by `values` beyond `tolerance`.
    pub fn violations<'a>(
        &'a self,
        values: &'a [f64],
        tolerance: f64,
    ) -> impl Iterator<Item = &'a LinearConstraint> + 'a {
        self.constraints
            .iter()
            .filter(move |constraint| !constraint.is_satisfied(values, tolerance))
    }

    /// Integer variables whose value is further than `tolerance` from an
    /// integer or outside their bounds.
    #[expect(clippy::float_arithmetic, reason = "integrality gap is a difference")]
    pub fn bound_violations<'a>(
        &'a self,
        values: &'a [f64],
        tolerance: f64,
    ) -> impl Iterator<Item = &'a VariableSpec> + 'a {
        self.variables
            .iter()
            .zip(values)
            .filter(move |(spec, value)| {
                let out_of_bounds =
                    **value < spec.lower - tolerance || **value > spec.upper + tolerance;
                let fractional = spec.integer && (**value - value.round()).abs() > tolerance;
                out_of_bounds || fractional
            })
            .map(|(spec, _)| spec)
    }
}
