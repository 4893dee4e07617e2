//! Symmetric transportation costs between cities.
//!
//! A missing pair is not free travel: it is the explicit [`Route::NoRoute`]
//! state, and the itinerary model allocates no transition variable for it.

use std::collections::HashMap;

use crate::{CityCatalog, CityId, DataError};

/// Whether two cities are connected by a direct transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    /// A direct transition exists at the given cost.
    Direct(f64),
    /// No direct transition exists; the move must never be selected.
    NoRoute,
}

impl Route {
    /// Cost of the route, if it exists.
    #[must_use]
    pub const fn cost(self) -> Option<f64> {
        match self {
            Self::Direct(cost) => Some(cost),
            Self::NoRoute => None,
        }
    }
}

/// A direct route between two distinct cities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectRoute {
    /// Departure city.
    pub from: CityId,
    /// Arrival city.
    pub to: CityId,
    /// Cost of taking the route once.
    pub cost: f64,
}

/// Symmetric `(city, city) -> cost` table.
///
/// # Examples
/// ```
/// use roadie_core::{CityCatalog, Route, TransportCostTable};
///
/// let catalog = CityCatalog::new([("Home", "Here"), ("Away", "There"), ("Far", "There")])?;
/// let [home, away, far] = ["Home", "Away", "Far"].map(|name| catalog.resolve(name).unwrap());
/// let mut costs = TransportCostTable::new(&catalog);
/// costs.insert(home, away, 100.0)?;
///
/// assert_eq!(costs.route(away, home), Route::Direct(100.0));
/// assert_eq!(costs.route(home, far), Route::NoRoute);
/// assert!(costs.lookup(home, far).is_err());
/// # Ok::<(), roadie_core::DataError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransportCostTable {
    catalog: CityCatalog,
    costs: HashMap<(CityId, CityId), f64>,
}

impl TransportCostTable {
    /// Create a table without any routes.
    #[must_use]
    pub fn new(catalog: &CityCatalog) -> Self {
        Self {
            catalog: catalog.clone(),
            costs: HashMap::new(),
        }
    }

    /// Record the cost of travelling between `from` and `to` in either
    /// direction. Re-inserting the same value is accepted.
    ///
    /// # Errors
    /// Returns [`DataError::UnknownCity`] for foreign handles,
    /// [`DataError::SelfRoute`] when both ends are the same city,
    /// [`DataError::InvalidCost`] for negative or non-finite values and
    /// [`DataError::AsymmetricCost`] when a different value is already
    /// recorded for the pair.
    pub fn insert(&mut self, from: CityId, to: CityId, cost: f64) -> Result<(), DataError> {
        for city in [from, to] {
            if !self.catalog.contains(city) {
                return Err(DataError::UnknownCity {
                    city: city.to_string(),
                });
            }
        }
        if from == to {
            return Err(DataError::SelfRoute {
                city: self.catalog.label(from),
            });
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(DataError::InvalidCost {
                from: self.catalog.label(from),
                to: self.catalog.label(to),
                value: cost,
            });
        }
        if let Some(existing) = self.costs.get(&(from, to)).copied()
            && existing.total_cmp(&cost).is_ne()
        {
            return Err(DataError::AsymmetricCost {
                from: self.catalog.label(from),
                to: self.catalog.label(to),
                existing,
                conflicting: cost,
            });
        }
        self.costs.insert((from, to), cost);
        self.costs.insert((to, from), cost);
        Ok(())
    }

    /// Route state between two cities. A city has no route to itself.
    #[must_use]
    pub fn route(&self, from: CityId, to: CityId) -> Route {
        self.costs
            .get(&(from, to))
            .copied()
            .map_or(Route::NoRoute, Route::Direct)
    }

    /// Cost of a direct route.
    ///
    /// # Errors
    /// Returns [`DataError::NoRoute`] when the pair has no direct route;
    /// an undefined pair is never treated as zero cost.
    pub fn lookup(&self, from: CityId, to: CityId) -> Result<f64, DataError> {
        self.route(from, to)
            .cost()
            .ok_or_else(|| DataError::NoRoute {
                from: self.catalog.label(from),
                to: self.catalog.label(to),
            })
    }

    /// All direct routes as ordered pairs, sorted by `(from, to)`.
    #[must_use]
    pub fn direct_routes(&self) -> Vec<DirectRoute> {
        let mut routes: Vec<_> = self
            .costs
            .iter()
            .map(|(&(from, to), &cost)| DirectRoute { from, to, cost })
            .collect();
        routes.sort_unstable_by_key(|route| (route.from, route.to));
        routes
    }

    /// Catalogue the table was built for.
    #[must_use]
    pub const fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }

    /// Number of unordered city pairs with a direct route.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.costs.keys().filter(|(from, to)| from < to).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> CityCatalog {
        CityCatalog::new([
            ("Warsaw", "Poland"),
            ("Wroclaw", "Poland"),
            ("Budapest", "Hungary"),
        ])
        .expect("valid catalogue")
    }

    fn ids(catalog: &CityCatalog) -> (CityId, CityId, CityId) {
        (
            catalog.resolve("Warsaw").expect("known city"),
            catalog.resolve("Wroclaw").expect("known city"),
            catalog.resolve("Budapest").expect("known city"),
        )
    }

    #[rstest]
    fn zero_cost_is_distinct_from_no_route(catalog: CityCatalog) {
        let (warsaw, wroclaw, budapest) = ids(&catalog);
        let mut costs = TransportCostTable::new(&catalog);
        costs.insert(warsaw, wroclaw, 0.0).expect("free route");
        assert_eq!(costs.route(wroclaw, warsaw), Route::Direct(0.0));
        assert_eq!(costs.route(warsaw, budapest), Route::NoRoute);
        let err = costs.lookup(budapest, warsaw).expect_err("no route");
        assert!(matches!(err, DataError::NoRoute { .. }));
    }

    #[rstest]
    fn routes_are_listed_in_both_directions(catalog: CityCatalog) {
        let (warsaw, _, budapest) = ids(&catalog);
        let mut costs = TransportCostTable::new(&catalog);
        costs.insert(budapest, warsaw, 250.0).expect("route");
        let routes = costs.direct_routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(costs.pair_count(), 1);
        assert!(
            routes
                .iter()
                .all(|route| route.cost == 250.0 && route.from != route.to)
        );
    }

    #[rstest]
    fn reinserting_the_same_value_is_accepted(catalog: CityCatalog) {
        let (warsaw, wroclaw, _) = ids(&catalog);
        let mut costs = TransportCostTable::new(&catalog);
        costs.insert(warsaw, wroclaw, 90.0).expect("route");
        costs.insert(wroclaw, warsaw, 90.0).expect("mirror cell");
        assert_eq!(costs.pair_count(), 1);
    }

    #[rstest]
    fn rejects_asymmetric_values(catalog: CityCatalog) {
        let (warsaw, wroclaw, _) = ids(&catalog);
        let mut costs = TransportCostTable::new(&catalog);
        costs.insert(warsaw, wroclaw, 90.0).expect("route");
        let err = costs
            .insert(wroclaw, warsaw, 95.0)
            .expect_err("asymmetric cost");
        assert!(matches!(err, DataError::AsymmetricCost { .. }));
    }

    #[rstest]
    fn rejects_self_routes(catalog: CityCatalog) {
        let (warsaw, _, _) = ids(&catalog);
        let mut costs = TransportCostTable::new(&catalog);
        let err = costs.insert(warsaw, warsaw, 0.0).expect_err("self route");
        assert!(matches!(err, DataError::SelfRoute { city } if city == "Warsaw"));
    }

    #[rstest]
    #[case(-5.0)]
    #[case(f64::NAN)]
    fn rejects_invalid_costs(catalog: CityCatalog, #[case] value: f64) {
        let (warsaw, wroclaw, _) = ids(&catalog);
        let mut costs = TransportCostTable::new(&catalog);
        let err = costs
            .insert(warsaw, wroclaw, value)
            .expect_err("invalid cost");
        assert!(matches!(err, DataError::InvalidCost { .. }));
    }
}
