//! Cities and their country grouping.
//!
//! The catalogue is the single owner of city identity. Every other table and
//! the itinerary model refer to cities through [`CityId`] handles issued here.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::DataError;

/// Dense handle for a city registered in a [`CityCatalog`].
///
/// Identifiers are only meaningful for the catalogue that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CityId(usize);

impl CityId {
    /// Position of the city within its catalogue.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A city together with the country it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct City {
    /// Unique city name.
    pub name: String,
    /// Country the city belongs to.
    pub country: String,
}

/// Registry of the cities an itinerary may visit.
///
/// # Examples
/// ```
/// use roadie_core::CityCatalog;
///
/// let catalog = CityCatalog::new([("London", "United Kingdom"), ("Berlin", "Germany")])?;
/// let berlin = catalog.resolve("Berlin")?;
/// assert_eq!(catalog.name(berlin), Some("Berlin"));
/// assert_eq!(catalog.country(berlin), Some("Germany"));
/// # Ok::<(), roadie_core::DataError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityCatalog {
    cities: Vec<City>,
    by_name: HashMap<String, CityId>,
}

impl CityCatalog {
    /// Build a catalogue from `(city, country)` pairs, preserving order.
    ///
    /// # Errors
    /// Returns [`DataError::EmptyCatalog`] when no cities are supplied and
    /// [`DataError::DuplicateCity`] when a name appears twice.
    pub fn new<I, N, C>(cities: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let mut catalog = Self {
            cities: Vec::new(),
            by_name: HashMap::new(),
        };
        for (name, country) in cities {
            catalog.push(name.into(), country.into())?;
        }
        if catalog.cities.is_empty() {
            return Err(DataError::EmptyCatalog);
        }
        Ok(catalog)
    }

    fn push(&mut self, name: String, country: String) -> Result<(), DataError> {
        if self.by_name.contains_key(&name) {
            return Err(DataError::DuplicateCity { city: name });
        }
        let id = CityId(self.cities.len());
        self.by_name.insert(name.clone(), id);
        self.cities.push(City { name, country });
        Ok(())
    }

    /// Look up a city by name.
    ///
    /// # Errors
    /// Returns [`DataError::UnknownCity`] when the name is not registered.
    pub fn resolve(&self, name: &str) -> Result<CityId, DataError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| DataError::UnknownCity {
                city: name.to_owned(),
            })
    }

    /// Return the city behind `id`, if it belongs to this catalogue.
    #[must_use]
    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.get(id.0)
    }

    /// Return the name of `id`.
    #[must_use]
    pub fn name(&self, id: CityId) -> Option<&str> {
        self.city(id).map(|city| city.name.as_str())
    }

    /// Return the country of `id`.
    #[must_use]
    pub fn country(&self, id: CityId) -> Option<&str> {
        self.city(id).map(|city| city.country.as_str())
    }

    /// Name of `id`, or its numeric handle when it is foreign to this
    /// catalogue. Used when formatting diagnostics.
    #[must_use]
    pub fn label(&self, id: CityId) -> String {
        self.name(id).map_or_else(|| id.to_string(), str::to_owned)
    }

    /// Whether `id` was issued by a catalogue of this size.
    #[must_use]
    pub const fn contains(&self, id: CityId) -> bool {
        id.0 < self.cities.len()
    }

    /// Iterate over all city handles in catalogue order.
    pub fn ids(&self) -> impl Iterator<Item = CityId> + use<> {
        (0..self.cities.len()).map(CityId)
    }

    /// Iterate over `(id, city)` pairs in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = (CityId, &City)> {
        self.cities
            .iter()
            .enumerate()
            .map(|(index, city)| (CityId(index), city))
    }

    /// Distinct country names in lexical order.
    #[must_use]
    pub fn countries(&self) -> Vec<&str> {
        self.cities
            .iter()
            .map(|city| city.country.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Cities that belong to `country`, in catalogue order.
    #[must_use]
    pub fn cities_in(&self, country: &str) -> Vec<CityId> {
        self.iter()
            .filter(|(_, city)| city.country == country)
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of registered cities.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`: construction rejects empty catalogues.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> CityCatalog {
        CityCatalog::new([
            ("London", "United Kingdom"),
            ("Berlin", "Germany"),
            ("Munich", "Germany"),
        ])
        .expect("valid catalogue")
    }

    #[rstest]
    fn resolves_names_in_insertion_order(catalog: CityCatalog) {
        let ids: Vec<_> = ["London", "Berlin", "Munich"]
            .into_iter()
            .map(|name| catalog.resolve(name).expect("known city"))
            .collect();
        assert_eq!(ids, catalog.ids().collect::<Vec<_>>());
    }

    #[rstest]
    fn unknown_city_is_a_data_error(catalog: CityCatalog) {
        let err = catalog.resolve("Paris").expect_err("Paris is not registered");
        assert_eq!(
            err,
            DataError::UnknownCity {
                city: "Paris".into()
            }
        );
    }

    #[rstest]
    fn groups_cities_by_country(catalog: CityCatalog) {
        assert_eq!(catalog.countries(), vec!["Germany", "United Kingdom"]);
        let german = catalog.cities_in("Germany");
        assert_eq!(german.len(), 2);
        assert!(german.iter().all(|id| catalog.country(*id) == Some("Germany")));
    }

    #[rstest]
    fn rejects_duplicate_names() {
        let err = CityCatalog::new([("Berlin", "Germany"), ("Berlin", "Germany")])
            .expect_err("duplicate should fail");
        assert!(matches!(err, DataError::DuplicateCity { city } if city == "Berlin"));
    }

    #[rstest]
    fn rejects_empty_catalogue() {
        let err = CityCatalog::new(Vec::<(String, String)>::new()).expect_err("empty catalogue");
        assert_eq!(err, DataError::EmptyCatalog);
    }
}
