//! Event revenue per city and day.

use std::collections::HashMap;

use crate::{CityCatalog, CityId, DataError, Day};

/// One row of the profit source after its date has been mapped to a [`Day`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitRecord {
    /// City hosting the event.
    pub city: String,
    /// Country named by the source row.
    pub country: String,
    /// Day of the event within the horizon.
    pub day: Day,
    /// Revenue available if the agent is present.
    pub profit: f64,
}

/// Revenue available for each `(city, day)`; zero where no event exists.
///
/// # Examples
/// ```
/// use roadie_core::{CityCatalog, Day, ProfitTable};
///
/// let catalog = CityCatalog::new([("Home", "Here"), ("Away", "There")])?;
/// let away = catalog.resolve("Away")?;
/// let mut profits = ProfitTable::new(&catalog, 3);
/// profits.insert(away, Day::new(1), 500.0)?;
///
/// assert_eq!(profits.lookup(away, Day::new(1)), 500.0);
/// assert_eq!(profits.lookup(away, Day::new(2)), 0.0);
/// # Ok::<(), roadie_core::DataError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProfitTable {
    catalog: CityCatalog,
    horizon_days: u16,
    entries: HashMap<(CityId, Day), f64>,
}

impl ProfitTable {
    /// Create an empty table for `catalog` over `horizon_days` days.
    #[must_use]
    pub fn new(catalog: &CityCatalog, horizon_days: u16) -> Self {
        Self {
            catalog: catalog.clone(),
            horizon_days,
            entries: HashMap::new(),
        }
    }

    /// Build a table from source records, resolving city names.
    ///
    /// # Errors
    /// Fails with [`DataError::UnknownCity`] or [`DataError::CountryMismatch`]
    /// when a record disagrees with the catalogue, and with any error from
    /// [`ProfitTable::insert`].
    pub fn from_records<I>(
        catalog: &CityCatalog,
        horizon_days: u16,
        records: I,
    ) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = ProfitRecord>,
    {
        let mut table = Self::new(catalog, horizon_days);
        for record in records {
            table.insert_record(record)?;
        }
        Ok(table)
    }

    /// Add a single source record.
    ///
    /// # Errors
    /// See [`ProfitTable::from_records`].
    pub fn insert_record(&mut self, record: ProfitRecord) -> Result<(), DataError> {
        let city = self.catalog.resolve(&record.city)?;
        let expected = self.catalog.country(city).unwrap_or_default();
        if expected != record.country {
            return Err(DataError::CountryMismatch {
                city: record.city,
                expected: expected.to_owned(),
                found: record.country,
            });
        }
        self.insert(city, record.day, record.profit)
    }

    /// Record the revenue for `city` on `day`.
    ///
    /// # Errors
    /// Returns [`DataError::UnknownCity`] for a foreign city handle,
    /// [`DataError::DayOutOfRange`] for days past the horizon,
    /// [`DataError::InvalidProfit`] for negative or non-finite values and
    /// [`DataError::DuplicateProfit`] when the slot is already filled.
    pub fn insert(&mut self, city: CityId, day: Day, profit: f64) -> Result<(), DataError> {
        if !self.catalog.contains(city) {
            return Err(DataError::UnknownCity {
                city: city.to_string(),
            });
        }
        if day.value() >= self.horizon_days {
            return Err(DataError::DayOutOfRange {
                day: day.value(),
                horizon_days: self.horizon_days,
            });
        }
        if !profit.is_finite() || profit < 0.0 {
            return Err(DataError::InvalidProfit {
                city: self.catalog.label(city),
                day,
                value: profit,
            });
        }
        if self.entries.contains_key(&(city, day)) {
            return Err(DataError::DuplicateProfit {
                city: self.catalog.label(city),
                day,
            });
        }
        self.entries.insert((city, day), profit);
        Ok(())
    }

    /// Revenue for `city` on `day`; `0.0` when no event exists.
    #[must_use]
    pub fn lookup(&self, city: CityId, day: Day) -> f64 {
        self.entries.get(&(city, day)).copied().unwrap_or(0.0)
    }

    /// Whether an event with positive revenue exists for `city` on `day`.
    #[must_use]
    pub fn has_event(&self, city: CityId, day: Day) -> bool {
        self.lookup(city, day) > 0.0
    }

    /// Catalogue the table was built for.
    #[must_use]
    pub const fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }

    /// Number of days covered.
    #[must_use]
    pub const fn horizon_days(&self) -> u16 {
        self.horizon_days
    }

    /// Number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no explicit entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
