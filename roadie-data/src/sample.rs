//! Seeded sample data for demos and benchmarks.
//!
//! The generator draws an event for each `(city, date)` slot with
//! probability [`SampleConfig::event_probability`]. Each event is worth a
//! base of `100 × U{5..=15}`, plus a bonus of `100 × U{5..=20}` with
//! probability [`SampleConfig::bonus_probability`]. Each unordered city
//! pair gets a route with probability [`SampleConfig::route_probability`]
//! and a cost drawn uniformly from [`SampleConfig::cost_range`].
//!
//! The same seed always yields the same data.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use log::info;
use rand::{Rng, SeedableRng};
use rand::distributions::{Bernoulli, Distribution};
use rand_chacha::ChaCha8Rng;
use roadie_core::{CityCatalog, DataError, ProfitRecord, ProfitTable, TransportCostTable};
use thiserror::Error;

use crate::{Calendar, InputTables};

/// The default eleven-city European tour.
pub const SAMPLE_CITIES: [(&str, &str); 11] = [
    ("London", "United Kingdom"),
    ("Manchester", "United Kingdom"),
    ("Birmingham", "United Kingdom"),
    ("Copenhagen", "Denmark"),
    ("Berlin", "Germany"),
    ("Munich", "Germany"),
    ("Prague", "Czech Republic"),
    ("Warsaw", "Poland"),
    ("Wroclaw", "Poland"),
    ("Budapest", "Hungary"),
    ("Bucharest", "Romania"),
];

const BASE_UNITS: RangeInclusive<u32> = 5..=15;
const BONUS_UNITS: RangeInclusive<u32> = 5..=20;
const PROFIT_UNIT: u32 = 100;

/// Generator settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    /// RNG seed.
    pub seed: u64,
    /// First date and length of the horizon.
    pub calendar: Calendar,
    /// Chance that a `(city, date)` slot hosts an event.
    pub event_probability: f64,
    /// Chance that an event earns the bonus.
    pub bonus_probability: f64,
    /// Chance that a city pair is connected.
    pub route_probability: f64,
    /// Bounds for route costs.
    pub cost_range: RangeInclusive<u32>,
}

impl SampleConfig {
    /// Defaults over `calendar` with the given seed.
    #[must_use]
    pub const fn new(seed: u64, calendar: Calendar) -> Self {
        Self {
            seed,
            calendar,
            event_probability: 0.5,
            bonus_probability: 0.2,
            route_probability: 0.7,
            cost_range: 50..=400,
        }
    }
}

/// Invalid generator settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// A probability fell outside `[0, 1]`.
    #[error("{name} must lie in [0, 1] (got {value})")]
    Probability {
        /// Setting name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The cost range was empty.
    #[error("cost range {start}..={end} is empty")]
    EmptyCostRange {
        /// Lower bound.
        start: u32,
        /// Upper bound.
        end: u32,
    },
}

/// One generated event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleEvent {
    /// Event date.
    pub date: NaiveDate,
    /// Host city.
    pub city: String,
    /// Host country.
    pub country: String,
    /// Revenue.
    pub profit: u32,
}

/// One generated route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRoute {
    /// First city of the pair.
    pub from: String,
    /// Second city of the pair.
    pub to: String,
    /// Cost in both directions.
    pub cost: u32,
}

/// Generated tables in their CSV shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleData {
    /// `(city, country)` in catalogue order.
    pub cities: Vec<(String, String)>,
    /// Events ordered by city then date.
    pub events: Vec<SampleEvent>,
    /// Routes ordered by catalogue position of `(from, to)`.
    pub routes: Vec<SampleRoute>,
    /// Calendar the events were drawn over.
    pub calendar: Calendar,
}

impl SampleData {
    /// Validate the data into planner-ready tables.
    ///
    /// # Errors
    /// Propagates [`DataError`]s from the core tables; generated data never
    /// triggers them.
    pub fn to_tables(&self) -> Result<InputTables, DataError> {
        let catalog = CityCatalog::new(self.cities.iter().cloned())?;
        let mut profits = ProfitTable::new(&catalog, self.calendar.horizon_days());
        for event in &self.events {
            let Some(day) = self.calendar.day_of(event.date) else {
                continue;
            };
            profits.insert_record(ProfitRecord {
                city: event.city.clone(),
                country: event.country.clone(),
                day,
                profit: f64::from(event.profit),
            })?;
        }
        let mut costs = TransportCostTable::new(&catalog);
        for route in &self.routes {
            let from = catalog.resolve(&route.from)?;
            let to = catalog.resolve(&route.to)?;
            costs.insert(from, to, f64::from(route.cost))?;
        }
        Ok(InputTables {
            catalog,
            profits,
            costs,
        })
    }
}

/// Generate sample data for [`SAMPLE_CITIES`].
///
/// # Errors
/// Returns [`SampleError`] for out-of-range probabilities or an empty cost
/// range.
///
/// # Examples
/// ```
/// use roadie_data::sample::{SampleConfig, generate};
/// use roadie_data::{Calendar, parse_date};
///
/// let calendar = Calendar::new(parse_date("01-01-2024")?, 31);
/// let first = generate(&SampleConfig::new(7, calendar))?;
/// let second = generate(&SampleConfig::new(7, calendar))?;
/// assert_eq!(first, second);
/// assert_eq!(first.cities.len(), 11);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate(config: &SampleConfig) -> Result<SampleData, SampleError> {
    generate_for(config, &SAMPLE_CITIES)
}

/// Generate sample data for an arbitrary `(city, country)` list.
///
/// # Errors
/// See [`generate`].
pub fn generate_for(
    config: &SampleConfig,
    cities: &[(&str, &str)],
) -> Result<SampleData, SampleError> {
    let event = bernoulli("event_probability", config.event_probability)?;
    let bonus = bernoulli("bonus_probability", config.bonus_probability)?;
    let route = bernoulli("route_probability", config.route_probability)?;
    if config.cost_range.is_empty() {
        return Err(SampleError::EmptyCostRange {
            start: *config.cost_range.start(),
            end: *config.cost_range.end(),
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut events = Vec::new();
    for &(city, country) in cities {
        for date in config.calendar.dates() {
            if !event.sample(&mut rng) {
                continue;
            }
            let base = rng.gen_range(BASE_UNITS);
            let extra = rng.gen_range(BONUS_UNITS);
            let units = if bonus.sample(&mut rng) {
                base.saturating_add(extra)
            } else {
                base
            };
            events.push(SampleEvent {
                date,
                city: city.to_owned(),
                country: country.to_owned(),
                profit: units.saturating_mul(PROFIT_UNIT),
            });
        }
    }

    let mut routes = Vec::new();
    for (index, &(from, _)) in cities.iter().enumerate() {
        for &(to, _) in cities.iter().skip(index + 1) {
            if route.sample(&mut rng) {
                routes.push(SampleRoute {
                    from: from.to_owned(),
                    to: to.to_owned(),
                    cost: rng.gen_range(config.cost_range.clone()),
                });
            }
        }
    }

    info!(
        "generated {} events and {} routes for {} cities (seed {})",
        events.len(),
        routes.len(),
        cities.len(),
        config.seed
    );
    Ok(SampleData {
        cities: cities
            .iter()
            .map(|&(city, country)| (city.to_owned(), country.to_owned()))
            .collect(),
        events,
        routes,
        calendar: config.calendar,
    })
}

fn bernoulli(name: &'static str, value: f64) -> Result<Bernoulli, SampleError> {
    Bernoulli::new(value).map_err(|_| SampleError::Probability { name, value })
}
