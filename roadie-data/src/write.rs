//! CSV writers producing files the loaders read back.

use std::collections::HashMap;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use csv::Writer;
use log::info;

use crate::sample::{SampleData, SampleEvent, SampleRoute};
use crate::{TablePaths, WriteError, format_date};

/// Default file name of the city catalogue.
pub const CITIES_FILE: &str = "cities.csv";
/// Default file name of the profit table.
pub const PROFITS_FILE: &str = "sample_data.csv";
/// Default file name of the cost matrix.
pub const COSTS_FILE: &str = "transportation_costs.csv";

/// Write `data` as the three default files inside `dir`.
///
/// # Errors
/// Returns the first [`WriteError`] raised.
pub fn write_sample(dir: &Utf8Path, data: &SampleData) -> Result<TablePaths, WriteError> {
    let paths = TablePaths {
        cities: dir.join(CITIES_FILE),
        profits: dir.join(PROFITS_FILE),
        costs: dir.join(COSTS_FILE),
    };
    write_cities(&paths.cities, &data.cities)?;
    write_profits(&paths.profits, &data.events)?;
    let names: Vec<&str> = data.cities.iter().map(|(city, _)| city.as_str()).collect();
    write_costs(&paths.costs, &names, &data.routes)?;
    info!("wrote sample tables to {dir}");
    Ok(paths)
}

/// Write a `city,country` catalogue.
///
/// # Errors
/// Fails when the file cannot be created or written.
pub fn write_cities(path: &Utf8Path, cities: &[(String, String)]) -> Result<(), WriteError> {
    let mut out = TableWriter::create(path)?;
    out.row(["city", "country"])?;
    for (city, country) in cities {
        out.row([city.as_str(), country.as_str()])?;
    }
    out.finish()
}

/// Write a `date,city,profit,country` table.
///
/// # Errors
/// Fails when the file cannot be created or written.
pub fn write_profits(path: &Utf8Path, events: &[SampleEvent]) -> Result<(), WriteError> {
    let mut out = TableWriter::create(path)?;
    out.row(["date", "city", "profit", "country"])?;
    for event in events {
        out.row([
            format_date(event.date).as_str(),
            event.city.as_str(),
            event.profit.to_string().as_str(),
            event.country.as_str(),
        ])?;
    }
    out.finish()
}

/// Write a full square cost matrix over `cities`.
///
/// Both triangles are filled; the diagonal is `0` and missing routes are
/// empty cells.
///
/// # Errors
/// Fails when the file cannot be created or written.
pub fn write_costs(
    path: &Utf8Path,
    cities: &[&str],
    routes: &[SampleRoute],
) -> Result<(), WriteError> {
    let mut lookup: HashMap<(&str, &str), u32> = HashMap::new();
    for route in routes {
        lookup.insert((route.from.as_str(), route.to.as_str()), route.cost);
        lookup.insert((route.to.as_str(), route.from.as_str()), route.cost);
    }
    let mut out = TableWriter::create(path)?;
    out.row(std::iter::once("").chain(cities.iter().copied()))?;
    for &row in cities {
        let cells: Vec<String> = cities
            .iter()
            .map(|&column| {
                if row == column {
                    "0".to_owned()
                } else {
                    lookup
                        .get(&(row, column))
                        .map(ToString::to_string)
                        .unwrap_or_default()
                }
            })
            .collect();
        out.row(std::iter::once(row).chain(cells.iter().map(String::as_str)))?;
    }
    out.finish()
}

struct TableWriter {
    path: Utf8PathBuf,
    inner: Writer<Box<dyn Write>>,
}

impl TableWriter {
    fn create(path: &Utf8Path) -> Result<Self, WriteError> {
        let file = roadie_fs::create_utf8_file(path).map_err(|source| WriteError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let sink: Box<dyn Write> = Box::new(file);
        Ok(Self {
            path: path.to_path_buf(),
            inner: Writer::from_writer(sink),
        })
    }

    fn row<'a>(&mut self, cells: impl IntoIterator<Item = &'a str>) -> Result<(), WriteError> {
        self.inner
            .write_record(cells)
            .map_err(|source| WriteError::Csv {
                path: self.path.clone(),
                source,
            })
    }

    fn finish(mut self) -> Result<(), WriteError> {
        self.inner.flush().map_err(|source| WriteError::Flush {
            path: self.path,
            source,
        })
    }
}
