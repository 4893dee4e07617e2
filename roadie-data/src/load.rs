//! CSV loaders for the city catalogue, profit table and cost matrix.
//!
//! Each table has a `read_*` function over any reader, labelled with the
//! path used in error messages, and a `load_*` wrapper that opens the file
//! through `roadie-fs`.

use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use roadie_core::{CityCatalog, DataError, ProfitRecord, ProfitTable, TransportCostTable};

use crate::{Calendar, LoadError, format_date, parse_date};

/// Locations of the three input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePaths {
    /// `city,country` catalogue.
    pub cities: Utf8PathBuf,
    /// `date,city,profit,country` events.
    pub profits: Utf8PathBuf,
    /// Square transport cost matrix.
    pub costs: Utf8PathBuf,
}

/// Validated tables ready for planning.
#[derive(Debug, Clone)]
pub struct InputTables {
    /// City catalogue.
    pub catalog: CityCatalog,
    /// Event revenue over the calendar's horizon.
    pub profits: ProfitTable,
    /// Transport costs.
    pub costs: TransportCostTable,
}

/// Load all three tables, resolving profits and costs against the catalogue.
///
/// # Errors
/// Returns the first [`LoadError`] encountered, in catalogue, profit, cost
/// order.
pub fn load_tables(paths: &TablePaths, calendar: &Calendar) -> Result<InputTables, LoadError> {
    let catalog = load_cities(&paths.cities)?;
    let profits = load_profits(&paths.profits, &catalog, calendar)?;
    let costs = load_costs(&paths.costs, &catalog)?;
    Ok(InputTables {
        catalog,
        profits,
        costs,
    })
}

/// Load the city catalogue from `path`.
///
/// # Errors
/// See [`read_cities`]; also fails when the file cannot be opened.
pub fn load_cities(path: &Utf8Path) -> Result<CityCatalog, LoadError> {
    read_cities(open(path)?, path)
}

/// Load the profit table from `path`.
///
/// # Errors
/// See [`read_profits`]; also fails when the file cannot be opened.
pub fn load_profits(
    path: &Utf8Path,
    catalog: &CityCatalog,
    calendar: &Calendar,
) -> Result<ProfitTable, LoadError> {
    read_profits(open(path)?, path, catalog, calendar)
}

/// Load the cost matrix from `path`.
///
/// # Errors
/// See [`read_costs`]; also fails when the file cannot be opened.
pub fn load_costs(path: &Utf8Path, catalog: &CityCatalog) -> Result<TransportCostTable, LoadError> {
    read_costs(open(path)?, path, catalog)
}

fn open(path: &Utf8Path) -> Result<impl Read + use<>, LoadError> {
    roadie_fs::open_utf8_file(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a `city,country` catalogue.
///
/// # Errors
/// Fails on malformed CSV, a missing column, duplicate names or an empty
/// catalogue.
pub fn read_cities<R: Read>(reader: R, origin: &Utf8Path) -> Result<CityCatalog, LoadError> {
    let mut csv = TableReader::new(reader, origin)?;
    let city = csv.column("city")?;
    let country = csv.column("country")?;
    let mut rows = Vec::new();
    while let Some(record) = csv.next_record()? {
        rows.push((
            cell(&record, city).to_owned(),
            cell(&record, country).to_owned(),
        ));
    }
    let catalog = CityCatalog::new(rows).map_err(|source| csv.table_error(None, source))?;
    info!("loaded {} cities from {origin}", catalog.len());
    Ok(catalog)
}

/// Read a `date,city,profit,country` table, mapping dates through
/// `calendar`.
///
/// A leading unnamed index column is ignored; columns are located by name.
///
/// # Errors
/// Fails on malformed CSV and on any row-level [`DataError`], each carrying
/// its CSV line: unparsable dates ([`DataError::InvalidDate`]), dates before
/// the horizon start ([`DataError::DateBeforeStart`]), non-numeric profits
/// ([`DataError::NonNumericProfit`]) and whatever the profit table rejects
/// (unknown city, country mismatch, day out of range, duplicates).
pub fn read_profits<R: Read>(
    reader: R,
    origin: &Utf8Path,
    catalog: &CityCatalog,
    calendar: &Calendar,
) -> Result<ProfitTable, LoadError> {
    let mut csv = TableReader::new(reader, origin)?;
    let date = csv.column("date")?;
    let city = csv.column("city")?;
    let profit = csv.column("profit")?;
    let country = csv.column("country")?;
    let mut table = ProfitTable::new(catalog, calendar.horizon_days());
    while let Some(record) = csv.next_record()? {
        let line = line_of(&record);
        let raw_date = cell(&record, date);
        let parsed = parse_date(raw_date).map_err(|source| {
            csv.table_error(
                Some(line),
                DataError::InvalidDate {
                    value: raw_date.to_owned(),
                    reason: source.to_string(),
                },
            )
        })?;
        let day = calendar.day_of(parsed).ok_or_else(|| {
            csv.table_error(
                Some(line),
                DataError::DateBeforeStart {
                    date: format_date(parsed),
                    start: format_date(calendar.start()),
                },
            )
        })?;
        let raw_profit = cell(&record, profit);
        let value = raw_profit.parse::<f64>().map_err(|_| {
            csv.table_error(
                Some(line),
                DataError::NonNumericProfit {
                    city: cell(&record, city).to_owned(),
                    value: raw_profit.to_owned(),
                },
            )
        })?;
        table
            .insert_record(ProfitRecord {
                city: cell(&record, city).to_owned(),
                country: cell(&record, country).to_owned(),
                day,
                profit: value,
            })
            .map_err(|source| csv.table_error(Some(line), source))?;
    }
    info!(
        "loaded {} profit entries from {origin} over {} days",
        table.len(),
        calendar.horizon_days()
    );
    Ok(table)
}

/// Read a square cost matrix.
///
/// The first header cell is ignored and the rest name the columns; each row
/// starts with its city. Empty cells mean "no route". Diagonal cells must be
/// empty or zero. Both triangles may be filled as long as they agree.
///
/// # Errors
/// Fails on malformed CSV, unknown cities, non-numeric cells
/// ([`DataError::NonNumericCost`]) and any [`DataError`] raised by the cost
/// table (negative, self or asymmetric costs).
pub fn read_costs<R: Read>(
    reader: R,
    origin: &Utf8Path,
    catalog: &CityCatalog,
) -> Result<TransportCostTable, LoadError> {
    let mut csv = TableReader::new(reader, origin)?;
    let columns = csv
        .headers
        .iter()
        .skip(1)
        .map(|name| catalog.resolve(name))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| csv.table_error(Some(1), source))?;
    let mut table = TransportCostTable::new(catalog);
    while let Some(record) = csv.next_record()? {
        let line = line_of(&record);
        let row = catalog
            .resolve(cell(&record, 0))
            .map_err(|source| csv.table_error(Some(line), source))?;
        for (&column, raw) in columns.iter().zip(record.iter().skip(1)) {
            if raw.is_empty() {
                continue;
            }
            let value = raw.parse::<f64>().map_err(|_| {
                csv.table_error(
                    Some(line),
                    DataError::NonNumericCost {
                        from: catalog.label(row),
                        to: catalog.label(column),
                        value: raw.to_owned(),
                    },
                )
            })?;
            if row == column && value == 0.0 {
                continue;
            }
            table
                .insert(row, column, value)
                .map_err(|source| csv.table_error(Some(line), source))?;
        }
    }
    let pairs = table.pair_count();
    info!("loaded {pairs} routes from {origin}");
    if pairs == 0 && catalog.len() > 1 {
        debug!("{origin} defines no routes; every itinerary will stay at home");
    }
    Ok(table)
}

struct TableReader<'a, R> {
    origin: &'a Utf8Path,
    headers: StringRecord,
    records: csv::StringRecordsIntoIter<R>,
}

impl<'a, R: Read> TableReader<'a, R> {
    fn new(reader: R, origin: &'a Utf8Path) -> Result<Self, LoadError> {
        let mut inner = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let headers = inner
            .headers()
            .map_err(|source| LoadError::Csv {
                path: origin.to_path_buf(),
                source,
            })?
            .clone();
        Ok(Self {
            origin,
            headers,
            records: inner.into_records(),
        })
    }

    fn column(&self, name: &'static str) -> Result<usize, LoadError> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| LoadError::MissingColumn {
                path: self.origin.to_path_buf(),
                column: name,
            })
    }

    fn next_record(&mut self) -> Result<Option<StringRecord>, LoadError> {
        self.records
            .next()
            .transpose()
            .map_err(|source| LoadError::Csv {
                path: self.origin.to_path_buf(),
                source,
            })
    }

    fn table_error(&self, line: Option<u64>, source: DataError) -> LoadError {
        LoadError::Table {
            path: self.origin.to_path_buf(),
            line,
            source,
        }
    }
}

fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or_default()
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}
