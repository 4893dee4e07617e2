//! Tabular inputs for the Roadie itinerary planner.
//!
//! Responsibilities:
//! - Read the city catalogue, event profits and the transport cost matrix
//!   from CSV files.
//! - Map calendar dates onto horizon day indices.
//! - Generate seeded sample data and write it back out as CSV.
//!
//! Boundaries:
//! - Validation of the tables themselves lives in `roadie-core`; this crate
//!   only adds file, line and parsing context.
//! - File access goes through `roadie-fs`.

#![forbid(unsafe_code)]

mod calendar;
mod error;
mod load;
pub mod sample;
mod write;

pub use calendar::{Calendar, DATE_FORMAT, format_date, parse_date};
pub use error::{LoadError, WriteError};
pub use load::{
    InputTables, TablePaths, load_cities, load_costs, load_profits, load_tables, read_cities,
    read_costs, read_profits,
};
pub use write::{
    CITIES_FILE, COSTS_FILE, PROFITS_FILE, write_cities, write_costs, write_profits,
    write_sample,
};
