//! Command-line interface for the Roadie itinerary planner.
//!
//! `roadie solve` loads the CSV tables, plans an itinerary and prints it as
//! JSON. `roadie generate` writes a seeded sample data set. Options layer
//! from CLI flags, environment variables (`ROADIE_CMDS_<COMMAND>_<FIELD>`)
//! and configuration files through `ortho_config`.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod generate;
mod solve;

pub use error::CliError;

use generate::GenerateArgs;
use solve::SolveArgs;

const ARG_DATA_DIR: &str = "data-dir";
const ARG_CITIES: &str = "cities";
const ARG_PROFITS: &str = "profits";
const ARG_COSTS: &str = "costs";
const ARG_HOME_CITY: &str = "home-city";
const ARG_HORIZON_DAYS: &str = "horizon-days";
const ARG_START_DATE: &str = "start-date";
const ARG_TOLERANCE: &str = "tolerance";
const ARG_TIME_BUDGET: &str = "time-budget-secs";
const ARG_ACCEPTANCE_THRESHOLD: &str = "acceptance-threshold";
const ARG_ATTENDANCE: &str = "attendance";
const ARG_MAX_EVENTS: &str = "max-events-per-country";
const ARG_RETRY_FACTOR: &str = "timeout-retry-factor";
const ARG_OUTPUT_DIR: &str = "output-dir";
const ARG_SEED: &str = "seed";
const ARG_EVENT_PROBABILITY: &str = "event-probability";
const ARG_ROUTE_PROBABILITY: &str = "route-probability";
const ENV_OUTPUT_DIR: &str = "ROADIE_CMDS_GENERATE_OUTPUT_DIR";

/// Horizon used when none is configured: the month of the sample data.
const DEFAULT_HORIZON_DAYS: u16 = 31;
/// First day of the horizon when none is configured.
const DEFAULT_START_DATE: &str = "01-01-2024";

/// Run the Roadie CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when parsing, configuration, I/O or planning fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Solve(args) => solve::run_solve(args),
        Command::Generate(args) => generate::run_generate(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "roadie",
    about = "Plan profitable multi-city touring itineraries",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan an itinerary from CSV tables and print it as JSON.
    Solve(SolveArgs),
    /// Write a seeded sample data set as CSV tables.
    Generate(GenerateArgs),
}

#[cfg(test)]
mod tests;
