//! Solve command implementation for the Roadie CLI.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use roadie_core::{
    AttendanceMode, CityCatalog, DEFAULT_ACCEPTANCE_THRESHOLD, DEFAULT_TIME_BUDGET,
    DEFAULT_TOLERANCE, Itinerary, PlanConfig, Planner, SolverAdapter, TimeoutRetry,
};
use roadie_data::{CITIES_FILE, COSTS_FILE, Calendar, PROFITS_FILE, TablePaths, load_tables};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ACCEPTANCE_THRESHOLD, ARG_ATTENDANCE, ARG_CITIES, ARG_COSTS, ARG_DATA_DIR, ARG_HOME_CITY,
    ARG_HORIZON_DAYS, ARG_MAX_EVENTS, ARG_PROFITS, ARG_RETRY_FACTOR, ARG_START_DATE,
    ARG_TIME_BUDGET, ARG_TOLERANCE, CliError, DEFAULT_HORIZON_DAYS, DEFAULT_START_DATE,
};

/// How event revenue is earned, as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum AttendanceArg {
    /// Being in a city earns its event revenue.
    Presence,
    /// Attending is a separate choice that rules out travelling that day.
    Explicit,
}

impl From<AttendanceArg> for AttendanceMode {
    fn from(arg: AttendanceArg) -> Self {
        match arg {
            AttendanceArg::Presence => Self::Presence,
            AttendanceArg::Explicit => Self::Explicit,
        }
    }
}

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "solve",
    long_about = "Plan an itinerary from a city catalogue, an event profit \
                 table and a transport cost matrix. Inputs default to \
                 cities.csv, sample_data.csv and transportation_costs.csv \
                 inside the data directory.",
    about = "Plan an itinerary and print it as JSON"
)]
#[ortho_config(prefix = "ROADIE")]
pub(crate) struct SolveArgs {
    /// Directory containing the default table filenames.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Override the path to the city catalogue.
    #[arg(long = ARG_CITIES, value_name = "path")]
    #[serde(default)]
    pub(crate) cities: Option<Utf8PathBuf>,
    /// Override the path to the profit table.
    #[arg(long = ARG_PROFITS, value_name = "path")]
    #[serde(default)]
    pub(crate) profits: Option<Utf8PathBuf>,
    /// Override the path to the transport cost matrix.
    #[arg(long = ARG_COSTS, value_name = "path")]
    #[serde(default)]
    pub(crate) costs: Option<Utf8PathBuf>,
    /// City where the tour starts and ends (defaults to the first city).
    #[arg(long = ARG_HOME_CITY, value_name = "city")]
    #[serde(default)]
    pub(crate) home_city: Option<String>,
    /// Number of days to plan.
    #[arg(long = ARG_HORIZON_DAYS, value_name = "days")]
    #[serde(default)]
    pub(crate) horizon_days: Option<u16>,
    /// Date of day 0, formatted DD-MM-YYYY.
    #[arg(long = ARG_START_DATE, value_name = "date")]
    #[serde(default)]
    pub(crate) start_date: Option<String>,
    /// Integrality and feasibility tolerance.
    #[arg(long = ARG_TOLERANCE, value_name = "epsilon")]
    #[serde(default)]
    pub(crate) tolerance: Option<f64>,
    /// Wall-clock budget for the solver, in seconds.
    #[arg(long = ARG_TIME_BUDGET, value_name = "secs")]
    #[serde(default)]
    pub(crate) time_budget_secs: Option<u64>,
    /// Occupancy above which a city counts as visited.
    #[arg(long = ARG_ACCEPTANCE_THRESHOLD, value_name = "fraction")]
    #[serde(default)]
    pub(crate) acceptance_threshold: Option<f64>,
    /// How event revenue is earned.
    #[arg(long = ARG_ATTENDANCE, value_enum, value_name = "mode")]
    #[serde(default)]
    pub(crate) attendance: Option<AttendanceArg>,
    /// Maximum events attended per country.
    #[arg(long = ARG_MAX_EVENTS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_events_per_country: Option<u32>,
    /// Retry once after a timeout with the budget and tolerance scaled by
    /// this factor.
    #[arg(long = ARG_RETRY_FACTOR, value_name = "factor")]
    #[serde(default)]
    pub(crate) timeout_retry_factor: Option<f64>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolveConfig {
    /// Input table locations.
    pub(crate) tables: TablePaths,
    /// Horizon start and length.
    pub(crate) calendar: Calendar,
    /// Configured home city, if any.
    pub(crate) home_city: Option<String>,
    pub(crate) tolerance: f64,
    pub(crate) time_budget: Duration,
    pub(crate) acceptance_threshold: f64,
    pub(crate) attendance: AttendanceMode,
    pub(crate) max_events_per_country: Option<u32>,
    pub(crate) timeout_retry: Option<TimeoutRetry>,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.tables.cities, ARG_CITIES)?;
        Self::require_existing(&self.tables.profits, ARG_PROFITS)?;
        Self::require_existing(&self.tables.costs, ARG_COSTS)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match roadie_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Planner options for `catalog`; the home city falls back to the first
    /// catalogue entry.
    pub(crate) fn plan_config(&self, catalog: &CityCatalog) -> PlanConfig {
        let home_city = self.home_city.clone().unwrap_or_else(|| {
            let first = catalog
                .ids()
                .next()
                .and_then(|id| catalog.name(id))
                .unwrap_or_default()
                .to_owned();
            info!("no home city configured; starting from {first}");
            first
        });
        let mut config = PlanConfig::new(self.calendar.horizon_days(), home_city)
            .with_attendance(self.attendance)
            .with_max_events_per_country(self.max_events_per_country)
            .with_time_budget(self.time_budget)
            .with_timeout_retry(self.timeout_retry);
        config.tolerance = self.tolerance;
        config.acceptance_threshold = self.acceptance_threshold;
        config
    }
}

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let data_dir = args.data_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let table = |file: Option<Utf8PathBuf>, default: &str| {
            let name = file.unwrap_or_else(|| Utf8PathBuf::from(default));
            roadie_fs::resolve_in_dir(Some(data_dir.as_path()), &name)
        };
        let tables = TablePaths {
            cities: table(args.cities, CITIES_FILE),
            profits: table(args.profits, PROFITS_FILE),
            costs: table(args.costs, COSTS_FILE),
        };
        let calendar = Calendar::new(
            parse_start_date(args.start_date.as_deref())?,
            args.horizon_days.unwrap_or(DEFAULT_HORIZON_DAYS),
        );
        let timeout_retry = args.timeout_retry_factor.map(|factor| TimeoutRetry {
            budget_factor: factor,
            tolerance_factor: factor,
        });
        Ok(Self {
            tables,
            calendar,
            home_city: args.home_city,
            tolerance: args.tolerance.unwrap_or(DEFAULT_TOLERANCE),
            time_budget: args
                .time_budget_secs
                .map_or(DEFAULT_TIME_BUDGET, Duration::from_secs),
            acceptance_threshold: args
                .acceptance_threshold
                .unwrap_or(DEFAULT_ACCEPTANCE_THRESHOLD),
            attendance: args
                .attendance
                .map(AttendanceMode::from)
                .unwrap_or_default(),
            max_events_per_country: args.max_events_per_country,
            timeout_retry,
        })
    }
}

pub(crate) fn parse_start_date(raw: Option<&str>) -> Result<chrono::NaiveDate, CliError> {
    let value = raw.unwrap_or(DEFAULT_START_DATE);
    roadie_data::parse_date(value).map_err(|source| CliError::InvalidDate {
        field: ARG_START_DATE,
        value: value.to_owned(),
        source,
    })
}

/// Builds a solver adapter for the current solve invocation.
pub(super) trait SolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn SolverAdapter>, CliError>;
}

pub(super) struct DefaultSolverBuilder;

impl SolverBuilder for DefaultSolverBuilder {
    #[cfg(feature = "solver-milp")]
    fn build(&self, _config: &SolveConfig) -> Result<Box<dyn SolverAdapter>, CliError> {
        Ok(Box::new(roadie_solver_milp::MilpSolver::new()))
    }

    #[cfg(not(feature = "solver-milp"))]
    fn build(&self, _config: &SolveConfig) -> Result<Box<dyn SolverAdapter>, CliError> {
        Err(CliError::MissingFeature {
            feature: "solver-milp",
            action: "solving",
        })
    }
}

pub(super) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_solve_with(args, &DefaultSolverBuilder, &mut stdout)
}

pub(super) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let itinerary = execute_solve(args, builder)?;
    write_itinerary(writer, &itinerary)
}

fn execute_solve(args: SolveArgs, builder: &dyn SolverBuilder) -> Result<Itinerary, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let tables = load_tables(&config.tables, &config.calendar)?;
    let plan = config.plan_config(&tables.catalog);
    let solver = builder.build(&config)?;
    let itinerary = Planner::new(solver, plan).plan(
        &tables.catalog,
        &tables.profits,
        &tables.costs,
    )?;
    info!(
        "planned {} days with {} moves; objective {}",
        itinerary.len(),
        itinerary.transitions.len(),
        itinerary.objective
    );
    Ok(itinerary)
}

fn write_itinerary(writer: &mut dyn Write, itinerary: &Itinerary) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(itinerary).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
