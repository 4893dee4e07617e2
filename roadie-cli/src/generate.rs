//! Generate command implementation for the Roadie CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use roadie_data::Calendar;
use roadie_data::sample::{SampleConfig, generate};
use serde::{Deserialize, Serialize};

use crate::solve::parse_start_date;
use crate::{
    ARG_EVENT_PROBABILITY, ARG_HORIZON_DAYS, ARG_OUTPUT_DIR, ARG_ROUTE_PROBABILITY, ARG_SEED,
    ARG_START_DATE, CliError, DEFAULT_HORIZON_DAYS, ENV_OUTPUT_DIR,
};

/// CLI arguments for the `generate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "generate",
    long_about = "Write cities.csv, sample_data.csv and \
                 transportation_costs.csv for the built-in eleven-city \
                 tour. The same seed always produces the same files.",
    about = "Write a seeded sample data set"
)]
#[ortho_config(prefix = "ROADIE")]
pub(crate) struct GenerateArgs {
    /// Directory that receives the CSV files.
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Random seed.
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Date of the first generated day, formatted DD-MM-YYYY.
    #[arg(long = ARG_START_DATE, value_name = "date")]
    #[serde(default)]
    pub(crate) start_date: Option<String>,
    /// Number of days to generate events for.
    #[arg(long = ARG_HORIZON_DAYS, value_name = "days")]
    #[serde(default)]
    pub(crate) horizon_days: Option<u16>,
    /// Chance that a city hosts an event on a given day.
    #[arg(long = ARG_EVENT_PROBABILITY, value_name = "p")]
    #[serde(default)]
    pub(crate) event_probability: Option<f64>,
    /// Chance that two cities are connected.
    #[arg(long = ARG_ROUTE_PROBABILITY, value_name = "p")]
    #[serde(default)]
    pub(crate) route_probability: Option<f64>,
}

impl GenerateArgs {
    pub(crate) fn into_config(self) -> Result<GenerateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GenerateConfig::try_from(merged)
    }
}

/// Resolved `generate` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GenerateConfig {
    pub(crate) output_dir: Utf8PathBuf,
    pub(crate) sample: SampleConfig,
}

impl TryFrom<GenerateArgs> for GenerateConfig {
    type Error = CliError;

    fn try_from(args: GenerateArgs) -> Result<Self, Self::Error> {
        let output_dir = args.output_dir.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT_DIR,
            env: ENV_OUTPUT_DIR,
        })?;
        let calendar = Calendar::new(
            parse_start_date(args.start_date.as_deref())?,
            args.horizon_days.unwrap_or(DEFAULT_HORIZON_DAYS),
        );
        let mut sample = SampleConfig::new(args.seed.unwrap_or_default(), calendar);
        if let Some(probability) = args.event_probability {
            sample.event_probability = probability;
        }
        if let Some(probability) = args.route_probability {
            sample.route_probability = probability;
        }
        Ok(Self { output_dir, sample })
    }
}

/// Summary printed after the files are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct GenerateReport {
    pub(crate) cities: Utf8PathBuf,
    pub(crate) profits: Utf8PathBuf,
    pub(crate) costs: Utf8PathBuf,
    pub(crate) events: usize,
    pub(crate) routes: usize,
}

pub(super) fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_generate_with(args, &mut stdout)
}

pub(super) fn run_generate_with(
    args: GenerateArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_generate(&config)?;
    let payload = serde_json::to_string_pretty(&report).map_err(CliError::SerialiseOutput)?;
    writeln!(writer, "{payload}").map_err(CliError::WriteOutput)
}

pub(crate) fn execute_generate(config: &GenerateConfig) -> Result<GenerateReport, CliError> {
    let data = generate(&config.sample)?;
    let paths = roadie_data::write_sample(&config.output_dir, &data)?;
    Ok(GenerateReport {
        cities: paths.cities,
        profits: paths.profits,
        costs: paths.costs,
        events: data.events.len(),
        routes: data.routes.len(),
    })
}
