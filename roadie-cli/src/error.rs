//! Error types emitted by the Roadie CLI.
//!
//! Large library errors are boxed so `Result<_, CliError>` stays small under
//! `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use roadie_core::PlanError;
use roadie_data::sample::SampleError;
use roadie_data::{LoadError, WriteError};
use thiserror::Error;

/// Errors emitted by the Roadie CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without dashes.
        field: &'static str,
        /// Environment variable that also sets it.
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Cargo feature name.
        feature: &'static str,
        /// What the user asked for.
        action: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the input.
        field: &'static str,
        /// Resolved path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the input.
        field: &'static str,
        /// Resolved path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the input.
        field: &'static str,
        /// Resolved path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The start date did not parse.
    #[error("invalid {field} {value:?} (expected DD-MM-YYYY): {source}")]
    InvalidDate {
        /// Flag naming the date.
        field: &'static str,
        /// Raw value.
        value: String,
        /// Underlying parse error.
        #[source]
        source: chrono::ParseError,
    },
    /// Reading the input tables failed.
    #[error(transparent)]
    Load(Box<LoadError>),
    /// The sample generator rejected its settings.
    #[error("invalid sample settings: {0}")]
    Sample(#[from] SampleError),
    /// Writing generated tables failed.
    #[error(transparent)]
    WriteTables(Box<WriteError>),
    /// Planning failed.
    #[error("planning failed: {0}")]
    Plan(Box<PlanError>),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<LoadError> for CliError {
    fn from(source: LoadError) -> Self {
        Self::Load(Box::new(source))
    }
}

impl From<WriteError> for CliError {
    fn from(source: WriteError) -> Self {
        Self::WriteTables(Box::new(source))
    }
}

impl From<PlanError> for CliError {
    fn from(source: PlanError) -> Self {
        Self::Plan(Box::new(source))
    }
}
