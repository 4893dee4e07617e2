//! Errors raised while reading or writing Roadie CSV tables.

use std::io;

use camino::Utf8PathBuf;
use roadie_core::DataError;
use thiserror::Error;

/// Failure to read one of the input tables.
///
/// Every variant names the file; row-level problems also carry the 1-based
/// CSV line.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        /// File that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The CSV reader failed (I/O, encoding or ragged rows).
    #[error("failed to read {path}: {source}")]
    Csv {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
    /// A required column was absent from the header row.
    #[error("{path} has no `{column}` column")]
    MissingColumn {
        /// File being read.
        path: Utf8PathBuf,
        /// Expected header name.
        column: &'static str,
    },
    /// A row or the assembled table broke a data rule.
    #[error("{path}{}: {source}", .line.map(|line| format!(":{line}")).unwrap_or_default())]
    Table {
        /// File being read.
        path: Utf8PathBuf,
        /// CSV line of the row, when the problem is tied to one.
        line: Option<u64>,
        /// The rule that was broken.
        #[source]
        source: DataError,
    },
}

impl LoadError {
    /// The semantic data error behind this failure, if any.
    #[must_use]
    pub const fn data_error(&self) -> Option<&DataError> {
        match self {
            Self::Table { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure to write a CSV table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteError {
    /// The output file or its directory could not be created.
    #[error("failed to create {path}: {source}")]
    Create {
        /// Target file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Serialising a row failed.
    #[error("failed to write {path}: {source}")]
    Csv {
        /// Target file.
        path: Utf8PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
    /// Flushing the file failed.
    #[error("failed to flush {path}: {source}")]
    Flush {
        /// Target file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
