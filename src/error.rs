//! Crate error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors raised while loading, summarizing or rendering benchmark results.
#[derive(Debug, Error)]
pub enum PlotError {
    /// A file could not be opened, read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File the operation targeted.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// Malformed CSV or a value that does not fit its column type.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        source: csv::Error,
    },
    /// A headerless row did not carry the fixed column count.
    #[error("{path}: line {line} has {found} field(s), expected {expected}")]
    Schema {
        /// File being parsed.
        path: PathBuf,
        /// 1-based line number of the row.
        line: u64,
        /// Columns required by the schema.
        expected: usize,
        /// Columns present in the row.
        found: usize,
    },
    /// A file name does not follow `machine-cpu-implementation-test[-options]`.
    #[error(
        "file name {file:?} does not follow machine-cpu-implementation-test[-options] \
         ({segments} segment(s) found)"
    )]
    FilenameConvention {
        /// Base name that failed to parse.
        file: String,
        /// Number of dash-separated segments present.
        segments: usize,
    },
    /// Invalid or unreadable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Drawing backend failure.
    #[error("render error: {0}")]
    Render(String),
    /// Invalid caller-supplied argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// CSV serialization failure outside of a named file.
    #[error(transparent)]
    CsvWrite(#[from] csv::Error),
    /// JSON report serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PlotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PlotError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        PlotError::Csv {
            path: path.into(),
            source,
        }
    }
}
