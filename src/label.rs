//! Run metadata encoded in result file names.
//!
//! Result files are named `machine-cpu-implementation-test[-options...].csv`.
//! Underscores inside the implementation, test and option segments stand in
//! for spaces.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::{PlotError, Result};

const REQUIRED_SEGMENTS: usize = 4;

/// Metadata parsed from a result file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunLabel {
    /// Host the benchmark ran on, verbatim.
    pub machine: String,
    /// CPU identifier, verbatim.
    pub cpu: String,
    /// Implementation under test, underscores shown as spaces.
    pub implementation: String,
    /// Test name, underscores shown as spaces.
    pub test: String,
    /// Remaining segments joined with spaces; empty when absent.
    pub options: String,
}

impl RunLabel {
    /// Parses the base name of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let base = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(&base)
    }

    /// Parses a base file name with or without the `.csv` suffix.
    pub fn parse(file_name: &str) -> Result<Self> {
        let stem = file_name.strip_suffix(".csv").unwrap_or(file_name);
        let parts: Vec<&str> = stem.split('-').collect();
        if parts.len() < REQUIRED_SEGMENTS {
            return Err(PlotError::FilenameConvention {
                file: file_name.to_string(),
                segments: parts.len(),
            });
        }
        Ok(Self {
            machine: parts[0].to_string(),
            cpu: parts[1].to_string(),
            implementation: spaced(parts[2]),
            test: spaced(parts[3]),
            options: spaced(&parts[REQUIRED_SEGMENTS..].join(" ")),
        })
    }
}

impl fmt::Display for RunLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = format!(
            "{} {} {} {} {}",
            self.machine, self.cpu, self.implementation, self.test, self.options
        );
        f.write_str(joined.trim())
    }
}

fn spaced(segment: &str) -> String {
    segment.replace('_', " ")
}
