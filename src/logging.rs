//! Logging setup for the binaries.
//!
//! Events go to stderr so stdout carries only the statistics report.

use std::io::{self, IsTerminal};

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{PlotError, Result};

const DEFAULT_FILTER: &str = "warn";

/// Parses `--log-level` into a filter. A blank value means `warn`.
pub fn log_filter(level: &str) -> Result<EnvFilter> {
    let level = level.trim();
    let directive = if level.is_empty() {
        DEFAULT_FILTER
    } else {
        level
    };
    EnvFilter::try_new(directive)
        .map_err(|e| PlotError::InvalidArgument(format!("invalid log filter {directive:?}: {e}")))
}

/// Installs a compact, untimestamped stderr subscriber filtered by `level`
/// (an `EnvFilter` directive such as `info` or `benchplot=debug`). Colors are
/// used only when stderr is a terminal.
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(log_filter(level)?)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .without_time()
        .compact()
        .try_init()
        .map_err(|e| PlotError::InvalidArgument(format!("logging already initialized: {e}")))
}
