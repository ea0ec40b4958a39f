//! Command-line plumbing shared by the `benchmark-plot`, `compare-plot` and
//! `depth-plot` binaries.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use tracing::{info, warn};

use crate::config::PlotConfig;
use crate::error::{PlotError, Result};
use crate::figure::{comparison_figure, per_category_figures, update_bucket_figure, Figure};
use crate::group::distinct;
use crate::loader::{load_headered, load_headerless, load_headerless_all, load_labeled};
use crate::render::write_figures;
use crate::stats::{describe, describe_table, Summary};

/// Options and positional files accepted by every binary.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Directory figures are written to (overrides the config file).
    #[arg(long, value_name = "DIR", env = "BENCHPLOT_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long, value_name = "FILE", env = "BENCHPLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `info` or `benchplot=debug`.
    #[arg(
        long,
        value_name = "FILTER",
        env = "BENCHPLOT_LOG",
        default_value = "warn"
    )]
    pub log_level: String,

    /// Format of the statistics report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Benchmark result files.
    #[arg(value_name = "CSV_FILE")]
    pub files: Vec<PathBuf>,
}

impl CommonArgs {
    /// Loads the configuration file and applies command-line overrides.
    pub fn resolve_config(&self) -> Result<PlotConfig> {
        let mut config = PlotConfig::load(self.config.as_deref())?;
        if let Some(out_dir) = &self.out_dir {
            config.out_dir = out_dir.clone();
        }
        Ok(config)
    }
}

/// Statistics report format.
#[derive(Clone, Copy, Debug, ValueEnum, Eq, PartialEq)]
#[value(rename_all = "kebab_case")]
pub enum OutputFormat {
    /// Human-readable tables.
    Text,
    /// A JSON array of summaries.
    Json,
}

/// Usage line printed when a binary gets no files.
pub fn usage(bin: &str) -> String {
    format!("Usage: {bin} <csv_file1> <csv_file2> ...")
}

/// Concatenates every file, reports statistics per category and writes one
/// figure per category.
pub fn run_per_category<W: Write>(
    files: &[PathBuf],
    config: &PlotConfig,
    format: OutputFormat,
    out: W,
) -> Result<Vec<PathBuf>> {
    let table = load_headerless_all(files)?;
    let summaries: Vec<Summary> = distinct(table.rows(), |row| row.name.as_str())
        .into_iter()
        .map(|category| describe(table.filter(|row| row.name == category), category))
        .collect();
    emit_summaries(&summaries, format, out)?;
    finish(per_category_figures(&table), config)
}

/// Labels each file from its name, reports statistics per file and writes a
/// single figure with one panel per `(options, category)` pair.
pub fn run_comparison<W: Write>(
    files: &[PathBuf],
    config: &PlotConfig,
    format: OutputFormat,
    out: W,
) -> Result<Vec<PathBuf>> {
    let runs = load_labeled(files, |path| load_headerless(path))?;
    let summaries: Vec<Summary> = runs
        .iter()
        .map(|run| describe(run.table.rows(), run.label.to_string()))
        .collect();
    emit_summaries(&summaries, format, out)?;
    finish(vec![comparison_figure(&runs, config.columns)], config)
}

/// Labels each headered file from its name, reports statistics per file and
/// writes a single figure with one panel per file and one line per update
/// bucket.
pub fn run_update_buckets<W: Write>(
    files: &[PathBuf],
    config: &PlotConfig,
    format: OutputFormat,
    out: W,
) -> Result<Vec<PathBuf>> {
    let runs = load_labeled(files, |path| load_headered(path))?;
    let summaries: Vec<Summary> = runs
        .iter()
        .map(|run| describe_table(&run.table, run.label.to_string()))
        .collect();
    emit_summaries(&summaries, format, out)?;
    let figure = update_bucket_figure(&runs, &config.update_buckets, config.columns);
    finish(vec![figure], config)
}

fn finish(figures: Vec<Figure>, config: &PlotConfig) -> Result<Vec<PathBuf>> {
    if figures.iter().all(|figure| figure.panels.is_empty()) {
        warn!("no data to plot");
    }
    let written = write_figures(&figures, &config.out_dir, &config.render)?;
    info!(
        count = written.len(),
        out_dir = %config.out_dir.display(),
        "figures written"
    );
    Ok(written)
}

/// Writes `summaries` to `out` in `format`.
pub fn emit_summaries<W: Write>(
    summaries: &[Summary],
    format: OutputFormat,
    mut out: W,
) -> Result<()> {
    let stdout = Path::new("<stdout>");
    match format {
        OutputFormat::Text => {
            for summary in summaries {
                writeln!(out, "{summary}").map_err(|source| PlotError::io(stdout, source))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, summaries)?;
            writeln!(out).map_err(|source| PlotError::io(stdout, source))?;
        }
    }
    out.flush().map_err(|source| PlotError::io(stdout, source))
}
