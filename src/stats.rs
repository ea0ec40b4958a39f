//! Descriptive statistics over the numeric columns of a table.

use std::fmt;

use serde::Serialize;

use crate::model::{NumericRecord, Table};

const STAT_NAMES: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
const MIN_COLUMN_WIDTH: usize = 12;

/// Statistics for one numeric column.
///
/// Every statistic except `count` is NaN for an empty column, and `std` is
/// NaN with fewer than two values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    /// Column name.
    pub column: String,
    /// Number of non-NaN values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std: f64,
    /// Smallest value.
    pub min: f64,
    /// 25th percentile.
    pub p25: f64,
    /// Median.
    pub p50: f64,
    /// 75th percentile.
    pub p75: f64,
    /// Largest value.
    pub max: f64,
}

impl ColumnStats {
    /// Summarizes `values`. NaN entries are skipped.
    pub fn from_values(column: impl Into<String>, mut values: Vec<f64>) -> Self {
        values.retain(|v| !v.is_nan());
        values.sort_by(f64::total_cmp);
        let count = values.len();
        let mean = if count == 0 {
            f64::NAN
        } else {
            values.iter().sum::<f64>() / count as f64
        };
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };
        Self {
            column: column.into(),
            count,
            mean,
            std,
            min: values.first().copied().unwrap_or(f64::NAN),
            p25: quantile(&values, 0.25),
            p50: quantile(&values, 0.50),
            p75: quantile(&values, 0.75),
            max: values.last().copied().unwrap_or(f64::NAN),
        }
    }

    fn stat(&self, index: usize) -> f64 {
        match index {
            0 => self.count as f64,
            1 => self.mean,
            2 => self.std,
            3 => self.min,
            4 => self.p25,
            5 => self.p50,
            6 => self.p75,
            _ => self.max,
        }
    }
}

/// Labeled statistics for every numeric column of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Caller-supplied report label.
    pub label: String,
    /// One entry per numeric column, in schema order.
    pub columns: Vec<ColumnStats>,
}

impl Summary {
    /// Looks up the statistics of `column`.
    pub fn column(&self, column: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|stats| stats.column == column)
    }
}

/// Computes per-column statistics for `rows`.
pub fn describe<'a, R, I>(rows: I, label: impl Into<String>) -> Summary
where
    R: NumericRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); R::NUMERIC_COLUMNS.len()];
    for row in rows {
        for (index, column) in values.iter_mut().enumerate() {
            column.push(row.numeric_value(index));
        }
    }
    describe_columns(R::NUMERIC_COLUMNS.iter().copied().zip(values), label)
}

/// Computes statistics for named value columns, keeping their order.
pub fn describe_columns<'a, I>(columns: I, label: impl Into<String>) -> Summary
where
    I: IntoIterator<Item = (&'a str, Vec<f64>)>,
{
    Summary {
        label: label.into(),
        columns: columns
            .into_iter()
            .map(|(name, values)| ColumnStats::from_values(name, values))
            .collect(),
    }
}

/// Summarizes a loaded table. Headered files report every numeric column in
/// the file; other tables report the record type's numeric columns.
pub fn describe_table<R: NumericRecord>(table: &Table<R>, label: impl Into<String>) -> Summary {
    match table.raw() {
        Some(raw) => describe_columns(raw.numeric_columns(), label),
        None => describe(table.rows(), label),
    }
}

/// Linear interpolation between the closest ranks of sorted `values`.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics for {}:", self.label)?;
        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| c.column.len().max(MIN_COLUMN_WIDTH))
            .collect();
        write!(f, "{:<6}", "")?;
        for (stats, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", stats.column, width = *width)?;
        }
        writeln!(f)?;
        for (index, name) in STAT_NAMES.iter().enumerate() {
            write!(f, "{name:<6}")?;
            for (stats, width) in self.columns.iter().zip(&widths) {
                write!(f, "  {:>width$.6}", stats.stat(index), width = *width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
