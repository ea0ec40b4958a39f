//! Row types and in-memory tables for benchmark results.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::StringRecord;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::label::RunLabel;

/// Records whose numeric columns can be summarized.
pub trait NumericRecord {
    /// Names of the numeric columns, in report order.
    const NUMERIC_COLUMNS: &'static [&'static str];

    /// Value of the numeric column at `column` (an index into
    /// [`NumericRecord::NUMERIC_COLUMNS`]).
    fn numeric_value(&self, column: usize) -> f64;
}

/// One row of the headerless five-column schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchRecord {
    /// Benchmark category.
    #[serde(rename = "Name")]
    pub name: String,
    /// Variant descriptor within the category.
    #[serde(rename = "Options")]
    pub options: String,
    /// Workload size.
    #[serde(rename = "Iterations", deserialize_with = "trimmed")]
    pub iterations: i64,
    /// Observer callbacks fired during the run. Never plotted.
    #[serde(rename = "ObserverCallbackCount", deserialize_with = "trimmed")]
    pub observer_callback_count: i64,
    /// Elapsed time.
    #[serde(rename = "Milliseconds", deserialize_with = "trimmed")]
    pub milliseconds: f64,
}

impl BenchRecord {
    /// Column names assigned positionally when reading headerless files.
    pub const COLUMNS: [&'static str; 5] = [
        "Name",
        "Options",
        "Iterations",
        "ObserverCallbackCount",
        "Milliseconds",
    ];
}

impl NumericRecord for BenchRecord {
    const NUMERIC_COLUMNS: &'static [&'static str] =
        &["Iterations", "ObserverCallbackCount", "Milliseconds"];

    fn numeric_value(&self, column: usize) -> f64 {
        match column {
            0 => self.iterations as f64,
            1 => self.observer_callback_count as f64,
            2 => self.milliseconds,
            _ => f64::NAN,
        }
    }
}

/// One row of the headered depth schema. Extra columns in the file are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthRecord {
    /// Update count the run was configured with.
    #[serde(rename = "Updates", deserialize_with = "trimmed")]
    pub updates: i64,
    /// Number of layers.
    #[serde(rename = "Depth", deserialize_with = "trimmed")]
    pub depth: i64,
    /// Elapsed time.
    #[serde(rename = "Time (ms)", deserialize_with = "trimmed")]
    pub time_ms: f64,
}

impl NumericRecord for DepthRecord {
    const NUMERIC_COLUMNS: &'static [&'static str] = &["Updates", "Depth", "Time (ms)"];

    fn numeric_value(&self, column: usize) -> f64 {
        match column {
            0 => self.updates as f64,
            1 => self.depth as f64,
            2 => self.time_ms,
            _ => f64::NAN,
        }
    }
}

/// Parses a numeric field, ignoring surrounding whitespace. String fields are
/// kept verbatim since they are grouping keys.
fn trimmed<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let field = String::deserialize(deserializer)?;
    field.trim().parse().map_err(D::Error::custom)
}

/// Header and raw fields of a headered file.
#[derive(Debug, Clone, Default)]
pub struct RawColumns {
    headers: StringRecord,
    records: Vec<StringRecord>,
}

impl RawColumns {
    /// Wraps a header row and the records read under it.
    pub fn new(headers: StringRecord, records: Vec<StringRecord>) -> Self {
        Self { headers, records }
    }

    /// Column names in file order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    /// Columns whose non-empty fields all parse as numbers, in file order.
    /// Empty fields count as missing (NaN).
    pub fn numeric_columns(&self) -> Vec<(&str, Vec<f64>)> {
        self.headers
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                let values = self
                    .records
                    .iter()
                    .map(|record| {
                        let field = record.get(index).unwrap_or("").trim();
                        if field.is_empty() {
                            Some(f64::NAN)
                        } else {
                            field.parse::<f64>().ok()
                        }
                    })
                    .collect::<Option<Vec<f64>>>()?;
                Some((name, values))
            })
            .collect()
    }
}

/// Rows loaded from one or more files.
#[derive(Debug, Clone)]
pub struct Table<R> {
    sources: Vec<PathBuf>,
    rows: Vec<R>,
    raw: Option<RawColumns>,
}

impl<R> Table<R> {
    /// Builds a table from rows read out of `source`.
    pub fn new(source: impl Into<PathBuf>, rows: Vec<R>) -> Self {
        Self {
            sources: vec![source.into()],
            rows,
            raw: None,
        }
    }

    /// Attaches the raw header and fields the rows were parsed from.
    pub fn with_raw(mut self, raw: RawColumns) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Raw columns of a headered file, if kept.
    pub fn raw(&self) -> Option<&RawColumns> {
        self.raw.as_ref()
    }

    /// Concatenates tables, keeping source order then row order. Raw columns
    /// are not carried over.
    pub fn concat(tables: impl IntoIterator<Item = Table<R>>) -> Self {
        let mut sources = Vec::new();
        let mut rows = Vec::new();
        for table in tables {
            sources.extend(table.sources);
            rows.extend(table.rows);
        }
        Self {
            sources,
            rows,
            raw: None,
        }
    }

    /// Files this table was loaded from.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// First source file, if any.
    pub fn source(&self) -> Option<&Path> {
        self.sources.first().map(PathBuf::as_path)
    }

    /// All rows in load order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows matching `pred`, borrowed in load order.
    pub fn filter<F>(&self, mut pred: F) -> Vec<&R>
    where
        F: FnMut(&R) -> bool,
    {
        self.rows.iter().filter(|row| pred(row)).collect()
    }
}

/// A table paired with the run label parsed from its file name.
#[derive(Debug, Clone)]
pub struct LabeledTable<R> {
    /// Label derived from the source file name.
    pub label: RunLabel,
    /// Loaded rows.
    pub table: Table<R>,
}
