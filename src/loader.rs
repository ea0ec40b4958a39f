//! CSV ingestion for the two result layouts.
//!
//! Headerless files carry the fixed [`BenchRecord::COLUMNS`] schema by
//! position. Headered files name their columns in the first row and are read
//! into [`DepthRecord`] by name; their raw fields are kept alongside so every
//! numeric column can be summarized. Text fields are kept verbatim and only
//! numeric fields have surrounding whitespace ignored.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use crate::error::{PlotError, Result};
use crate::label::RunLabel;
use crate::model::{BenchRecord, DepthRecord, LabeledTable, RawColumns, Table};

/// Loads one headerless file.
pub fn load_headerless(path: impl AsRef<Path>) -> Result<Table<BenchRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PlotError::io(path, source))?;
    let rows = read_headerless(file, path)?;
    debug!(path = %path.display(), rows = rows.len(), "loaded headerless results");
    Ok(Table::new(path, rows))
}

/// Loads every file and concatenates them into a single table.
pub fn load_headerless_all<P: AsRef<Path>>(paths: &[P]) -> Result<Table<BenchRecord>> {
    let tables = paths
        .iter()
        .map(|path| load_headerless(path))
        .collect::<Result<Vec<_>>>()?;
    Ok(Table::concat(tables))
}

/// Loads one headered file with `Updates`, `Depth` and `Time (ms)` columns.
pub fn load_headered(path: impl AsRef<Path>) -> Result<Table<DepthRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PlotError::io(path, source))?;
    let mut reader = ReaderBuilder::new().from_reader(file);
    let headers = reader
        .headers()
        .map_err(|source| PlotError::csv(path, source))?
        .clone();
    let mut rows = Vec::new();
    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| PlotError::csv(path, source))?;
        let row: DepthRecord = record
            .deserialize(Some(&headers))
            .map_err(|source| PlotError::csv(path, source))?;
        rows.push(row);
        records.push(record);
    }
    debug!(path = %path.display(), rows = rows.len(), "loaded headered results");
    Ok(Table::new(path, rows).with_raw(RawColumns::new(headers, records)))
}

/// Loads each file with `load` and labels it from its file name.
///
/// The label is parsed before the file is opened, so a badly named file
/// fails without touching the disk.
pub fn load_labeled<R, P, F>(paths: &[P], mut load: F) -> Result<Vec<LabeledTable<R>>>
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> Result<Table<R>>,
{
    let mut runs = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let label = RunLabel::from_path(path)?;
        let table = load(path)?;
        runs.push(LabeledTable { label, table });
    }
    Ok(runs)
}

fn read_headerless<T: Read>(input: T, path: &Path) -> Result<Vec<BenchRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| PlotError::csv(path, source))?;
        if record.len() != BenchRecord::COLUMNS.len() {
            return Err(PlotError::Schema {
                path: path.to_path_buf(),
                line: record.position().map(|pos| pos.line()).unwrap_or(0),
                expected: BenchRecord::COLUMNS.len(),
                found: record.len(),
            });
        }
        let row: BenchRecord = record
            .deserialize(None)
            .map_err(|source| PlotError::csv(path, source))?;
        rows.push(row);
    }
    Ok(rows)
}

impl Table<BenchRecord> {
    /// Writes the rows back out in the headerless five-column layout.
    pub fn write_headerless<W: Write>(&self, output: W) -> Result<()> {
        write_headerless_rows(self.rows().iter(), output)
    }

    /// Parses headerless rows from an in-memory reader, tagging errors with
    /// `origin`.
    pub fn read_headerless<T: Read>(input: T, origin: impl Into<PathBuf>) -> Result<Self> {
        let origin = origin.into();
        let rows = read_headerless(input, &origin)?;
        Ok(Table::new(origin, rows))
    }
}

/// Writes borrowed rows in the headerless layout.
pub fn write_headerless_rows<'a, I, W>(rows: I, output: W) -> Result<()>
where
    I: IntoIterator<Item = &'a BenchRecord>,
    W: Write,
{
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
