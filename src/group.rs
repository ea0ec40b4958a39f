//! Grouping helpers shared by the plot layouts.

use std::collections::{BTreeSet, HashSet};

use crate::model::{BenchRecord, LabeledTable};

/// Distinct keys of `rows`, in order of first appearance.
pub fn distinct<'a, R, F>(rows: impl IntoIterator<Item = &'a R>, key: F) -> Vec<&'a str>
where
    R: 'a,
    F: Fn(&'a R) -> &'a str,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for row in rows {
        let value = key(row);
        if seen.insert(value) {
            out.push(value);
        }
    }
    out
}

/// Rows whose category and options both match.
pub fn partition<'a>(
    rows: impl IntoIterator<Item = &'a BenchRecord>,
    name: &str,
    options: &str,
) -> Vec<&'a BenchRecord> {
    rows.into_iter()
        .filter(|row| row.name == name && row.options == options)
        .collect()
}

/// Every `(options, name)` pair from the union of option values and category
/// names observed across `runs`, sorted by options then name.
///
/// Pairs that never occur together in any table are still included.
pub fn comparison_pairs(runs: &[LabeledTable<BenchRecord>]) -> Vec<(String, String)> {
    let mut options = BTreeSet::new();
    let mut names = BTreeSet::new();
    for run in runs {
        for row in run.table.rows() {
            options.insert(row.options.as_str());
            names.insert(row.name.as_str());
        }
    }
    let mut pairs = Vec::with_capacity(options.len() * names.len());
    for option in &options {
        for name in &names {
            pairs.push((option.to_string(), name.to_string()));
        }
    }
    pairs
}

/// Grid rows needed to tile `panels` panels `columns` wide.
pub fn grid_rows(panels: usize, columns: usize) -> usize {
    panels.div_ceil(columns.max(1))
}
