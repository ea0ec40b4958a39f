//! Figure layouts for the three comparison views.
//!
//! Builders here are pure: they turn loaded tables into [`Figure`] values
//! that [`crate::render`] draws. Nothing is shared between calls.

use crate::group::{comparison_pairs, distinct, grid_rows, partition};
use crate::model::{BenchRecord, DepthRecord, LabeledTable, Table};

/// Update counts plotted by [`update_bucket_figure`] unless configured otherwise.
pub const DEFAULT_UPDATE_BUCKETS: [i64; 6] = [46, 47, 48, 49, 50, 51];

/// A labeled line, with points sorted by x.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend entry.
    pub label: String,
    /// `(x, y)` points in ascending x.
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Builds a series, sorting points by x. Ties keep their input order.
    /// Points with an infinite or NaN coordinate cannot be placed on an axis
    /// and are dropped.
    pub fn new(label: impl Into<String>, mut points: Vec<(f64, f64)>) -> Self {
        points.retain(|&point| finite_point(point));
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self {
            label: label.into(),
            points,
        }
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One subplot.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Caption above the plot area.
    pub title: String,
    /// X axis description.
    pub x_label: String,
    /// Y axis description.
    pub y_label: String,
    /// Lines drawn in this panel.
    pub series: Vec<Series>,
}

impl Panel {
    fn new(title: impl Into<String>, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            series: Vec::new(),
        }
    }

    /// Adds `series` unless it has no points.
    fn push_nonempty(&mut self, series: Series) {
        if !series.is_empty() {
            self.series.push(series);
        }
    }

    /// Data extent as `((x_min, x_max), (y_min, y_max))`, or `None` when the
    /// panel has no finite points.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut points = self
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|&&point| finite_point(point));
        let &(x0, y0) = points.next()?;
        let (mut x_min, mut x_max, mut y_min, mut y_max) = (x0, x0, y0, y0);
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        Some(((x_min, x_max), (y_min, y_max)))
    }
}

pub(crate) fn finite_point((x, y): (f64, f64)) -> bool {
    x.is_finite() && y.is_finite()
}

/// A titled grid of panels.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Figure title, also used to name the output file.
    pub title: String,
    /// Panels per grid row.
    pub columns: usize,
    /// Panels in row-major order.
    pub panels: Vec<Panel>,
}

impl Figure {
    /// `(rows, columns)` of the panel grid. Unused trailing cells stay blank.
    pub fn grid(&self) -> (usize, usize) {
        let columns = self.columns.max(1);
        (grid_rows(self.panels.len(), columns), columns)
    }

    /// File-system friendly name derived from the title.
    pub fn file_stem(&self) -> String {
        let mut stem = String::with_capacity(self.title.len());
        for ch in self.title.chars() {
            if ch.is_ascii_alphanumeric() {
                stem.push(ch.to_ascii_lowercase());
            } else if !stem.ends_with('_') {
                stem.push('_');
            }
        }
        let stem = stem.trim_matches('_');
        if stem.is_empty() {
            "figure".to_string()
        } else {
            stem.to_string()
        }
    }
}

/// One single-panel figure per category, with one line per options value.
///
/// Categories and options keep the order they first appear in the table.
pub fn per_category_figures(table: &Table<BenchRecord>) -> Vec<Figure> {
    distinct(table.rows(), |row| row.name.as_str())
        .into_iter()
        .map(|category| category_figure(table, category))
        .collect()
}

fn category_figure(table: &Table<BenchRecord>, category: &str) -> Figure {
    let rows = table.filter(|row| row.name == category);
    let mut panel = Panel::new(category, "Iterations", "Milliseconds");
    for option in distinct(rows.iter().copied(), |row| row.options.as_str()) {
        let points = partition(rows.iter().copied(), category, option)
            .into_iter()
            .map(iteration_point)
            .collect();
        panel.push_nonempty(Series::new(format!("Option {option}"), points));
    }
    Figure {
        title: category.to_string(),
        columns: 1,
        panels: vec![panel],
    }
}

/// One panel per `(options, category)` pair, one line per run.
pub fn comparison_figure(runs: &[LabeledTable<BenchRecord>], columns: usize) -> Figure {
    let panels = comparison_pairs(runs)
        .into_iter()
        .map(|(option, name)| {
            let mut panel = Panel::new(
                format!("Comparison of {name} for Option {option}"),
                "Iterations",
                "Milliseconds",
            );
            for run in runs {
                let points = partition(run.table.rows(), &name, &option)
                    .into_iter()
                    .map(iteration_point)
                    .collect();
                panel.push_nonempty(Series::new(run.label.to_string(), points));
            }
            panel
        })
        .collect();
    Figure {
        title: "Benchmark comparison".to_string(),
        columns,
        panels,
    }
}

/// One panel per run, one line per update-count bucket.
pub fn update_bucket_figure(
    runs: &[LabeledTable<DepthRecord>],
    buckets: &[i64],
    columns: usize,
) -> Figure {
    let panels = runs
        .iter()
        .map(|run| {
            let mut panel = Panel::new(run.label.to_string(), "Number of Layers", "Time (ms)");
            for &updates in buckets {
                let points = run
                    .table
                    .filter(|row| row.updates == updates)
                    .into_iter()
                    .map(|row| (row.depth as f64, row.time_ms))
                    .collect();
                panel.push_nonempty(Series::new(format!("Updates {updates}"), points));
            }
            panel
        })
        .collect();
    Figure {
        title: "Depth comparison".to_string(),
        columns,
        panels,
    }
}

fn iteration_point(row: &BenchRecord) -> (f64, f64) {
    (row.iterations as f64, row.milliseconds)
}
