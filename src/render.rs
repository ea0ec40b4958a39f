//! SVG rendering of [`Figure`] values.

use std::collections::HashSet;
use std::fmt::Display;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::error::{PlotError, Result};
use crate::figure::{finite_point, Figure, Panel};

const TITLE_FONT_SIZE: u32 = 28;
const CAPTION_FONT_SIZE: u32 = 20;
const LEGEND_FONT_SIZE: u32 = 14;
const X_LABEL_AREA_SIZE: u32 = 45;
const Y_LABEL_AREA_SIZE: u32 = 70;
const TITLE_AREA_HEIGHT: u32 = 50;
const PAD_FRACTION: f64 = 0.05;

/// Pixel size of a single panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Panel width in pixels.
    pub panel_width: u32,
    /// Panel height in pixels.
    pub panel_height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            panel_width: 750,
            panel_height: 500,
        }
    }
}

/// Writes every figure as `<out_dir>/<stem>.svg`, creating `out_dir` first.
///
/// Figures without panels are skipped. When two titles map to the same stem
/// the later figure gets a `_2`, `_3`, ... suffix. Returns the written paths.
pub fn write_figures(
    figures: &[Figure],
    out_dir: &Path,
    options: &RenderOptions,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|source| PlotError::io(out_dir, source))?;
    let mut written = Vec::with_capacity(figures.len());
    let mut used = HashSet::new();
    for figure in figures {
        if figure.panels.is_empty() {
            debug!(title = %figure.title, "skipping figure without panels");
            continue;
        }
        let stem = unique_stem(figure.file_stem(), &mut used);
        let path = out_dir.join(format!("{stem}.svg"));
        render_svg(figure, &path, options)?;
        info!(path = %path.display(), panels = figure.panels.len(), "wrote figure");
        written.push(path);
    }
    Ok(written)
}

fn unique_stem(stem: String, used: &mut HashSet<String>) -> String {
    let mut candidate = stem.clone();
    let mut n = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{stem}_{n}");
        n += 1;
    }
    candidate
}

/// Draws `figure` into an SVG file at `path`.
pub fn render_svg(figure: &Figure, path: &Path, options: &RenderOptions) -> Result<()> {
    let (rows, columns) = figure.grid();
    let size = (
        options.panel_width * columns as u32,
        options.panel_height * rows.max(1) as u32 + TITLE_AREA_HEIGHT,
    );
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let body = root
        .titled(&figure.title, ("sans-serif", TITLE_FONT_SIZE))
        .map_err(render_err)?;
    let cells = body.split_evenly((rows.max(1), columns));
    for (cell, panel) in cells.iter().zip(&figure.panels) {
        draw_panel(cell, panel)?;
    }
    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_panel(area: &DrawingArea<SVGBackend<'_>, Shift>, panel: &Panel) -> Result<()> {
    let (x_range, y_range) = axis_ranges(panel);
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", CAPTION_FONT_SIZE))
        .margin(10)
        .x_label_area_size(X_LABEL_AREA_SIZE)
        .y_label_area_size(Y_LABEL_AREA_SIZE)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .draw()
        .map_err(render_err)?;

    for (index, series) in panel.series.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied().filter(|&point| finite_point(point)),
                color.stroke_width(2),
            ))
            .map_err(render_err)?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if !panel.series.is_empty() {
        chart
            .configure_series_labels()
            .label_font(("sans-serif", LEGEND_FONT_SIZE))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;
    }
    Ok(())
}

/// Padded data ranges for a panel; unit ranges when it has no points.
fn axis_ranges(panel: &Panel) -> (Range<f64>, Range<f64>) {
    match panel.bounds() {
        Some(((x_min, x_max), (y_min, y_max))) => (pad(x_min, x_max), pad(y_min, y_max)),
        None => (0.0..1.0, 0.0..1.0),
    }
}

fn pad(min: f64, max: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    if !span.is_finite() {
        min..max
    } else if span > 0.0 {
        let margin = span * PAD_FRACTION;
        (min - margin)..(max + margin)
    } else {
        let margin = if min == 0.0 { 1.0 } else { min.abs() * PAD_FRACTION };
        (min - margin)..(max + margin)
    }
}

fn render_err<E: Display>(err: E) -> PlotError {
    PlotError::Render(err.to_string())
}
