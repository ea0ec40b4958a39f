//! Benchmark-result CSV ingestion, descriptive statistics and comparison
//! charts.
//!
//! Each binary runs the same pipeline: [`loader`] reads result files into
//! [`model::Table`]s, [`stats`] summarizes their numeric columns, and
//! [`figure`] groups rows into panels that [`render`] writes as SVG.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod figure;
pub mod group;
pub mod label;
pub mod loader;
pub mod logging;
pub mod model;
pub mod render;
pub mod stats;

pub use error::{PlotError, Result};
