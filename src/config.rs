//! Optional TOML configuration shared by the plotting binaries.
//!
//! ```toml
//! out_dir = "plots"
//! columns = 2
//! update_buckets = [46, 47, 48, 49, 50, 51]
//!
//! [panel]
//! width = 750
//! height = 500
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::figure::DEFAULT_UPDATE_BUCKETS;
use crate::render::RenderOptions;

const DEFAULT_OUT_DIR: &str = "plots";
const DEFAULT_COLUMNS: usize = 2;

/// Resolved plotting configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Directory figures are written to.
    pub out_dir: PathBuf,
    /// Panels per grid row in multi-panel figures.
    pub columns: usize,
    /// Per-panel pixel size.
    pub render: RenderOptions,
    /// Update counts plotted by the depth comparison.
    pub update_buckets: Vec<i64>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            columns: DEFAULT_COLUMNS,
            render: RenderOptions::default(),
            update_buckets: DEFAULT_UPDATE_BUCKETS.to_vec(),
        }
    }
}

impl PlotConfig {
    /// Loads `explicit`, or the per-user config file when it exists, or the
    /// defaults.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let raw = match explicit {
            Some(path) => read_file(path)?,
            None => match default_config_path().filter(|path| path.exists()) {
                Some(path) => read_file(&path)?,
                None => RawConfig::default(),
            },
        };
        Self::from_raw(raw)
    }

    /// Parses configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let columns = raw.columns.unwrap_or(defaults.columns);
        if columns == 0 {
            return Err(ConfigError::Invalid("columns must be at least 1".into()));
        }
        let render = RenderOptions {
            panel_width: raw.panel.width.unwrap_or(defaults.render.panel_width),
            panel_height: raw.panel.height.unwrap_or(defaults.render.panel_height),
        };
        if render.panel_width == 0 || render.panel_height == 0 {
            return Err(ConfigError::Invalid(
                "panel width and height must be non-zero".into(),
            ));
        }
        Ok(Self {
            out_dir: raw.out_dir.unwrap_or(defaults.out_dir),
            columns,
            render,
            update_buckets: raw.update_buckets.unwrap_or(defaults.update_buckets),
        })
    }
}

/// Per-user configuration file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("benchplot").join("config.toml"))
}

fn read_file(path: &Path) -> Result<RawConfig, ConfigError> {
    debug!(path = %path.display(), "reading config");
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    out_dir: Option<PathBuf>,
    columns: Option<usize>,
    update_buckets: Option<Vec<i64>>,
    #[serde(default)]
    panel: PanelSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PanelSection {
    width: Option<u32>,
    height: Option<u32>,
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}
