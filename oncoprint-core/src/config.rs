//! Configuration handling for OncoPrint
//!
//! Supports loading configuration from oncoprint.toml files; every field has a
//! default so partial files are valid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{OncoPrintError, Result};
use crate::layout::AxisTitles;
use crate::matrix::{validate_padding, MatrixConfig, SampleOrder, DEFAULT_PADDING};
use crate::palette::{AlterationClass, Palette};
use crate::types::Color;

/// File name searched in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "oncoprint.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OncoPrintConfig {
    #[serde(default)]
    pub plot: PlotConfig,

    #[serde(default)]
    pub axes: AxesConfig,

    /// Color overrides keyed by alteration class, e.g. `amplification = "#AA0000"`
    #[serde(default)]
    pub colors: BTreeMap<String, Color>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Bar-gap padding as a fraction of one column, in (0, 0.5)
    #[serde(default = "default_padding")]
    pub padding: f64,

    /// Color of the background grid
    #[serde(default)]
    pub background_color: Color,

    /// Column ordering rule
    #[serde(default)]
    pub sample_order: SampleOrder,

    #[serde(default = "default_true")]
    pub show_legend: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AxesConfig {
    /// Title of the sample (x) axis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xlabel: Option<String>,

    /// Title of the gene (y) axis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ylabel: Option<String>,
}

fn default_padding() -> f64 { DEFAULT_PADDING }
fn default_true() -> bool { true }

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
            background_color: Color::default(),
            sample_order: SampleOrder::default(),
            show_legend: true,
        }
    }
}

impl OncoPrintConfig {
    /// Reject out-of-range padding and empty colors.
    pub fn validate(&self) -> Result<()> {
        validate_padding(self.plot.padding)?;
        self.plot.background_color.validate()?;

        for (key, color) in &self.colors {
            color.validate().map_err(|_| {
                OncoPrintError::invalid_color(format!("override for '{}' must not be empty", key))
            })?;
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file, from `oncoprint.toml` if present, or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::info!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            OncoPrintError::io(format!("Failed to read configuration file {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            OncoPrintError::config(format!("Failed to parse configuration file {}: {}", path.display(), e))
        })
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?).map_err(|e| {
            OncoPrintError::io(format!("Failed to write configuration file {}: {}", path.display(), e))
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Example configuration file content
    pub fn example_toml() -> Result<String> {
        let mut config = Self::default();
        config.axes.xlabel = Some("Samples".to_string());
        config.axes.ylabel = Some("Genes".to_string());
        config
            .colors
            .insert(AlterationClass::Amplification.key().to_string(), Color::new("#D62728"));
        config.to_toml()
    }

    pub fn matrix_config(&self) -> MatrixConfig {
        MatrixConfig {
            padding: self.plot.padding,
            background_color: self.plot.background_color.clone(),
            sample_order: self.plot.sample_order,
            palette: Palette::from_overrides(&self.colors),
        }
    }

    pub fn axis_titles(&self) -> AxisTitles {
        AxisTitles {
            x: self.axes.xlabel.clone(),
            y: self.axes.ylabel.clone(),
        }
    }
}
