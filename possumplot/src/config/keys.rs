//! Configuration key access and validation.
//!
//! Type-safe get/set of configuration values by `section.key` name, used by
//! the INI parser and the `config` CLI commands.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use super::settings::ConfigFile;
use crate::render::{format_color, parse_color};

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    // Paths
    PathsMaster,
    PathsShapesDir,
    PathsFiguresDir,
    PathsLand,

    // Plot
    PlotWidth,
    PlotHeight,
    PlotHatchWidth,
    PlotFirstColor,
    PlotSecondColor,
    PlotProjection,
    PlotSubtraction,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s.to_lowercase())
            .ok_or_else(|| ConfigKeyError::UnknownKey(s.to_string()))
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "paths.shapes_dir").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::PathsMaster => "paths.master",
            ConfigKey::PathsShapesDir => "paths.shapes_dir",
            ConfigKey::PathsFiguresDir => "paths.figures_dir",
            ConfigKey::PathsLand => "paths.land",
            ConfigKey::PlotWidth => "plot.width",
            ConfigKey::PlotHeight => "plot.height",
            ConfigKey::PlotHatchWidth => "plot.hatch_width",
            ConfigKey::PlotFirstColor => "plot.first_color",
            ConfigKey::PlotSecondColor => "plot.second_color",
            ConfigKey::PlotProjection => "plot.projection",
            ConfigKey::PlotSubtraction => "plot.subtraction",
        }
    }

    /// Get the section name (e.g., "paths").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "shapes_dir").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::PathsMaster => path_to_display(&config.paths.master),
            ConfigKey::PathsShapesDir => path_to_display(&config.paths.shapes_dir),
            ConfigKey::PathsFiguresDir => path_to_display(&config.paths.figures_dir),
            ConfigKey::PathsLand => config
                .paths
                .land
                .as_ref()
                .map(|p| path_to_display(p))
                .unwrap_or_default(),
            ConfigKey::PlotWidth => config.plot.width.to_string(),
            ConfigKey::PlotHeight => config.plot.height.to_string(),
            ConfigKey::PlotHatchWidth => config.plot.hatch_width.to_string(),
            ConfigKey::PlotFirstColor => format_color(config.plot.first_color),
            ConfigKey::PlotSecondColor => format_color(config.plot.second_color),
            ConfigKey::PlotProjection => config.plot.projection.to_string(),
            ConfigKey::PlotSubtraction => config.plot.subtraction.to_string(),
        }
    }

    /// Set the value in a config file.
    ///
    /// The config is left untouched when the value is invalid.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        let value = value.trim();
        let fail = |reason: String| ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason,
        };

        match self {
            ConfigKey::PathsMaster => config.paths.master = required_path(value).map_err(fail)?,
            ConfigKey::PathsShapesDir => {
                config.paths.shapes_dir = required_path(value).map_err(fail)?
            }
            ConfigKey::PathsFiguresDir => {
                config.paths.figures_dir = required_path(value).map_err(fail)?
            }
            ConfigKey::PathsLand => config.paths.land = optional_path(value),
            ConfigKey::PlotWidth => config.plot.width = positive_pixels(value).map_err(fail)?,
            ConfigKey::PlotHeight => config.plot.height = positive_pixels(value).map_err(fail)?,
            ConfigKey::PlotHatchWidth => {
                config.plot.hatch_width = positive_number(value).map_err(fail)?
            }
            ConfigKey::PlotFirstColor => config.plot.first_color = parse_color(value).map_err(fail)?,
            ConfigKey::PlotSecondColor => {
                config.plot.second_color = parse_color(value).map_err(fail)?
            }
            ConfigKey::PlotProjection => config.plot.projection = value.parse().map_err(fail)?,
            ConfigKey::PlotSubtraction => config.plot.subtraction = value.parse().map_err(fail)?,
        }
        Ok(())
    }

    /// Validate a value without applying it.
    pub fn validate(&self, value: &str) -> Result<(), ConfigKeyError> {
        self.set(&mut ConfigFile::default(), value)
    }

    /// Get all supported configuration keys, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::PathsMaster,
            ConfigKey::PathsShapesDir,
            ConfigKey::PathsFiguresDir,
            ConfigKey::PathsLand,
            ConfigKey::PlotWidth,
            ConfigKey::PlotHeight,
            ConfigKey::PlotHatchWidth,
            ConfigKey::PlotFirstColor,
            ConfigKey::PlotSecondColor,
            ConfigKey::PlotProjection,
            ConfigKey::PlotSubtraction,
        ]
    }
}

// ============================================================================
// Value parsing
// ============================================================================

/// Largest accepted canvas side.
const MAX_PIXELS: u32 = 16_384;

fn positive_pixels(value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(n) if (1..=MAX_PIXELS).contains(&n) => Ok(n),
        _ => Err(format!("must be an integer between 1 and {}", MAX_PIXELS)),
    }
}

fn positive_number(value: &str) -> Result<f32, String> {
    match value.parse::<f32>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err("must be a positive number".to_string()),
    }
}

fn required_path(value: &str) -> Result<PathBuf, String> {
    if value.is_empty() {
        Err("must be a valid path".to_string())
    } else {
        Ok(expand_tilde(value))
    }
}

/// Convert empty string to None, non-empty to Some path with tilde expansion.
fn optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(expand_tilde(value))
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Convert path to display string, collapsing home dir to ~.
pub(super) fn path_to_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
