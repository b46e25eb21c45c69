//! Settings structs for the configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;

use crate::geometry::Projection;
use crate::overlap::{ResolveOptions, SubtractionBasis};
use crate::render::{PlotStyle, Rgba};

/// Default master GeoPackage (MDD v1.2 Didelphimorphia ranges).
pub const DEFAULT_MASTER: &str = "MDD_Didelphimorphia.gpkg";

/// Default directory of the genus grouping files.
pub const DEFAULT_SHAPES_DIR: &str = "Opossum_Shapes";

/// Default directory for rendered figures.
pub const DEFAULT_FIGURES_DIR: &str = "Figs";

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    /// Input and output locations
    pub paths: PathsConfig,
    /// Plot appearance and overlap policy
    pub plot: PlotSettings,
}

/// Locations of the data the tool reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub struct PathsConfig {
    /// Master range dataset, required only until it has been partitioned.
    pub master: PathBuf,
    /// Directory holding one GeoPackage per genus.
    pub shapes_dir: PathBuf,
    /// Directory figures are written to.
    pub figures_dir: PathBuf,
    /// Optional land polygons drawn underneath the ranges.
    pub land: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            master: PathBuf::from(DEFAULT_MASTER),
            shapes_dir: PathBuf::from(DEFAULT_SHAPES_DIR),
            figures_dir: PathBuf::from(DEFAULT_FIGURES_DIR),
            land: None,
        }
    }
}

/// Plot settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub width: u32,
    pub height: u32,
    /// Width of the intersection hatch lines in pixels
    pub hatch_width: f32,
    pub first_color: Rgba,
    pub second_color: Rgba,
    /// Projection used to compare range areas
    pub projection: Projection,
    pub subtraction: SubtractionBasis,
}

impl Default for PlotSettings {
    fn default() -> Self {
        let style = PlotStyle::default();
        Self {
            width: style.width,
            height: style.height,
            hatch_width: style.hatch_width,
            first_color: style.first_color,
            second_color: style.second_color,
            projection: Projection::default(),
            subtraction: SubtractionBasis::default(),
        }
    }
}

impl PlotSettings {
    /// Renderer style with these settings applied.
    pub fn style(&self) -> PlotStyle {
        PlotStyle {
            width: self.width,
            height: self.height,
            hatch_width: self.hatch_width,
            first_color: self.first_color,
            second_color: self.second_color,
            ..PlotStyle::default()
        }
    }

    /// Resolver options with these settings applied.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            projection: self.projection,
            basis: self.subtraction,
        }
    }
}
