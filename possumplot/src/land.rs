//! Land background layer.
//!
//! Land polygons (e.g. Natural Earth "land") are read from GeoJSON or a
//! GeoPackage and clipped to the plot's bounding region before drawing.

use std::fs;
use std::path::{Path, PathBuf};

use geo::{GeometryCollection, MultiPolygon};
use geojson::GeoJson;
use thiserror::Error;
use tracing::{info, warn};

use crate::geometry::{clip_to, polygons_of, BoundingBox};
use crate::gpkg::{self, GpkgError};

/// Errors that can occur while loading land polygons.
#[derive(Debug, Error)]
pub enum LandError {
    /// The land file could not be read.
    #[error("failed to read land file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The GeoJSON document is invalid.
    #[error("invalid GeoJSON in {path}: {message}")]
    GeoJson { path: PathBuf, message: String },

    /// The GeoPackage could not be read.
    #[error(transparent)]
    Gpkg(#[from] GpkgError),

    /// The file extension is not a supported land format.
    #[error("unsupported land format: {0} (expected .geojson, .json or .gpkg)")]
    UnsupportedFormat(PathBuf),
}

/// Clipped land polygons.
#[derive(Debug, Clone, Default)]
pub struct LandLayer {
    polygons: Vec<MultiPolygon<f64>>,
}

impl LandLayer {
    /// A layer with nothing to draw.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a layer from polygons, clipping each to `bounds`.
    ///
    /// Polygons entirely outside `bounds` are dropped.
    pub fn from_polygons(polygons: Vec<MultiPolygon<f64>>, bounds: &BoundingBox) -> Self {
        let polygons = polygons
            .iter()
            .map(|p| clip_to(p, bounds))
            .filter(|p| !p.0.is_empty())
            .collect();
        Self { polygons }
    }

    /// Load land polygons from a file and clip them.
    pub fn load(path: &Path, bounds: &BoundingBox) -> Result<Self, LandError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let polygons = match extension.as_deref() {
            Some("geojson") | Some("json") => read_geojson(path)?,
            Some(gpkg::EXTENSION) => gpkg::read_polygons(path)?,
            _ => return Err(LandError::UnsupportedFormat(path.to_path_buf())),
        };

        let layer = Self::from_polygons(polygons, bounds);
        info!(
            path = %path.display(),
            features = layer.polygons.len(),
            "Loaded land background"
        );
        Ok(layer)
    }

    /// Load from an optional path; a missing path gives an empty layer.
    pub fn load_optional(path: Option<&Path>, bounds: &BoundingBox) -> Result<Self, LandError> {
        match path {
            Some(path) => Self::load(path, bounds),
            None => {
                warn!("No land file configured; plotting without a land background");
                Ok(Self::empty())
            }
        }
    }

    pub fn polygons(&self) -> &[MultiPolygon<f64>] {
        &self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// Read every polygon from a GeoJSON file. Non-polygon features are skipped.
fn read_geojson(path: &Path) -> Result<Vec<MultiPolygon<f64>>, LandError> {
    let text = fs::read_to_string(path).map_err(|source| LandError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: GeoJson = text.parse().map_err(|e: geojson::Error| LandError::GeoJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let collection =
        GeometryCollection::<f64>::try_from(&document).map_err(|e| LandError::GeoJson {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut skipped = 0usize;
    let mut polygons = Vec::new();
    for geometry in collection {
        match polygons_of(geometry) {
            Some(mp) => polygons.push(mp),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(path = %path.display(), skipped, "Skipped non-polygon land features");
    }
    Ok(polygons)
}
