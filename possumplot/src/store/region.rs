//! Named species range.

use geo::MultiPolygon;

use crate::geometry::{projected_area, Projection};

/// A species' geographic range: scientific name, genus and polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    name: String,
    genus: String,
    geometry: MultiPolygon<f64>,
}

impl Region {
    pub fn new(name: impl Into<String>, genus: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            name: name.into(),
            genus: genus.into(),
            geometry,
        }
    }

    /// Scientific name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn genus(&self) -> &str {
        &self.genus
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Total area of the range in the given projection's units.
    pub fn area(&self, projection: Projection) -> f64 {
        projected_area(&self.geometry, projection)
    }
}
