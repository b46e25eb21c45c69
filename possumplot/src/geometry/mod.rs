//! Geometry helpers shared by the store, the resolver and the renderer.
//!
//! All geometries are `geo::MultiPolygon<f64>` in WGS 84 longitude/latitude
//! degrees. Projection into planar units happens only for area comparison.

mod projection;

pub use projection::{projected_area, Projection, EASE_RADIUS, MAX_MERCATOR_LAT, WGS84_RADIUS};

use geo::{BooleanOps, BoundingRect, Coord, Geometry, MultiPolygon, Polygon, Rect};

/// Longitude/latitude bounding box of the continental Americas view.
///
/// Land polygons are clipped to this box before rendering.
pub const AMERICAS_BOUNDS: BoundingBox = BoundingBox {
    min_lon: -130.0,
    max_lon: -60.0,
    min_lat: 5.0,
    max_lat: 55.0,
};

/// Axis-aligned geographic box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a box from two corners in any order.
    pub fn new(lon_a: f64, lat_a: f64, lon_b: f64, lat_b: f64) -> Self {
        Self {
            min_lon: lon_a.min(lon_b),
            max_lon: lon_a.max(lon_b),
            min_lat: lat_a.min(lat_b),
            max_lat: lat_a.max(lat_b),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_lon: self.min_lon.min(other.min_lon),
            max_lon: self.max_lon.max(other.max_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    /// Grow every side by `fraction` of the larger dimension.
    pub fn padded(&self, fraction: f64) -> BoundingBox {
        let pad = self.width().max(self.height()) * fraction;
        BoundingBox {
            min_lon: self.min_lon - pad,
            max_lon: self.max_lon + pad,
            min_lat: self.min_lat - pad,
            max_lat: self.max_lat + pad,
        }
    }

    /// Bounding box of a multi-polygon, `None` when it is empty.
    pub fn of(geometry: &MultiPolygon<f64>) -> Option<BoundingBox> {
        geometry.bounding_rect().map(|r| BoundingBox {
            min_lon: r.min().x,
            max_lon: r.max().x,
            min_lat: r.min().y,
            max_lat: r.max().y,
        })
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        Rect::new(
            Coord {
                x: self.min_lon,
                y: self.min_lat,
            },
            Coord {
                x: self.max_lon,
                y: self.max_lat,
            },
        )
        .to_polygon()
    }
}

/// Clip a multi-polygon to a bounding box.
pub fn clip_to(geometry: &MultiPolygon<f64>, bounds: &BoundingBox) -> MultiPolygon<f64> {
    let window = MultiPolygon::new(vec![bounds.to_polygon()]);
    geometry.intersection(&window)
}

/// Union all polygons of a list of multi-polygons into one.
pub fn union_all(parts: impl IntoIterator<Item = MultiPolygon<f64>>) -> MultiPolygon<f64> {
    parts
        .into_iter()
        .fold(MultiPolygon::new(Vec::new()), |acc, part| {
            if acc.0.is_empty() {
                part
            } else {
                acc.union(&part)
            }
        })
}

/// Flatten a geometry into its polygons.
///
/// Returns `None` if the geometry contains anything other than polygons.
pub fn polygons_of(geometry: Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(p) => Some(MultiPolygon::new(vec![p])),
        Geometry::MultiPolygon(mp) => Some(mp),
        Geometry::Rect(r) => Some(MultiPolygon::new(vec![r.to_polygon()])),
        Geometry::GeometryCollection(gc) => {
            let mut polygons = Vec::new();
            for g in gc.0 {
                polygons.extend(polygons_of(g)?.0);
            }
            Some(MultiPolygon::new(polygons))
        }
        _ => None,
    }
}
