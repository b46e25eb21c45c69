//! Forward map projections used to compare range areas.
//!
//! Geographic degrees are not an area unit, so both regions are projected
//! into a planar CRS before their polygon areas are summed.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use geo::{Area, Coord, MapCoords, MultiPolygon};

/// Sphere radius used by EASE-Grid 2.0 (EPSG:6933), in metres.
pub const EASE_RADIUS: f64 = 6_371_007.181;

/// WGS 84 semi-major axis used by Web Mercator (EPSG:3857), in metres.
pub const WGS84_RADIUS: f64 = 6_378_137.0;

/// Latitude limit of Web Mercator.
pub const MAX_MERCATOR_LAT: f64 = 85.05112878;

/// Standard parallel of the cylindrical equal-area projection (30°).
const STANDARD_PARALLEL_RAD: f64 = PI / 6.0;

/// Planar projection applied before measuring area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Lambert cylindrical equal-area with EASE-Grid 2.0 parameters.
    #[default]
    EqualArea,
    /// Spherical Web Mercator. Not area preserving; inflates high latitudes.
    WebMercator,
}

impl Projection {
    /// Project a longitude/latitude coordinate (degrees) into metres.
    #[inline]
    pub fn project(&self, coord: Coord<f64>) -> Coord<f64> {
        let lon_rad = coord.x * PI / 180.0;
        match self {
            Projection::EqualArea => {
                let lat_rad = coord.y.clamp(-90.0, 90.0) * PI / 180.0;
                let cos_ts = STANDARD_PARALLEL_RAD.cos();
                Coord {
                    x: EASE_RADIUS * lon_rad * cos_ts,
                    y: EASE_RADIUS * lat_rad.sin() / cos_ts,
                }
            }
            Projection::WebMercator => {
                let lat = coord.y.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
                let lat_rad = lat * PI / 180.0;
                Coord {
                    x: WGS84_RADIUS * lon_rad,
                    y: WGS84_RADIUS * lat_rad.tan().asinh(),
                }
            }
        }
    }

    /// Config file name of the projection.
    pub fn name(&self) -> &'static str {
        match self {
            Projection::EqualArea => "equal_area",
            Projection::WebMercator => "web_mercator",
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Projection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equal_area" | "equal-area" | "ease" => Ok(Projection::EqualArea),
            "web_mercator" | "web-mercator" | "mercator" | "3857" => Ok(Projection::WebMercator),
            other => Err(format!("unknown projection '{}'", other)),
        }
    }
}

/// Total projected area of a multi-polygon in square metres.
pub fn projected_area(geometry: &MultiPolygon<f64>, projection: Projection) -> f64 {
    geometry
        .map_coords(|c| projection.project(c))
        .unsigned_area()
}
