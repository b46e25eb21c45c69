//! GeoPackage binary geometry encoding.
//!
//! A GeoPackage geometry blob is a small header followed by standard WKB:
//!
//! ```text
//! ┌──────┬─────────┬───────┬────────────┬─────────────────┬──────────┐
//! │ "GP" │ version │ flags │ srs_id i32 │ envelope 0–64 B │ WKB ...  │
//! └──────┴─────────┴───────┴────────────┴─────────────────┴──────────┘
//! flags: bit 0 byte order (1 = little endian)
//!        bits 1-3 envelope indicator (0 none, 1 xy, 2 xyz, 3 xym, 4 xyzm)
//!        bit 4 empty geometry
//!        bit 5 extended GeoPackage binary
//! ```

use geo::{Geometry, MultiPolygon};

use super::error::{GpkgError, GpkgResult};
use crate::geometry::{polygons_of, BoundingBox};

const MAGIC: &[u8; 2] = b"GP";
const HEADER_LEN: usize = 8;
const FLAG_LITTLE_ENDIAN: u8 = 0b0000_0001;
const FLAG_EMPTY: u8 = 0b0001_0000;
const FLAG_EXTENDED: u8 = 0b0010_0000;
/// Envelope indicator 1 (xy) shifted into place.
const ENVELOPE_XY: u8 = 1 << 1;

/// Size in bytes of the envelope for an envelope indicator value.
fn envelope_len(indicator: u8) -> GpkgResult<usize> {
    match indicator {
        0 => Ok(0),
        1 => Ok(32),
        2 | 3 => Ok(48),
        4 => Ok(64),
        other => Err(GpkgError::InvalidBlob(format!(
            "envelope indicator {} out of range",
            other
        ))),
    }
}

/// Decode a geometry blob into polygons.
///
/// Empty geometries decode to an empty multi-polygon.
pub fn decode(blob: &[u8]) -> GpkgResult<MultiPolygon<f64>> {
    if blob.len() < HEADER_LEN {
        return Err(GpkgError::InvalidBlob(format!(
            "blob is {} bytes, shorter than the header",
            blob.len()
        )));
    }
    if &blob[0..2] != MAGIC {
        return Err(GpkgError::InvalidBlob("missing 'GP' magic".to_string()));
    }
    if blob[2] != 0 {
        return Err(GpkgError::InvalidBlob(format!(
            "unsupported version {}",
            blob[2]
        )));
    }

    let flags = blob[3];
    if flags & FLAG_EXTENDED != 0 {
        return Err(GpkgError::InvalidBlob(
            "extended GeoPackage geometries are not supported".to_string(),
        ));
    }
    if flags & FLAG_EMPTY != 0 {
        return Ok(MultiPolygon::new(Vec::new()));
    }

    let wkb_start = HEADER_LEN + envelope_len((flags >> 1) & 0b111)?;
    if blob.len() <= wkb_start {
        return Err(GpkgError::InvalidBlob("no WKB payload".to_string()));
    }

    let mut payload = &blob[wkb_start..];
    let geometry =
        wkb::wkb_to_geom(&mut payload).map_err(|e| GpkgError::Wkb(format!("{:?}", e)))?;

    let kind = geometry_kind(&geometry);
    polygons_of(geometry).ok_or_else(|| GpkgError::UnsupportedGeometry(kind.to_string()))
}

/// Encode polygons as a little-endian geometry blob with an xy envelope.
pub fn encode(geometry: &MultiPolygon<f64>, srs_id: i32) -> GpkgResult<Vec<u8>> {
    let mut blob = Vec::with_capacity(64);
    blob.extend_from_slice(MAGIC);
    blob.push(0);

    let bounds = BoundingBox::of(geometry);
    let flags = match bounds {
        Some(_) => FLAG_LITTLE_ENDIAN | ENVELOPE_XY,
        None => FLAG_LITTLE_ENDIAN | FLAG_EMPTY,
    };
    blob.push(flags);
    blob.extend_from_slice(&srs_id.to_le_bytes());

    if let Some(b) = bounds {
        for value in [b.min_lon, b.max_lon, b.min_lat, b.max_lat] {
            blob.extend_from_slice(&value.to_le_bytes());
        }
    }

    let wkb = wkb::geom_to_wkb(&Geometry::MultiPolygon(geometry.clone()))
        .map_err(|e| GpkgError::Wkb(format!("{:?}", e)))?;
    blob.extend_from_slice(&wkb);
    Ok(blob)
}

/// Read the SRS id stored in a blob header.
pub fn srs_id(blob: &[u8]) -> GpkgResult<i32> {
    if blob.len() < HEADER_LEN || &blob[0..2] != MAGIC {
        return Err(GpkgError::InvalidBlob("missing 'GP' magic".to_string()));
    }
    let bytes = [blob[4], blob[5], blob[6], blob[7]];
    if blob[3] & FLAG_LITTLE_ENDIAN != 0 {
        Ok(i32::from_le_bytes(bytes))
    } else {
        Ok(i32::from_be_bytes(bytes))
    }
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test_support::square;
    use geo::{point, Area};

    #[test]
    fn test_encode_header_layout() {
        let blob = encode(&square(1.0, 2.0, 3.0), 4326).unwrap();
        assert_eq!(&blob[0..2], b"GP");
        assert_eq!(blob[2], 0);
        assert_eq!(blob[3], FLAG_LITTLE_ENDIAN | ENVELOPE_XY);
        assert_eq!(srs_id(&blob).unwrap(), 4326);

        // Envelope is minx, maxx, miny, maxy
        let minx = f64::from_le_bytes(blob[8..16].try_into().unwrap());
        let maxy = f64::from_le_bytes(blob[32..40].try_into().unwrap());
        assert_eq!(minx, 1.0);
        assert_eq!(maxy, 5.0);
    }

    #[test]
    fn test_decode_encoded_polygon() {
        let shape = square(-80.0, 10.0, 5.0);
        let decoded = decode(&encode(&shape, 4326).unwrap()).unwrap();
        assert!((decoded.unsigned_area() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_geometry_sets_flag() {
        let blob = encode(&MultiPolygon::new(Vec::new()), 4326).unwrap();
        assert_ne!(blob[3] & FLAG_EMPTY, 0);
        assert!(decode(&blob).unwrap().0.is_empty());
    }

    #[test]
    fn test_decode_big_endian_header_without_envelope() {
        let wkb = wkb::geom_to_wkb(&Geometry::MultiPolygon(square(0.0, 0.0, 2.0))).unwrap();
        let mut blob = vec![b'G', b'P', 0, 0];
        blob.extend_from_slice(&4326_i32.to_be_bytes());
        blob.extend_from_slice(&wkb);

        assert_eq!(srs_id(&blob).unwrap(), 4326);
        let decoded = decode(&blob).unwrap();
        assert!((decoded.unsigned_area() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let err = decode(b"XX\0\x01\0\0\0\0\0").unwrap_err();
        assert!(matches!(err, GpkgError::InvalidBlob(_)));
    }

    #[test]
    fn test_decode_rejects_short_blob() {
        assert!(matches!(
            decode(b"GP"),
            Err(GpkgError::InvalidBlob(_))
        ));
    }

    #[test]
    fn test_decode_rejects_extended_blob() {
        let blob = [b'G', b'P', 0, FLAG_EXTENDED | FLAG_LITTLE_ENDIAN, 0, 0, 0, 0, 1];
        assert!(matches!(decode(&blob), Err(GpkgError::InvalidBlob(_))));
    }

    #[test]
    fn test_decode_rejects_points() {
        let wkb = wkb::geom_to_wkb(&Geometry::Point(point!(x: 1.0, y: 2.0))).unwrap();
        let mut blob = vec![b'G', b'P', 0, FLAG_LITTLE_ENDIAN];
        blob.extend_from_slice(&4326_i32.to_le_bytes());
        blob.extend_from_slice(&wkb);

        match decode(&blob) {
            Err(GpkgError::UnsupportedGeometry(kind)) => assert_eq!(kind, "Point"),
            other => panic!("expected UnsupportedGeometry, got {:?}", other),
        }
    }
}
