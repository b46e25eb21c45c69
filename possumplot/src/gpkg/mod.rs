//! GeoPackage (OGC SQLite container) access.
//!
//! Only what the range dataset needs is supported: one feature table per
//! file, polygon geometries in WGS 84, text attribute columns.
//!
//! # Example
//!
//! ```ignore
//! use possumplot::gpkg;
//!
//! let records = gpkg::read_species_records(Path::new("MDD_Didelphimorphia.gpkg"))?;
//! gpkg::write_species_records(Path::new("Didelphis.gpkg"), "Didelphis", &records)?;
//! ```

mod blob;
mod error;
mod reader;
mod writer;

pub use blob::{decode as decode_geometry, encode as encode_geometry};
pub use error::{GpkgError, GpkgResult};
pub use reader::{feature_table, read_polygons, read_species_records, FeatureTable};
pub use writer::write_species_records;

/// Name of the geometry column in files written by this crate.
pub const GEOMETRY_COLUMN: &str = "geom";

/// EPSG code of WGS 84 longitude/latitude.
pub const WGS84_SRS_ID: i32 = 4326;

/// File extension of GeoPackages.
pub const EXTENSION: &str = "gpkg";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test_support::square;
    use crate::record::SpeciesRecord;
    use geo::Area;
    use rusqlite::Connection;

    fn sample_records() -> Vec<SpeciesRecord> {
        let mut virginiana = SpeciesRecord::new("Didelphis virginiana", square(-100.0, 15.0, 20.0))
            .unwrap()
            .with_taxonomy("Didelphimorphia", "Didelphidae")
            .with_authority("Kerr", "1792");
        virginiana.citation = Some("Kerr 1792".to_string());

        let robinsoni = SpeciesRecord::new("Marmosa robinsoni", square(-80.0, 0.0, 5.0)).unwrap();
        vec![virginiana, robinsoni]
    }

    #[test]
    fn test_written_file_is_readable_geopackage() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("master.gpkg");
        write_species_records(&path, "MDD_Didelphimorphia", &sample_records()).unwrap();

        let conn = Connection::open(&path).unwrap();
        let app_id: i32 = conn
            .query_row("PRAGMA application_id", [], |r| r.get(0))
            .unwrap();
        assert_eq!(app_id, 0x4750_4B47);

        let layout = feature_table(&conn, &path).unwrap();
        assert_eq!(layout.table, "MDD_Didelphimorphia");
        assert_eq!(layout.geometry_column, GEOMETRY_COLUMN);
        assert_eq!(layout.srs_id, WGS84_SRS_ID);
        assert!(layout.columns.iter().any(|c| c == "order"));

        let records = read_species_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.sciname, "Didelphis virginiana");
        assert_eq!(first.genus, "Didelphis");
        assert_eq!(first.species, "virginiana");
        assert_eq!(first.order.as_deref(), Some("Didelphimorphia"));
        assert_eq!(first.year.as_deref(), Some("1792"));
        assert_eq!(first.citation.as_deref(), Some("Kerr 1792"));
        assert!(first.rec_source.is_none());
        assert!((first.geometry.unsigned_area() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("Didelphis.gpkg");
        let records = sample_records();

        write_species_records(&path, "Didelphis", &records).unwrap();
        write_species_records(&path, "Didelphis", &records[..1]).unwrap();

        assert_eq!(read_species_records(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_read_polygons_returns_every_feature() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("land.gpkg");
        write_species_records(&path, "land", &sample_records()).unwrap();

        let polygons = read_polygons(&path).unwrap();
        assert_eq!(polygons.len(), 2);
    }

    #[test]
    fn test_missing_sciname_column_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.gpkg");
        write_species_records(&path, "bad", &sample_records()).unwrap();
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("ALTER TABLE bad RENAME COLUMN sciname TO name;")
                .unwrap();
        }

        match read_species_records(&path) {
            Err(GpkgError::MissingColumn { column, .. }) => assert_eq!(column, "sciname"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_source_column_alias_is_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("alias.gpkg");
        let mut records = sample_records();
        records[0].rec_source = Some("IUCN".to_string());
        write_species_records(&path, "alias", &records).unwrap();
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("ALTER TABLE alias RENAME COLUMN rec_source TO rec_sourse;")
                .unwrap();
        }

        let read = read_species_records(&path).unwrap();
        assert_eq!(read[0].rec_source.as_deref(), Some("IUCN"));
    }

    #[test]
    fn test_geometry_srs_must_match_column() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mercator.gpkg");
        write_species_records(&path, "mercator", &sample_records()).unwrap();
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "UPDATE gpkg_geometry_columns SET srs_id = 3857 WHERE table_name = 'mercator';",
            )
            .unwrap();
        }

        match read_species_records(&path) {
            Err(GpkgError::SrsMismatch { expected, found, .. }) => {
                assert_eq!(expected, 3857);
                assert_eq!(found, WGS84_SRS_ID);
            }
            other => panic!("expected SrsMismatch, got {:?}", other),
        }
        assert!(matches!(
            read_polygons(&path),
            Err(GpkgError::SrsMismatch { .. })
        ));
    }
}
