//! Writing single-table GeoPackages.

use std::fs;
use std::path::Path;

use rusqlite::{params_from_iter, Connection};
use tracing::debug;

use super::blob;
use super::error::{GpkgError, GpkgResult};
use super::reader::quote_ident;
use super::{GEOMETRY_COLUMN, WGS84_SRS_ID};
use crate::geometry::BoundingBox;
use crate::record::{SpeciesRecord, RECORD_COLUMNS};

/// GeoPackage application id ("GPKG").
const APPLICATION_ID: i32 = 0x4750_4B47;

/// GeoPackage 1.3.0.
const USER_VERSION: i32 = 10300;

const WGS84_DEFINITION: &str = "GEOGCS[\"WGS 84\",DATUM[\"WGS_1984\",\
SPHEROID[\"WGS 84\",6378137,298.257223563,AUTHORITY[\"EPSG\",\"7030\"]],\
AUTHORITY[\"EPSG\",\"6326\"]],PRIMEM[\"Greenwich\",0,AUTHORITY[\"EPSG\",\"8901\"]],\
UNIT[\"degree\",0.0174532925199433,AUTHORITY[\"EPSG\",\"9122\"]],AUTHORITY[\"EPSG\",\"4326\"]]";

const CORE_SCHEMA: &str = "
CREATE TABLE gpkg_spatial_ref_sys (
    srs_name TEXT NOT NULL,
    srs_id INTEGER NOT NULL PRIMARY KEY,
    organization TEXT NOT NULL,
    organization_coordsys_id INTEGER NOT NULL,
    definition TEXT NOT NULL,
    description TEXT
);
CREATE TABLE gpkg_contents (
    table_name TEXT NOT NULL PRIMARY KEY,
    data_type TEXT NOT NULL,
    identifier TEXT UNIQUE,
    description TEXT DEFAULT '',
    last_change DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now')),
    min_x DOUBLE,
    min_y DOUBLE,
    max_x DOUBLE,
    max_y DOUBLE,
    srs_id INTEGER,
    CONSTRAINT fk_gc_r_srs_id FOREIGN KEY (srs_id) REFERENCES gpkg_spatial_ref_sys(srs_id)
);
CREATE TABLE gpkg_geometry_columns (
    table_name TEXT NOT NULL,
    column_name TEXT NOT NULL,
    geometry_type_name TEXT NOT NULL,
    srs_id INTEGER NOT NULL,
    z TINYINT NOT NULL,
    m TINYINT NOT NULL,
    CONSTRAINT pk_geom_cols PRIMARY KEY (table_name, column_name),
    CONSTRAINT fk_gc_tn FOREIGN KEY (table_name) REFERENCES gpkg_contents(table_name),
    CONSTRAINT fk_gc_srs FOREIGN KEY (srs_id) REFERENCES gpkg_spatial_ref_sys (srs_id)
);
";

fn create_core_schema(conn: &Connection, path: &Path) -> GpkgResult<()> {
    conn.pragma_update(None, "application_id", APPLICATION_ID)
        .map_err(GpkgError::sqlite(path))?;
    conn.pragma_update(None, "user_version", USER_VERSION)
        .map_err(GpkgError::sqlite(path))?;
    conn.execute_batch(CORE_SCHEMA)
        .map_err(GpkgError::sqlite(path))?;

    let srs_rows: [(&str, i32, &str, i32, &str); 3] = [
        ("Undefined cartesian SRS", -1, "NONE", -1, "undefined"),
        ("Undefined geographic SRS", 0, "NONE", 0, "undefined"),
        ("WGS 84 geodetic", WGS84_SRS_ID, "EPSG", 4326, WGS84_DEFINITION),
    ];
    for (name, id, org, org_id, definition) in srs_rows {
        conn.execute(
            "INSERT INTO gpkg_spatial_ref_sys \
             (srs_name, srs_id, organization, organization_coordsys_id, definition) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![name, id, org, org_id, definition],
        )
        .map_err(GpkgError::sqlite(path))?;
    }
    Ok(())
}

/// Write species records to a new GeoPackage, replacing any existing file.
///
/// The feature table is named `table` and uses the column order of
/// [`RECORD_COLUMNS`] after `fid` and the geometry column.
pub fn write_species_records(
    path: &Path,
    table: &str,
    records: &[SpeciesRecord],
) -> GpkgResult<()> {
    if path.exists() {
        fs::remove_file(path).map_err(|source| GpkgError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let mut conn = Connection::open(path).map_err(GpkgError::sqlite(path))?;
    create_core_schema(&conn, path)?;

    let tx = conn.transaction().map_err(GpkgError::sqlite(path))?;

    let attribute_defs: Vec<String> = RECORD_COLUMNS
        .iter()
        .map(|c| format!("{} TEXT", quote_ident(c)))
        .collect();
    tx.execute_batch(&format!(
        "CREATE TABLE {} (fid INTEGER PRIMARY KEY AUTOINCREMENT, {} MULTIPOLYGON, {});",
        quote_ident(table),
        quote_ident(GEOMETRY_COLUMN),
        attribute_defs.join(", ")
    ))
    .map_err(GpkgError::sqlite(path))?;

    let extent = records
        .iter()
        .filter_map(|r| BoundingBox::of(&r.geometry))
        .reduce(|a, b| a.union(&b));
    tx.execute(
        "INSERT INTO gpkg_contents \
         (table_name, data_type, identifier, min_x, min_y, max_x, max_y, srs_id) \
         VALUES (?1, 'features', ?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            table,
            extent.map(|b| b.min_lon),
            extent.map(|b| b.min_lat),
            extent.map(|b| b.max_lon),
            extent.map(|b| b.max_lat),
            WGS84_SRS_ID,
        ],
    )
    .map_err(GpkgError::sqlite(path))?;
    tx.execute(
        "INSERT INTO gpkg_geometry_columns \
         (table_name, column_name, geometry_type_name, srs_id, z, m) \
         VALUES (?1, ?2, 'MULTIPOLYGON', ?3, 0, 0)",
        rusqlite::params![table, GEOMETRY_COLUMN, WGS84_SRS_ID],
    )
    .map_err(GpkgError::sqlite(path))?;

    {
        let placeholders: Vec<String> =
            (1..=RECORD_COLUMNS.len() + 1).map(|i| format!("?{}", i)).collect();
        let columns: Vec<String> = std::iter::once(GEOMETRY_COLUMN)
            .chain(RECORD_COLUMNS.iter().copied())
            .map(quote_ident)
            .collect();
        let mut stmt = tx
            .prepare(&format!(
                "INSERT INTO {} ({}) VALUES ({})",
                quote_ident(table),
                columns.join(", "),
                placeholders.join(", ")
            ))
            .map_err(GpkgError::sqlite(path))?;

        for record in records {
            let mut values: Vec<rusqlite::types::Value> = Vec::with_capacity(columns.len());
            values.push(blob::encode(&record.geometry, WGS84_SRS_ID)?.into());
            for column in RECORD_COLUMNS {
                values.push(match record.attribute(column) {
                    Some(v) => v.to_string().into(),
                    None => rusqlite::types::Value::Null,
                });
            }
            stmt.execute(params_from_iter(values))
                .map_err(GpkgError::sqlite(path))?;
        }
    }

    tx.commit().map_err(GpkgError::sqlite(path))?;

    debug!(
        path = %path.display(),
        table,
        records = records.len(),
        "Wrote GeoPackage"
    );
    Ok(())
}
