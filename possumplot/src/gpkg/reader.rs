//! Reading feature tables out of a GeoPackage.

use std::path::Path;

use geo::MultiPolygon;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use tracing::{debug, warn};

use super::blob;
use super::error::{GpkgError, GpkgResult};
use crate::record::SpeciesRecord;

/// Optional attribute columns copied from the source table when present.
///
/// Each entry maps a record column to the source column names accepted for it.
const OPTIONAL_COLUMNS: [(&str, &[&str]); 6] = [
    ("order", &["order"]),
    ("family", &["family"]),
    ("author", &["author"]),
    ("year", &["year"]),
    ("citation", &["citation"]),
    ("rec_source", &["rec_source", "rec_sourse", "source"]),
];

/// Location of the geometry-bearing table inside a GeoPackage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTable {
    pub table: String,
    pub geometry_column: String,
    pub srs_id: i32,
    pub columns: Vec<String>,
}

fn open_read_only(path: &Path) -> GpkgResult<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(GpkgError::sqlite(path))
}

/// Quote an SQL identifier.
pub(super) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Find the first feature table and its geometry column.
pub fn feature_table(conn: &Connection, path: &Path) -> GpkgResult<FeatureTable> {
    let table: Option<String> = conn
        .query_row(
            "SELECT table_name FROM gpkg_contents WHERE data_type = 'features' \
             ORDER BY table_name LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(GpkgError::sqlite(path))?;
    let table = table.ok_or_else(|| GpkgError::NoFeatureTable(path.to_path_buf()))?;

    let (geometry_column, srs_id): (String, i32) = conn
        .query_row(
            "SELECT column_name, srs_id FROM gpkg_geometry_columns WHERE table_name = ?1",
            [&table],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .map_err(GpkgError::sqlite(path))?;

    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", quote_ident(&table)))
        .map_err(GpkgError::sqlite(path))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(GpkgError::sqlite(path))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(GpkgError::sqlite(path))?;

    debug!(
        path = %path.display(),
        table = %table,
        geometry_column = %geometry_column,
        srs_id,
        "Found feature table"
    );

    Ok(FeatureTable {
        table,
        geometry_column,
        srs_id,
        columns,
    })
}

/// Render an SQLite value as optional text.
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) if f.fract() == 0.0 => Some(format!("{}", f as i64)),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) if s.trim().is_empty() => None,
        Value::Text(s) => Some(s),
        Value::Blob(_) => None,
    }
}

/// Read every species record from the first feature table.
///
/// Rows without a scientific name or with an empty geometry are skipped with
/// a warning. Genus and species are derived from `sciname`.
pub fn read_species_records(path: &Path) -> GpkgResult<Vec<SpeciesRecord>> {
    let conn = open_read_only(path)?;
    let layout = feature_table(&conn, path)?;

    if !layout.columns.iter().any(|c| c == "sciname") {
        return Err(GpkgError::MissingColumn {
            table: layout.table,
            column: "sciname".to_string(),
        });
    }

    let present: Vec<(&str, &str)> = OPTIONAL_COLUMNS
        .iter()
        .filter_map(|(column, sources)| {
            sources
                .iter()
                .find(|s| layout.columns.iter().any(|c| c == *s))
                .map(|source| (*column, *source))
        })
        .collect();

    let mut select = vec![quote_ident(&layout.geometry_column), quote_ident("sciname")];
    select.extend(present.iter().map(|(_, source)| quote_ident(source)));
    let sql = format!(
        "SELECT {} FROM {}",
        select.join(", "),
        quote_ident(&layout.table)
    );

    let mut stmt = conn.prepare(&sql).map_err(GpkgError::sqlite(path))?;
    let mut rows = stmt.query([]).map_err(GpkgError::sqlite(path))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    while let Some(row) = rows.next().map_err(GpkgError::sqlite(path))? {
        let geometry: Option<Vec<u8>> = row.get(0).map_err(GpkgError::sqlite(path))?;
        let sciname: Option<String> = row.get(1).map_err(GpkgError::sqlite(path))?;

        let (Some(geometry), Some(sciname)) = (geometry, sciname) else {
            skipped += 1;
            continue;
        };

        let geometry = decode_checked(&geometry, &layout)?;
        if geometry.0.is_empty() {
            skipped += 1;
            continue;
        }

        let mut record = match SpeciesRecord::new(&sciname, geometry) {
            Ok(record) => record,
            Err(e) => {
                warn!(sciname = %sciname, error = %e, "Skipping record");
                skipped += 1;
                continue;
            }
        };

        for (i, (column, _)) in present.iter().enumerate() {
            let value: Value = row.get(i + 2).map_err(GpkgError::sqlite(path))?;
            record.set_attribute(column, value_to_text(value));
        }
        records.push(record);
    }

    if skipped > 0 {
        warn!(
            path = %path.display(),
            skipped,
            "Skipped rows without a name or geometry"
        );
    }

    Ok(records)
}

/// Decode a geometry blob, rejecting one whose SRS differs from its column's.
fn decode_checked(geometry: &[u8], layout: &FeatureTable) -> GpkgResult<MultiPolygon<f64>> {
    let found = blob::srs_id(geometry)?;
    if found != layout.srs_id {
        return Err(GpkgError::SrsMismatch {
            table: layout.table.clone(),
            expected: layout.srs_id,
            found,
        });
    }
    blob::decode(geometry)
}

/// Read every polygon of the first feature table, ignoring attributes.
pub fn read_polygons(path: &Path) -> GpkgResult<Vec<MultiPolygon<f64>>> {
    let conn = open_read_only(path)?;
    let layout = feature_table(&conn, path)?;

    let sql = format!(
        "SELECT {} FROM {}",
        quote_ident(&layout.geometry_column),
        quote_ident(&layout.table)
    );
    let mut stmt = conn.prepare(&sql).map_err(GpkgError::sqlite(path))?;
    let blobs = stmt
        .query_map([], |row| row.get::<_, Option<Vec<u8>>>(0))
        .map_err(GpkgError::sqlite(path))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(GpkgError::sqlite(path))?;

    blobs
        .into_iter()
        .flatten()
        .map(|b| decode_checked(&b, &layout))
        .filter(|r| !matches!(r, Ok(mp) if mp.0.is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("order"), "\"order\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(Value::Null), None);
        assert_eq!(value_to_text(Value::Integer(1826)), Some("1826".to_string()));
        assert_eq!(value_to_text(Value::Real(1780.0)), Some("1780".to_string()));
        assert_eq!(value_to_text(Value::Text("  ".to_string())), None);
        assert_eq!(
            value_to_text(Value::Text("Kerr".to_string())),
            Some("Kerr".to_string())
        );
    }

    #[test]
    fn test_missing_file_is_sqlite_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_species_records(&dir.path().join("absent.gpkg")).unwrap_err();
        assert!(matches!(err, GpkgError::Sqlite { .. }));
    }
}
