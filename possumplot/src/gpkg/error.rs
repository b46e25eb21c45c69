//! Error types for GeoPackage access.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for GeoPackage operations.
pub type GpkgResult<T> = Result<T, GpkgError>;

/// Errors that can occur while reading or writing a GeoPackage.
#[derive(Debug, Error)]
pub enum GpkgError {
    /// SQLite failed to open or query the file.
    #[error("SQLite error in {path}: {source}")]
    Sqlite {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file has no feature table registered in `gpkg_contents`.
    #[error("no feature table found in {0}")]
    NoFeatureTable(PathBuf),

    /// A required attribute column is missing from the feature table.
    #[error("table '{table}' has no '{column}' column")]
    MissingColumn { table: String, column: String },

    /// Geometry blob header is malformed.
    #[error("invalid geometry blob: {0}")]
    InvalidBlob(String),

    /// WKB payload could not be decoded or encoded.
    #[error("WKB error: {0}")]
    Wkb(String),

    /// A geometry's SRS differs from the one registered for its column.
    #[error("geometry in table '{table}' uses SRS {found}, column is registered as SRS {expected}")]
    SrsMismatch {
        table: String,
        expected: i32,
        found: i32,
    },

    /// Geometry type outside polygons and multi-polygons.
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(String),
}

impl GpkgError {
    pub(crate) fn sqlite(path: impl Into<PathBuf>) -> impl FnOnce(rusqlite::Error) -> GpkgError {
        let path = path.into();
        move |source| GpkgError::Sqlite { path, source }
    }
}
