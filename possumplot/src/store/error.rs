//! Error types for the genus store.

use std::path::PathBuf;

use thiserror::Error;

use crate::gpkg::GpkgError;
use crate::taxon::TaxonError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing genus files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No file exists for the requested genus.
    #[error("no range data for genus '{genus}' (expected {path})")]
    GenusNotFound { genus: String, path: PathBuf },

    /// The genus file exists but holds no record with this name.
    #[error("species '{name}' not found in genus '{genus}'")]
    SpeciesNotFound { name: String, genus: String },

    /// The requested name could not be parsed.
    #[error(transparent)]
    Taxon(#[from] TaxonError),

    /// Reading or writing a GeoPackage failed.
    #[error(transparent)]
    Gpkg(#[from] GpkgError),

    /// Filesystem error on the store directory.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
