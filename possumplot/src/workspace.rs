//! Working directory bootstrap.
//!
//! A workspace is the shapes directory (genus files) plus the figures
//! directory. Initialization is idempotent: directories are created when
//! missing and the master dataset is split only while no genus file exists.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::PathsConfig;
use crate::store::{GenusStore, PartitionSummary, StoreError};

/// Where the master GeoPackage can be downloaded.
pub const MASTER_DOWNLOAD_URL: &str = "https://zenodo.org/records/6644198";

/// Errors raised while preparing the workspace.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The master dataset is needed but absent.
    #[error(
        "master range dataset not found at {path}. \
         You need the Mammal Diversity Database GeoPackage for this program. \
         Download the Didelphimorphia GeoPackage at {url}",
        url = MASTER_DOWNLOAD_URL
    )]
    MissingMaster { path: PathBuf },

    /// A workspace directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Partitioning the master dataset failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What `initialize` had to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// Genus files were already present.
    AlreadyInitialized,
    /// The master dataset was split into genus files.
    Partitioned(PartitionSummary),
}

/// Shapes and figures directories of a run.
#[derive(Debug, Clone)]
pub struct Workspace {
    store: GenusStore,
    figures_dir: PathBuf,
}

impl Workspace {
    /// Open a workspace without touching the filesystem.
    pub fn new(shapes_dir: impl Into<PathBuf>, figures_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: GenusStore::new(shapes_dir),
            figures_dir: figures_dir.into(),
        }
    }

    /// Workspace for the configured paths.
    pub fn from_paths(paths: &PathsConfig) -> Self {
        Self::new(&paths.shapes_dir, &paths.figures_dir)
    }

    /// Create directories and partition the master dataset if needed.
    pub fn initialize(paths: &PathsConfig) -> Result<(Self, InitOutcome), WorkspaceError> {
        let workspace = Self::from_paths(paths);
        create_dir(workspace.store.dir())?;
        create_dir(&workspace.figures_dir)?;

        if workspace.store.is_populated()? {
            info!(
                shapes_dir = %workspace.store.dir().display(),
                "Genus files present, skipping partition"
            );
            return Ok((workspace, InitOutcome::AlreadyInitialized));
        }

        if !paths.master.is_file() {
            return Err(WorkspaceError::MissingMaster {
                path: paths.master.clone(),
            });
        }

        let summary = workspace.store.partition(&paths.master)?;
        info!(
            master = %paths.master.display(),
            genera = summary.genus_count(),
            "Initialization complete: you can delete {} now",
            paths.master.display()
        );
        Ok((workspace, InitOutcome::Partitioned(summary)))
    }

    pub fn store(&self) -> &GenusStore {
        &self.store
    }

    pub fn figures_dir(&self) -> &Path {
        &self.figures_dir
    }

    /// Path a figure with the given file name is written to.
    pub fn figure_path(&self, filename: &str) -> PathBuf {
        self.figures_dir.join(filename)
    }
}

fn create_dir(path: &Path) -> Result<(), WorkspaceError> {
    fs::create_dir_all(path).map_err(|source| WorkspaceError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
