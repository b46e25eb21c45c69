//! Genus grouping store.
//!
//! The master range dataset is split into one GeoPackage per genus
//! (`<dir>/<Genus>.gpkg`). Species are resolved by reading their genus file
//! and matching the scientific name exactly.

mod error;
mod region;

pub use error::{StoreError, StoreResult};
pub use region::Region;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::geometry::union_all;
use crate::gpkg;
use crate::record::SpeciesRecord;
use crate::taxon::ScientificName;

/// Summary of a partition run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionSummary {
    /// Record count per genus, sorted by genus.
    pub genera: BTreeMap<String, usize>,
}

impl PartitionSummary {
    pub fn genus_count(&self) -> usize {
        self.genera.len()
    }

    pub fn record_count(&self) -> usize {
        self.genera.values().sum()
    }
}

/// Subdirectory of the store holding an uncommitted partition.
const STAGING_DIR: &str = ".partition";

/// Directory of per-genus GeoPackages.
#[derive(Debug, Clone)]
pub struct GenusStore {
    dir: PathBuf,
}

impl GenusStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding a genus.
    pub fn path_for(&self, genus: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", genus, gpkg::EXTENSION))
    }

    /// Split a master GeoPackage into genus files.
    ///
    /// Existing genus files are overwritten.
    pub fn partition(&self, master: &Path) -> StoreResult<PartitionSummary> {
        let records = gpkg::read_species_records(master)?;
        self.write_partitioned(records)
    }

    /// Group records by genus and write one file per genus.
    ///
    /// Files are written into a staging directory first and moved into the
    /// store only once every genus has been written. On error nothing new is
    /// left in the store.
    pub fn write_partitioned(&self, records: Vec<SpeciesRecord>) -> StoreResult<PartitionSummary> {
        fs::create_dir_all(&self.dir).map_err(|source| io_error(&self.dir, source))?;

        let mut groups: BTreeMap<String, Vec<SpeciesRecord>> = BTreeMap::new();
        for record in records {
            groups.entry(record.genus.clone()).or_default().push(record);
        }

        let staging = self.staging_dir();
        remove_dir_if_present(&staging)?;
        fs::create_dir_all(&staging).map_err(|source| io_error(&staging, source))?;

        let summary = match write_groups(&staging, &groups) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "Partition failed, discarding staged genus files");
                let _ = fs::remove_dir_all(&staging);
                return Err(e);
            }
        };

        let mut moved = Vec::with_capacity(groups.len());
        for genus in groups.keys() {
            let target = self.path_for(genus);
            if let Err(source) = fs::rename(staged_path(&staging, genus), &target) {
                for path in &moved {
                    let _ = fs::remove_file(path);
                }
                let _ = fs::remove_dir_all(&staging);
                return Err(io_error(&target, source));
            }
            moved.push(target);
        }
        remove_dir_if_present(&staging)?;

        info!(
            genera = summary.genus_count(),
            records = summary.record_count(),
            dir = %self.dir.display(),
            "Partitioned range records by genus"
        );
        Ok(summary)
    }

    /// Scratch directory a partition is written to before it is committed.
    fn staging_dir(&self) -> PathBuf {
        self.dir.join(STAGING_DIR)
    }

    /// Genus names with a stored file, sorted.
    pub fn genera(&self) -> StoreResult<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|source| io_error(&self.dir, source))?;

        let mut genera = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| io_error(&self.dir, source))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(gpkg::EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                genera.push(stem.to_string());
            }
        }
        genera.sort();
        Ok(genera)
    }

    /// True when at least one genus file exists.
    pub fn is_populated(&self) -> StoreResult<bool> {
        Ok(!self.genera()?.is_empty())
    }

    /// All records of a genus.
    pub fn load_genus(&self, genus: &str) -> StoreResult<Vec<SpeciesRecord>> {
        let path = self.path_for(genus);
        if !path.is_file() {
            return Err(StoreError::GenusNotFound {
                genus: genus.to_string(),
                path,
            });
        }
        Ok(gpkg::read_species_records(&path)?)
    }

    /// Resolve a scientific name to its range.
    ///
    /// Several records with the same name are merged into one geometry.
    pub fn find_species(&self, name: &str) -> StoreResult<Region> {
        let parsed = ScientificName::parse(name)?;
        let records = self.load_genus(parsed.genus())?;

        let matches: Vec<SpeciesRecord> = records
            .into_iter()
            .filter(|r| r.sciname == parsed.as_str())
            .collect();

        if matches.is_empty() {
            return Err(StoreError::SpeciesNotFound {
                name: parsed.as_str().to_string(),
                genus: parsed.genus().to_string(),
            });
        }

        debug!(species = %parsed, records = matches.len(), "Resolved species");
        let geometry = union_all(matches.into_iter().map(|r| r.geometry));
        Ok(Region::new(parsed.as_str(), parsed.genus(), geometry))
    }
}

fn staged_path(staging: &Path, genus: &str) -> PathBuf {
    staging.join(format!("{}.{}", genus, gpkg::EXTENSION))
}

fn write_groups(
    staging: &Path,
    groups: &BTreeMap<String, Vec<SpeciesRecord>>,
) -> StoreResult<PartitionSummary> {
    let mut summary = PartitionSummary::default();
    for (genus, members) in groups {
        let path = staged_path(staging, genus);
        gpkg::write_species_records(&path, genus, members)?;
        debug!(genus = %genus, records = members.len(), path = %path.display(), "Wrote genus file");
        summary.genera.insert(genus.clone(), members.len());
    }
    Ok(summary)
}

fn remove_dir_if_present(path: &Path) -> StoreResult<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(io_error(path, e)),
        _ => Ok(()),
    }
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::test_support::square;
    use geo::Area;

    fn records() -> Vec<SpeciesRecord> {
        vec![
            SpeciesRecord::new("Didelphis virginiana", square(-100.0, 15.0, 20.0)).unwrap(),
            SpeciesRecord::new("Didelphis marsupialis", square(-90.0, -10.0, 20.0)).unwrap(),
            SpeciesRecord::new("Marmosa robinsoni", square(-80.0, 0.0, 5.0)).unwrap(),
            // Second polygon for the same species, overlapping the first
            SpeciesRecord::new("Didelphis virginiana", square(-85.0, 30.0, 10.0)).unwrap(),
        ]
    }

    #[test]
    fn test_write_partitioned_groups_by_genus() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = GenusStore::new(dir.path().join("shapes"));

        let summary = store.write_partitioned(records()).unwrap();
        assert_eq!(summary.genus_count(), 2);
        assert_eq!(summary.record_count(), 4);
        assert_eq!(summary.genera.get("Didelphis"), Some(&3));

        assert_eq!(store.genera().unwrap(), vec!["Didelphis", "Marmosa"]);
        assert!(store.path_for("Marmosa").is_file());
        assert!(store.is_populated().unwrap());
    }

    /// A genus name too long for a file name makes its write fail.
    fn records_with_unwritable_genus() -> Vec<SpeciesRecord> {
        let genus = "Z".repeat(300);
        vec![
            SpeciesRecord::new("Didelphis virginiana", square(-100.0, 15.0, 20.0)).unwrap(),
            SpeciesRecord::new(&format!("{} longus", genus), square(-80.0, 0.0, 5.0)).unwrap(),
        ]
    }

    #[test]
    fn test_failed_partition_leaves_store_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = GenusStore::new(dir.path().join("shapes"));

        assert!(store.write_partitioned(records_with_unwritable_genus()).is_err());

        // Didelphis was written before the failure but never committed
        assert!(store.genera().unwrap().is_empty());
        assert!(!store.is_populated().unwrap());
        assert!(!store.path_for("Didelphis").exists());
        assert!(!store.staging_dir().exists());
    }

    #[test]
    fn test_failed_partition_keeps_previous_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = GenusStore::new(dir.path());
        store.write_partitioned(records()).unwrap();

        assert!(store.write_partitioned(records_with_unwritable_genus()).is_err());

        assert_eq!(store.genera().unwrap(), vec!["Didelphis", "Marmosa"]);
        assert!(store.find_species("Didelphis marsupialis").is_ok());
    }

    #[test]
    fn test_stale_staging_dir_is_replaced() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = GenusStore::new(dir.path());
        fs::create_dir_all(store.staging_dir()).unwrap();
        fs::write(store.staging_dir().join("Leftover.gpkg"), b"partial").unwrap();

        store.write_partitioned(records()).unwrap();

        assert_eq!(store.genera().unwrap(), vec!["Didelphis", "Marmosa"]);
        assert!(!store.staging_dir().exists());
    }

    #[test]
    fn test_genera_of_missing_dir_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = GenusStore::new(dir.path().join("nothing"));
        assert!(store.genera().unwrap().is_empty());
        assert!(!store.is_populated().unwrap());
    }

    #[test]
    fn test_find_species_merges_duplicate_records() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = GenusStore::new(dir.path());
        store.write_partitioned(records()).unwrap();

        let region = store.find_species("Didelphis virginiana").unwrap();
        assert_eq!(region.name(), "Didelphis virginiana");
        assert_eq!(region.genus(), "Didelphis");
        // 400 + 100 minus the 5x5 overlap
        assert!((region.geometry().unsigned_area() - 475.0).abs() < 1e-6);
    }

    #[test]
    fn test_find_species_unknown_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = GenusStore::new(dir.path());
        store.write_partitioned(records()).unwrap();

        match store.find_species("Didelphis aurita") {
            Err(StoreError::SpeciesNotFound { name, genus }) => {
                assert_eq!(name, "Didelphis aurita");
                assert_eq!(genus, "Didelphis");
            }
            other => panic!("expected SpeciesNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_find_species_unknown_genus() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = GenusStore::new(dir.path());
        store.write_partitioned(records()).unwrap();

        assert!(matches!(
            store.find_species("Caluromys lanatus"),
            Err(StoreError::GenusNotFound { .. })
        ));
    }

    #[test]
    fn test_find_species_requires_exact_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = GenusStore::new(dir.path());
        store.write_partitioned(records()).unwrap();

        assert!(store.find_species("Didelphis virginian").is_err());
        assert!(store.find_species("  Didelphis marsupialis ").is_ok());
    }
}
