use std::path::{Path, PathBuf};

use remesh_core::{PointCloud, SnapshotStore, Step};
use thiserror::Error;

use crate::{
    discover::{Discovered, discover},
    naming::{Naming, TableKind},
    table::{self, TableError},
};

/// Errors that can occur while loading or saving point cloud files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no point cloud was discovered for step {0}")]
    Undiscovered(Step),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// A [`SnapshotStore`] backed by point cloud CSV files.
///
/// Raw point clouds are discovered once when the store is opened. A tracked
/// point cloud is written next to the raw file of the same step.
#[derive(Debug, Clone)]
pub struct CsvStore {
    root: PathBuf,
    naming: Naming,
    discovered: Discovered,
}

impl CsvStore {
    /// Opens a store over every raw point cloud under `root`.
    #[must_use]
    pub fn open(root: impl Into<PathBuf>, naming: Naming) -> Self {
        let root = root.into();
        let discovered = discover(&root, &naming);
        Self {
            root,
            naming,
            discovered,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    #[must_use]
    pub fn discovered(&self) -> &Discovered {
        &self.discovered
    }

    /// Returns the discovered steps in ascending signed order.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.discovered.steps()
    }

    /// Returns where the tracked point cloud of `step` is written.
    #[must_use]
    pub fn tracked_path(&self, step: Step) -> PathBuf {
        let dir = self
            .discovered
            .path(step)
            .and_then(Path::parent)
            .unwrap_or(self.root.as_path());
        dir.join(self.naming.file_name(TableKind::Tracked, step))
    }
}

impl SnapshotStore for CsvStore {
    type Error = StoreError;

    fn load(&self, step: Step) -> Result<PointCloud, Self::Error> {
        let path = self
            .discovered
            .path(step)
            .ok_or(StoreError::Undiscovered(step))?;
        Ok(table::read_point_cloud(path)?)
    }

    fn save(&mut self, step: Step, cloud: &PointCloud) -> Result<(), Self::Error> {
        Ok(table::write_point_cloud(&self.tracked_path(step), cloud)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use remesh_core::Element;
    use tempfile::TempDir;

    fn cloud(strain: Option<f64>) -> PointCloud {
        PointCloud::new(vec![Element::new(1, [0.0, 1.0, 2.0]).with_strain(strain)])
    }

    #[test]
    fn loads_discovered_clouds() {
        let dir = TempDir::new().expect("temp dir");
        let nested = dir.path().join("deep");
        fs::create_dir(&nested).expect("nested dir");
        table::write_point_cloud(&nested.join("PCD_Step-4.csv"), &cloud(Some(0.3)))
            .expect("written");

        let store = CsvStore::open(dir.path(), Naming::default());

        assert_eq!(store.steps().collect::<Vec<_>>(), vec![Step::new(-4)]);
        assert_eq!(store.load(Step::new(-4)).expect("loads"), cloud(Some(0.3)));
    }

    #[test]
    fn saves_tracked_next_to_raw() {
        let dir = TempDir::new().expect("temp dir");
        let nested = dir.path().join("deep");
        fs::create_dir(&nested).expect("nested dir");
        table::write_point_cloud(&nested.join("PCD_Step2.csv"), &cloud(None)).expect("written");
        let mut store = CsvStore::open(dir.path(), Naming::default());

        store.save(Step::new(2), &cloud(Some(0.9))).expect("saved");

        let tracked = nested.join("TRACKED_PCD_Step2.csv");
        assert_eq!(store.tracked_path(Step::new(2)), tracked);
        assert_eq!(table::read_point_cloud(&tracked).expect("readable"), cloud(Some(0.9)));
        assert_eq!(store.load(Step::new(2)).expect("raw untouched"), cloud(None));
    }

    #[test]
    fn tracked_outputs_are_not_rediscovered() {
        let dir = TempDir::new().expect("temp dir");
        table::write_point_cloud(&dir.path().join("PCD_Step2.csv"), &cloud(None)).expect("written");
        let mut store = CsvStore::open(dir.path(), Naming::default());
        store.save(Step::new(2), &cloud(Some(0.9))).expect("saved");

        let reopened = CsvStore::open(dir.path(), Naming::default());

        assert_eq!(reopened.steps().collect::<Vec<_>>(), vec![Step::new(2)]);
    }

    #[test]
    fn undiscovered_step_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let store = CsvStore::open(dir.path(), Naming::default());

        let err = store.load(Step::new(8)).expect_err("nothing discovered");

        assert!(matches!(err, StoreError::Undiscovered(step) if step == Step::new(8)));
    }
}
