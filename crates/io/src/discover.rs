//! Discovery of step tables under a directory.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use remesh_core::Step;
use walkdir::WalkDir;

use crate::naming::{Naming, TableKind};

/// Steps found under a directory, each with the path of its table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    paths: BTreeMap<Step, PathBuf>,
}

impl Discovered {
    /// Returns the discovered steps in ascending signed order.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.paths.keys().copied()
    }

    /// Returns the table path of a step.
    #[must_use]
    pub fn path(&self, step: Step) -> Option<&Path> {
        self.paths.get(&step).map(PathBuf::as_path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Finds every raw point cloud under `root`.
///
/// See [`discover_kind`].
#[must_use]
pub fn discover(root: &Path, naming: &Naming) -> Discovered {
    discover_kind(root, naming, TableKind::PointCloud)
}

/// Finds every table of one kind under `root`, recursively.
///
/// Directories are walked in file name order. File names that do not parse
/// as a step of `kind` are skipped and logged at `debug`. Entries that cannot
/// be read are skipped with a warning. When two files name the same step, the
/// first one found is kept.
#[must_use]
pub fn discover_kind(root: &Path, naming: &Naming, kind: TableKind) -> Discovered {
    let mut paths: BTreeMap<Step, PathBuf> = BTreeMap::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        match naming.parse_step(kind, &name) {
            Ok(step) => {
                if let Some(kept) = paths.get(&step) {
                    debug!(
                        "Ignoring {} for step {step}, already found {}",
                        entry.path().display(),
                        kept.display()
                    );
                } else {
                    paths.insert(step, entry.into_path());
                }
            }
            Err(err) => debug!("Skipping {}: {err}", entry.path().display()),
        }
    }

    Discovered { paths }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "").expect("file written");
    }

    #[test]
    fn finds_point_clouds_recursively() {
        let dir = TempDir::new().expect("temp dir");
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).expect("nested dir");
        touch(&dir.path().join("PCD_Step10.csv"));
        touch(&dir.path().join("PCD_Step-15.csv"));
        touch(&nested.join("PCD_Step20.csv"));

        let found = discover(dir.path(), &Naming::default());

        let steps: Vec<i64> = found.steps().map(Step::get).collect();
        assert_eq!(steps, vec![-15, 10, 20]);
        assert_eq!(
            found.path(Step::new(20)),
            Some(nested.join("PCD_Step20.csv").as_path())
        );
    }

    #[test]
    fn skips_other_files() {
        let dir = TempDir::new().expect("temp dir");
        for name in [
            "PCD_Step3.csv",
            "TRACKED_PCD_Step3.csv",
            "RZ_Step3.csv",
            "PCD_Stepx.csv",
            "PCD_Step4.txt",
        ] {
            touch(&dir.path().join(name));
        }
        fs::create_dir(dir.path().join("PCD_Step9.csv")).expect("directory named like a table");

        let found = discover(dir.path(), &Naming::default());

        assert_eq!(found.steps().collect::<Vec<_>>(), vec![Step::new(3)]);
    }

    #[test]
    fn discovers_other_kinds() {
        let dir = TempDir::new().expect("temp dir");
        touch(&dir.path().join("RZ_Step-1.csv"));
        touch(&dir.path().join("PCD_Step2.csv"));

        let found = discover_kind(dir.path(), &Naming::default(), TableKind::Nodes);

        assert_eq!(found.steps().collect::<Vec<_>>(), vec![Step::new(-1)]);
    }

    #[test]
    fn first_file_for_a_step_is_kept() {
        let dir = TempDir::new().expect("temp dir");
        let later = dir.path().join("b");
        fs::create_dir(&later).expect("nested dir");
        touch(&dir.path().join("PCD_Step5.csv"));
        touch(&later.join("PCD_Step5.csv"));

        let found = discover(dir.path(), &Naming::default());

        assert_eq!(found.len(), 1);
        assert_eq!(
            found.path(Step::new(5)),
            Some(dir.path().join("PCD_Step5.csv").as_path())
        );
    }

    #[test]
    fn empty_directory_finds_nothing() {
        let dir = TempDir::new().expect("temp dir");

        assert!(discover(dir.path(), &Naming::default()).is_empty());
    }

    #[test]
    fn missing_root_finds_nothing() {
        let dir = TempDir::new().expect("temp dir");

        assert!(discover(&dir.path().join("absent"), &Naming::default()).is_empty());
    }
}
