use std::collections::BTreeMap;

use thiserror::Error;

use crate::{PointCloud, SnapshotStore, Step};

/// Error returned when a [`MemoryStore`] holds no raw snapshot for a step.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no snapshot for step {0}")]
pub struct MissingSnapshot(pub Step);

/// An in-memory [`SnapshotStore`].
///
/// Raw snapshots are inserted up front. Backtracked snapshots are recorded
/// separately, together with the order in which they were saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: BTreeMap<Step, PointCloud>,
    tracked: BTreeMap<Step, PointCloud>,
    saved: Vec<Step>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the raw snapshot for a step, replacing any previous one.
    pub fn insert(&mut self, step: Step, cloud: PointCloud) {
        self.raw.insert(step, cloud);
    }

    /// Returns the steps that have raw snapshots, in ascending signed order.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.raw.keys().copied()
    }

    /// Returns the backtracked snapshot saved for a step, if any.
    #[must_use]
    pub fn tracked(&self, step: Step) -> Option<&PointCloud> {
        self.tracked.get(&step)
    }

    /// Returns the steps in the order they were saved.
    #[must_use]
    pub fn saved(&self) -> &[Step] {
        &self.saved
    }
}

impl SnapshotStore for MemoryStore {
    type Error = MissingSnapshot;

    fn load(&self, step: Step) -> Result<PointCloud, Self::Error> {
        self.raw.get(&step).cloned().ok_or(MissingSnapshot(step))
    }

    fn save(&mut self, step: Step, cloud: &PointCloud) -> Result<(), Self::Error> {
        self.tracked.insert(step, cloud.clone());
        self.saved.push(step);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Element;

    #[test]
    fn load_returns_raw_snapshot() {
        let mut store = MemoryStore::new();
        let cloud = PointCloud::new(vec![Element::new(1, [0.0; 3]).with_strain(Some(0.2))]);
        store.insert(Step::new(5), cloud.clone());

        assert_eq!(store.load(Step::new(5)), Ok(cloud));
        assert_eq!(
            store.load(Step::new(6)),
            Err(MissingSnapshot(Step::new(6)))
        );
    }

    #[test]
    fn save_keeps_raw_untouched() {
        let mut store = MemoryStore::new();
        store.insert(Step::new(5), PointCloud::new(vec![Element::new(1, [0.0; 3])]));

        let tracked = PointCloud::new(vec![Element::new(1, [0.0; 3]).with_strain(Some(0.7))]);
        store.save(Step::new(5), &tracked).expect("memory save");

        assert_eq!(store.tracked(Step::new(5)), Some(&tracked));
        assert_eq!(store.load(Step::new(5)).expect("raw").strains(), vec![None]);
        assert_eq!(store.saved(), &[Step::new(5)]);
    }
}
