use crate::{PointCloud, Step};

/// Source of raw snapshots and sink for backtracked ones.
///
/// The backward sweep reads each raw snapshot exactly once through
/// [`load`](SnapshotStore::load) and writes each enriched snapshot exactly once
/// through [`save`](SnapshotStore::save), in the order produced (most future
/// step first).
pub trait SnapshotStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads the raw, unmodified snapshot for `step`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the snapshot is missing or unreadable.
    fn load(&self, step: Step) -> Result<PointCloud, Self::Error>;

    /// Persists the backtracked snapshot for `step`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the snapshot cannot be written.
    fn save(&mut self, step: Step, cloud: &PointCloud) -> Result<(), Self::Error>;
}
