use remesh_core::{PointCloud, Step};

/// Indicates how the sweep terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the most past step of the sequence.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a backward sweep.
#[derive(Debug, Clone)]
pub struct Solution {
    /// How the sweep terminated.
    pub status: Status,

    /// The step of the final carry.
    ///
    /// For a complete sweep this is the first step of the sequence.
    pub step: Step,

    /// The final carry: the snapshot of `step` enriched with strain inherited
    /// from every later step.
    pub carry: PointCloud,

    /// Steps in the order they were persisted, most future first.
    pub visited: Vec<Step>,
}
