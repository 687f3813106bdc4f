use remesh_core::{PointCloud, Step};

use super::Transition;

/// Events emitted by the backward sweep, one per persisted snapshot.
///
/// Each event borrows the snapshot that was just persisted, which is also the
/// new carry.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// The most future step was loaded unmodified and became the first carry.
    Seeded {
        /// The seeding step.
        step: Step,

        /// Its raw snapshot.
        cloud: &'a PointCloud,
    },

    /// Strain was carried one step toward the past.
    Transferred {
        /// The step the strain came from (the previous carry).
        from: Step,

        /// The step that received the strain.
        step: Step,

        /// How the strain was carried across.
        transition: Transition,

        /// The enriched snapshot for `step`.
        cloud: &'a PointCloud,
    },
}

impl Event<'_> {
    /// Returns the step whose snapshot was just persisted.
    #[must_use]
    pub fn step(&self) -> Step {
        match self {
            Self::Seeded { step, .. } | Self::Transferred { step, .. } => *step,
        }
    }

    /// Returns the snapshot that was just persisted.
    #[must_use]
    pub fn cloud(&self) -> &PointCloud {
        match self {
            Self::Seeded { cloud, .. } | Self::Transferred { cloud, .. } => cloud,
        }
    }

    /// Returns the transition, or `None` for the seed.
    #[must_use]
    pub fn transition(&self) -> Option<Transition> {
        match self {
            Self::Seeded { .. } => None,
            Self::Transferred { transition, .. } => Some(*transition),
        }
    }
}
