use std::error::Error as StdError;

use remesh_core::Step;

use super::{Transition, TransitionError};

/// Errors that abort the backward sweep.
///
/// Each variant names the step being processed and the phase that failed.
/// Snapshots persisted before the failure are left in place.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load step {step}")]
    Load {
        step: Step,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("{transition} transfer from step {from} to step {step} failed")]
    Transfer {
        step: Step,
        from: Step,
        transition: Transition,
        #[source]
        source: TransitionError,
    },

    #[error("failed to persist step {step}")]
    Save {
        step: Step,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    pub(crate) fn load<E: StdError + Send + Sync + 'static>(step: Step, err: E) -> Self {
        Self::Load {
            step,
            source: Box::new(err),
        }
    }

    pub(crate) fn save<E: StdError + Send + Sync + 'static>(step: Step, err: E) -> Self {
        Self::Save {
            step,
            source: Box::new(err),
        }
    }

    /// Returns the step that was being processed.
    #[must_use]
    pub fn step(&self) -> Step {
        match self {
            Self::Load { step, .. } | Self::Transfer { step, .. } | Self::Save { step, .. } => {
                *step
            }
        }
    }
}
