use std::{collections::HashMap, fmt};

use remesh_core::{ElementId, PointCloud, Sign, Step};
use thiserror::Error;

use crate::matching::{self, MatchError};

/// How strain is carried from one step to the previous one.
///
/// The choice depends only on the signs of the two steps being bridged, never
/// on distances or magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The carried step is a remeshing marker and the previous step is
    /// regular: topology changed between them, so strain moves by spatial
    /// matching.
    RemeshEnter,

    /// The previous step is a remeshing marker and the carried step is
    /// regular: strain moves by spatial matching.
    RemeshExit,

    /// Both steps share a sign: strain is copied by element identity.
    Stable,
}

impl Transition {
    /// Classifies the bridge from `tplus` (carried) to `tminus` (toward the past).
    #[must_use]
    pub fn between(tplus: Step, tminus: Step) -> Self {
        match (tplus.sign(), tminus.sign()) {
            (Sign::Negative, Sign::Positive) => Self::RemeshEnter,
            (Sign::Positive, Sign::Negative) => Self::RemeshExit,
            _ => Self::Stable,
        }
    }

    /// Returns true if this transition uses spatial matching.
    #[must_use]
    pub fn is_spatial(self) -> bool {
        matches!(self, Self::RemeshEnter | Self::RemeshExit)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RemeshEnter => "remesh-enter",
            Self::RemeshExit => "remesh-exit",
            Self::Stable => "stable",
        })
    }
}

/// Errors that can occur while carrying strain across one transition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error(transparent)]
    Match(#[from] MatchError),

    /// A stable transition found an element with no counterpart in the carry.
    #[error("element {0} has no counterpart in the carried snapshot")]
    MissingElement(ElementId),
}

/// Carries strain from `carry` onto `tminus` and returns the enriched `tminus`.
///
/// Spatial transitions assign each `tminus` element the strain of its nearest
/// `carry` element. A stable transition copies strain from the `carry` element
/// with the same identifier. Identifiers, centroids, and order of `tminus`
/// are preserved either way.
///
/// # Errors
///
/// Returns [`TransitionError::Match`] if a spatial transition has an empty
/// carry or a non-finite centroid, or [`TransitionError::MissingElement`] if a stable transition
/// meets an element of `tminus` that `carry` lacks.
pub fn advance(
    transition: Transition,
    carry: &PointCloud,
    tminus: PointCloud,
) -> Result<PointCloud, TransitionError> {
    match transition {
        Transition::RemeshEnter | Transition::RemeshExit => {
            Ok(matching::transfer(tminus, carry)?)
        }
        Transition::Stable => copy_by_identity(carry, tminus),
    }
}

fn copy_by_identity(carry: &PointCloud, tminus: PointCloud) -> Result<PointCloud, TransitionError> {
    let by_id: HashMap<ElementId, Option<f64>> =
        carry.iter().map(|element| (element.id, element.strain)).collect();

    let strains = tminus
        .iter()
        .map(|element| {
            by_id
                .get(&element.id)
                .copied()
                .ok_or(TransitionError::MissingElement(element.id))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tminus.with_strains(strains))
}
