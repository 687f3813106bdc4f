//! Canonical ordering of discovered steps.
//!
//! # Algorithm
//!
//! Discovery yields an unsorted set of step identifiers that may contain
//! duplicates and remeshing markers (negative steps). [`sequence`] reconciles
//! that set into the order the backward sweep visits:
//!
//! 1. Deduplicate the raw steps.
//! 2. Partition them into remeshing markers and regular steps.
//! 3. For each marker `m`, form a [`Bracket`] from the greatest regular step
//!    below `|m|` and the smallest regular step above it. Either neighbor is
//!    omitted when absent.
//! 4. Pool the brackets with every discovered step. Where both `+k` and `-k`
//!    are present, the marker `-k` is kept and `+k` is dropped.
//! 5. Sort the pool by absolute value, ascending, and deduplicate.
//!
//! # Limitations
//!
//! The final sort is by magnitude, not by chronology. When markers cluster
//! closely, a marker can land between two regular steps that are not its true
//! chronological neighbors. The sweep sees the order exactly as produced here.

mod bracket;
mod error;

pub use bracket::Bracket;
pub use error::EmptyRangeError;

use std::collections::{BTreeSet, HashSet};

use remesh_core::Step;

/// The ordered list of steps visited by the backward sweep.
///
/// A sequence always holds at least one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequence {
    steps: Vec<Step>,
    brackets: Vec<Bracket>,
}

impl StepSequence {
    /// Returns the steps in sweep order, most past first.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the bracket formed around each remeshing marker.
    #[must_use]
    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the sequence holds no steps, which never happens for a
    /// sequence built by [`sequence`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the most past step.
    #[must_use]
    pub fn first(&self) -> Step {
        self.steps[0]
    }

    /// Returns the most future step, which seeds the sweep.
    #[must_use]
    pub fn last(&self) -> Step {
        self.steps[self.steps.len() - 1]
    }
}

/// Builds the canonical step sequence from raw discovered steps.
///
/// See the [module docs](self) for the ordering rules.
///
/// # Errors
///
/// Returns [`EmptyRangeError`] if `raw` yields no steps.
pub fn sequence<I>(raw: I) -> Result<StepSequence, EmptyRangeError>
where
    I: IntoIterator<Item = Step>,
{
    let discovered: BTreeSet<Step> = raw.into_iter().collect();
    if discovered.is_empty() {
        return Err(EmptyRangeError);
    }

    let (markers, regular): (BTreeSet<Step>, BTreeSet<Step>) =
        discovered.iter().partition(|step| step.is_remesh());

    let brackets: Vec<Bracket> = markers
        .iter()
        .map(|&marker| Bracket::around(marker, &regular))
        .collect();

    let mut pool: Vec<Step> = brackets
        .iter()
        .flat_map(Bracket::steps)
        .chain(discovered.iter().copied())
        .collect();

    // A marker takes precedence over its unsigned duplicate.
    let remeshed: HashSet<u64> = markers.iter().map(|step| step.magnitude()).collect();
    pool.retain(|step| step.is_remesh() || !remeshed.contains(&step.magnitude()));

    // Only one signed value per magnitude survives, so a stable sort places
    // duplicates next to each other.
    pool.sort_by_key(|step| step.magnitude());
    pool.dedup();

    Ok(StepSequence {
        steps: pool,
        brackets,
    })
}
