use std::collections::BTreeSet;

use remesh_core::Step;

/// The steps surrounding one remeshing marker.
///
/// `prev` is the greatest regular step below the remeshing step and `next` is
/// the smallest regular step above it. Either is `None` when discovery holds no
/// such step; a bracket never invents one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    prev: Option<Step>,
    marker: Step,
    next: Option<Step>,
}

impl Bracket {
    /// Creates a bracket from its members.
    #[must_use]
    pub fn new(prev: Option<Step>, marker: Step, next: Option<Step>) -> Self {
        Self { prev, marker, next }
    }

    /// Finds the neighbors of `marker` among the regular steps.
    pub(super) fn around(marker: Step, regular: &BTreeSet<Step>) -> Self {
        let at = i64::try_from(marker.magnitude()).unwrap_or(i64::MAX);
        let prev = regular.range(..Step::new(at)).next_back().copied();
        let next = regular
            .range(Step::new(at)..)
            .find(|step| step.get() > at)
            .copied();

        Self { prev, marker, next }
    }

    /// Returns the step before the remesh, if discovered.
    #[must_use]
    pub fn prev(&self) -> Option<Step> {
        self.prev
    }

    /// Returns the remeshing marker.
    #[must_use]
    pub fn marker(&self) -> Step {
        self.marker
    }

    /// Returns the step after the remesh, if discovered.
    #[must_use]
    pub fn next(&self) -> Option<Step> {
        self.next
    }

    /// Returns true if both neighbors were found.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.prev.is_some() && self.next.is_some()
    }

    /// Iterates over the present members, in `prev, marker, next` order.
    pub fn steps(&self) -> impl Iterator<Item = Step> {
        self.prev
            .into_iter()
            .chain(std::iter::once(self.marker))
            .chain(self.next)
    }
}
