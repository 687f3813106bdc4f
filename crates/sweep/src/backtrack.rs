//! Backward strain sweep across a step sequence.
//!
//! The sweep walks a [`StepSequence`] from its most future step to its most
//! past one, threading a single *carry* snapshot:
//!
//! ```text
//! carry_0     = load(last)
//! carry_{n+1} = advance(Transition::between(step_n, step_{n+1}), &carry_n, load(step_{n+1}))
//! ```
//!
//! Each carry is persisted as soon as it is produced, so snapshots are written
//! in future-to-past order. The final carry is the first mesh enriched with
//! strain inherited from every later step.
//!
//! # Example
//!
//! ```
//! use remesh_core::{Element, MemoryStore, PointCloud, Step};
//! use remesh_sweep::{backtrack, sequence::sequence};
//!
//! let mut store = MemoryStore::new();
//! store.insert(Step::new(1), PointCloud::new(vec![Element::new(1, [0.0; 3])]));
//! store.insert(
//!     Step::new(2),
//!     PointCloud::new(vec![Element::new(1, [0.1; 3]).with_strain(Some(0.4))]),
//! );
//!
//! let steps = sequence(store.steps().collect::<Vec<_>>()).unwrap();
//! let solution = backtrack::solve_unobserved(&mut store, &steps).unwrap();
//!
//! assert_eq!(solution.carry.strains(), vec![Some(0.4)]);
//! ```

mod action;
mod error;
mod event;
mod solution;
mod transition;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};
pub use transition::{Transition, TransitionError, advance};

use remesh_core::{Observer, SnapshotStore};

use crate::sequence::StepSequence;

/// Runs the backward sweep over `sequence`, persisting every carry to `store`.
///
/// # Algorithm
///
/// 1. Load the last step unmodified; it becomes the first carry.
/// 2. Persist it and emit [`Event::Seeded`].
/// 3. For each earlier step, most future first:
///    - Load the step's raw snapshot (`tminus`).
///    - Classify the bridge from the carried step with [`Transition::between`].
///    - [`advance`] the carry onto `tminus`.
///    - Persist the result and emit [`Event::Transferred`].
///    - The result becomes the carry.
/// 4. Return the final carry.
///
/// # Observer
///
/// The observer receives an [`Event`] after each persisted snapshot and may
/// return [`Action::StopEarly`] to end the sweep. The solution then reports
/// [`Status::StoppedByObserver`] and carries the last persisted snapshot.
///
/// # Errors
///
/// Returns an error naming the failing step if a snapshot cannot be loaded or
/// persisted, or if a transition fails. Snapshots persisted before the error
/// are not rolled back.
pub fn solve<S, Obs>(
    store: &mut S,
    sequence: &StepSequence,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    S: SnapshotStore,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let seed = sequence.last();
    let mut visited = Vec::with_capacity(sequence.len());

    let mut carry = store.load(seed).map_err(|e| Error::load(seed, e))?;
    let mut tplus = seed;
    store.save(seed, &carry).map_err(|e| Error::save(seed, e))?;
    visited.push(seed);

    let event = Event::Seeded {
        step: seed,
        cloud: &carry,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            step: tplus,
            carry,
            visited,
        });
    }

    for &tminus in sequence.steps().iter().rev().skip(1) {
        let raw = store.load(tminus).map_err(|e| Error::load(tminus, e))?;
        let transition = Transition::between(tplus, tminus);

        let next = advance(transition, &carry, raw).map_err(|source| Error::Transfer {
            step: tminus,
            from: tplus,
            transition,
            source,
        })?;
        store.save(tminus, &next).map_err(|e| Error::save(tminus, e))?;
        visited.push(tminus);

        let event = Event::Transferred {
            from: tplus,
            step: tminus,
            transition,
            cloud: &next,
        };
        let action = observer.observe(&event);

        carry = next;
        tplus = tminus;

        if let Some(Action::StopEarly) = action {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                step: tplus,
                carry,
                visited,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        step: tplus,
        carry,
        visited,
    })
}

/// Runs the backward sweep without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error if any step fails to load, transfer, or persist.
pub fn solve_unobserved<S>(store: &mut S, sequence: &StepSequence) -> Result<Solution, Error>
where
    S: SnapshotStore,
{
    solve(store, sequence, ())
}
