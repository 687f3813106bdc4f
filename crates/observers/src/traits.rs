//! Capability traits for sweep observers.
//!
//! These traits abstract over the event and action types an observer reacts
//! to, so simple observers can be written once and tested without running a
//! sweep.
//!
//! # Example
//!
//! ```rust
//! use remesh_core::Observer;
//! use remesh_observers::traits::{CanStopEarly, HasStep};
//!
//! struct StopBeforeRemesh;
//!
//! impl<E: HasStep, A: CanStopEarly> Observer<E, A> for StopBeforeRemesh {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         event.step().is_remesh().then(A::stop_early)
//!     }
//! }
//! ```

use remesh_core::Step;
use remesh_sweep::backtrack;

/// An event that belongs to one simulation step.
pub trait HasStep {
    /// Returns the step this event reports on.
    fn step(&self) -> Step;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the sweep early.
    fn stop_early() -> Self;
}

impl HasStep for backtrack::Event<'_> {
    fn step(&self) -> Step {
        backtrack::Event::step(self)
    }
}

impl CanStopEarly for backtrack::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
