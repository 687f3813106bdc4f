use remesh_core::{Observer, Step};

use crate::traits::{CanStopEarly, HasStep};

/// Stops the sweep right after a target step has been persisted.
///
/// Steps are visited future to past, so every step after the target in
/// simulation time is still written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopAt {
    target: Step,
}

impl StopAt {
    /// Creates an observer that stops once `target` is reached.
    #[must_use]
    pub fn new(target: Step) -> Self {
        Self { target }
    }

    #[must_use]
    pub fn target(&self) -> Step {
        self.target
    }
}

impl<E: HasStep, A: CanStopEarly> Observer<E, A> for StopAt {
    fn observe(&mut self, event: &E) -> Option<A> {
        (event.step() == self.target).then(A::stop_early)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reached(Step);

    impl HasStep for Reached {
        fn step(&self) -> Step {
            self.0
        }
    }

    #[derive(Debug, PartialEq)]
    struct Stop;

    impl CanStopEarly for Stop {
        fn stop_early() -> Self {
            Stop
        }
    }

    #[test]
    fn stops_only_at_target() {
        let mut observer = StopAt::new(Step::new(-15));

        let actions: Vec<Option<Stop>> = [30, 20, -15, 10]
            .into_iter()
            .map(|s| observer.observe(&Reached(Step::new(s))))
            .collect();

        assert_eq!(actions, vec![None, None, Some(Stop), None]);
    }
}
