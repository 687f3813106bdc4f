use log::{debug, info};
use remesh_core::Observer;
use remesh_sweep::backtrack::{Action, Event};

/// Logs one line per persisted step at `info` level.
///
/// Spatial transitions also log how many elements carry strain at `debug`.
/// The observer never stops the sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver {
    count: usize,
}

impl LogObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many events have been logged.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Observer<Event<'_>, Action> for LogObserver {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        self.count += 1;

        match event {
            Event::Seeded { step, cloud } => {
                info!("Seeding strain from step {step} ({} elements)", cloud.len());
            }
            Event::Transferred {
                from,
                step,
                transition,
                cloud,
            } => {
                info!("Back tracking strain through step {step} ({transition} from {from})");
                if transition.is_spatial() {
                    let carried = cloud.iter().filter(|e| e.strain.is_some()).count();
                    debug!("{carried} of {} elements carry strain", cloud.len());
                }
            }
        }

        None
    }
}
