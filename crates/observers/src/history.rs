use remesh_core::{Observer, Step};
use remesh_sweep::backtrack::{Action, Event, Transition};

/// A summary of one sweep event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// The step that was persisted.
    pub step: Step,

    /// The step the strain came from, or `None` for the seed.
    pub from: Option<Step>,

    /// The transition used, or `None` for the seed.
    pub transition: Option<Transition>,

    /// Number of elements in the persisted snapshot.
    pub elements: usize,

    /// Number of elements that carry a strain value.
    pub with_strain: usize,

    /// Largest strain in the persisted snapshot, if any element has one.
    pub max_strain: Option<f64>,
}

impl Record {
    fn from_event(event: &Event<'_>) -> Self {
        let from = match event {
            Event::Seeded { .. } => None,
            Event::Transferred { from, .. } => Some(*from),
        };
        let cloud = event.cloud();
        let strains = cloud.iter().filter_map(|e| e.strain);

        Self {
            step: event.step(),
            from,
            transition: event.transition(),
            elements: cloud.len(),
            with_strain: strains.clone().count(),
            max_strain: strains.reduce(f64::max),
        }
    }
}

/// Records a [`Record`] for every sweep event, in order.
///
/// Pass `&mut history` to the sweep to keep the recording afterward.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<Record>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the steps in the order they were persisted.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.records.iter().map(|r| r.step)
    }

    /// Returns the records produced by spatial matching.
    pub fn spatial(&self) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(|r| r.transition.is_some_and(Transition::is_spatial))
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl Observer<Event<'_>, Action> for History {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        self.records.push(Record::from_event(event));
        None
    }
}

impl Observer<Event<'_>, Action> for &mut History {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        (**self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use remesh_core::{Element, MemoryStore, PointCloud};
    use remesh_sweep::{backtrack, sequence::sequence};

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert(
            Step::new(1),
            PointCloud::new(vec![Element::new(1, [0.0; 3]), Element::new(2, [1.0; 3])]),
        );
        store.insert(
            Step::new(-2),
            PointCloud::new(vec![Element::new(7, [0.1; 3]).with_strain(Some(0.05))]),
        );
        store.insert(
            Step::new(3),
            PointCloud::new(vec![Element::new(7, [0.2; 3]).with_strain(Some(0.25))]),
        );
        store
    }

    #[test]
    fn records_every_persisted_step() {
        let mut store = store();
        let steps = sequence(store.steps().collect::<Vec<_>>()).expect("non-empty");
        let mut history = History::new();

        backtrack::solve(&mut store, &steps, &mut history).expect("sweep succeeds");

        assert_eq!(
            history.steps().collect::<Vec<_>>(),
            vec![Step::new(3), Step::new(-2), Step::new(1)]
        );

        let seed = history.records()[0];
        assert_eq!(seed.from, None);
        assert_eq!(seed.transition, None);

        let last = history.records()[2];
        assert_eq!(last.from, Some(Step::new(-2)));
        assert_eq!(last.transition, Some(Transition::RemeshEnter));
        assert_eq!(last.elements, 2);
        assert_eq!(last.with_strain, 2);
        assert_relative_eq!(last.max_strain.expect("strain present"), 0.25);
    }

    #[test]
    fn filters_spatial_records() {
        let mut store = store();
        let steps = sequence(store.steps().collect::<Vec<_>>()).expect("non-empty");
        let mut history = History::new();

        backtrack::solve(&mut store, &steps, &mut history).expect("sweep succeeds");

        let spatial: Vec<_> = history.spatial().map(|r| r.step).collect();
        assert_eq!(spatial, vec![Step::new(-2), Step::new(1)]);
    }

    #[test]
    fn seed_without_strain_has_no_maximum() {
        let cloud = PointCloud::new(vec![Element::new(1, [0.0; 3])]);
        let mut history = History::new();

        history.observe(&Event::Seeded {
            step: Step::new(1),
            cloud: &cloud,
        });

        assert_eq!(history.records()[0].max_strain, None);
        assert_eq!(history.records()[0].with_strain, 0);
    }
}
