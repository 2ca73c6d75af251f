use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::containers::StorageKey;
use crate::engine::PropagatorId;
use crate::gourd_assert_moderate;

/// The propagators which are waiting to be run.
///
/// Propagators are popped in ascending order of their id, which keeps the search (and therefore
/// the order of solutions and the statistics) reproducible. A propagator is present at most once.
#[derive(Debug, Clone, Default)]
pub(crate) struct TriggeredSet {
    heap: BinaryHeap<Reverse<PropagatorId>>,
    is_triggered: Vec<bool>,
}

impl TriggeredSet {
    pub(crate) fn with_num_propagators(num_propagators: usize) -> TriggeredSet {
        TriggeredSet {
            heap: BinaryHeap::with_capacity(num_propagators),
            is_triggered: vec![false; num_propagators],
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, propagator_id: PropagatorId) -> bool {
        self.is_triggered
            .get(propagator_id.index())
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn insert(&mut self, propagator_id: PropagatorId) {
        if propagator_id.index() >= self.is_triggered.len() {
            self.is_triggered.resize(propagator_id.index() + 1, false);
        }

        if !self.is_triggered[propagator_id.index()] {
            self.is_triggered[propagator_id.index()] = true;
            self.heap.push(Reverse(propagator_id));
        }
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let Reverse(propagator_id) = self.heap.pop()?;
        gourd_assert_moderate!(self.is_triggered[propagator_id.index()]);
        self.is_triggered[propagator_id.index()] = false;

        Some(propagator_id)
    }

    pub(crate) fn clear(&mut self) {
        while let Some(Reverse(propagator_id)) = self.heap.pop() {
            self.is_triggered[propagator_id.index()] = false;
        }
    }
}
