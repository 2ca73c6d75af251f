use std::ops::Range;

use enum_map::EnumMap;
use enumset::EnumSet;
use itertools::Itertools;

use super::variables::Bound;
use super::variables::DomainId;
use super::variables::PropagatorId;
use super::variables::VariableView;
use crate::containers::KeyedVec;
use crate::propagators::Algorithm;
use crate::propagators::ComputeFn;

/// The propagators of a problem, stored as a struct of arrays.
///
/// Every propagator owns one contiguous slice of the shared `domains`, `offsets` and `triggers`
/// arrays (one entry per variable position) and one of the `parameters` array. Slices are fixed
/// when the propagator is added and are never resized.
#[derive(Clone, Debug, Default)]
pub(crate) struct PropagatorTable {
    algorithms: KeyedVec<PropagatorId, Algorithm>,
    compute: KeyedVec<PropagatorId, ComputeFn>,
    variable_slices: KeyedVec<PropagatorId, Range<usize>>,
    parameter_slices: KeyedVec<PropagatorId, Range<usize>>,
    /// Whether a shared domain occurs at more than one position of the propagator.
    self_aliasing: KeyedVec<PropagatorId, bool>,

    domains: Vec<DomainId>,
    offsets: Vec<i32>,
    triggers: Vec<EnumSet<Bound>>,
    parameters: Vec<i32>,

    /// For every bound of every shared domain, the propagators to trigger when it changes.
    subscriptions: KeyedVec<DomainId, EnumMap<Bound, Vec<PropagatorId>>>,
}

impl PropagatorTable {
    pub(crate) fn num_propagators(&self) -> usize {
        self.algorithms.len()
    }

    /// Makes room for the subscriptions of a newly created shared domain.
    pub(crate) fn grow_domains(&mut self, num_domains: usize) {
        self.subscriptions.resize(num_domains, EnumMap::default());
    }

    /// Stores a propagator whose variables and parameters have already been validated, and
    /// subscribes it to the bounds in its trigger masks.
    pub(crate) fn add(
        &mut self,
        algorithm: Algorithm,
        views: &[VariableView],
        parameters: &[i32],
    ) -> PropagatorId {
        let triggers = algorithm.triggers(views.len(), parameters);

        let variable_start = self.domains.len();
        self.domains.extend(views.iter().map(|view| view.domain));
        self.offsets.extend(views.iter().map(|view| view.offset));
        self.triggers.extend_from_slice(&triggers);

        let parameter_start = self.parameters.len();
        self.parameters.extend_from_slice(parameters);

        let propagator_id = self.algorithms.push(algorithm);
        let _ = self.compute.push(algorithm.compute_fn());
        let _ = self
            .variable_slices
            .push(variable_start..self.domains.len());
        let _ = self
            .parameter_slices
            .push(parameter_start..self.parameters.len());
        let _ = self
            .self_aliasing
            .push(!views.iter().map(|view| view.domain).all_unique());

        for (view, trigger) in views.iter().zip(triggers) {
            for bound in trigger {
                let subscribers = &mut self.subscriptions[view.domain][bound];
                // Positions of one propagator are added consecutively, so checking the last
                // subscriber suffices to keep the lists free of duplicates.
                if subscribers.last() != Some(&propagator_id) {
                    subscribers.push(propagator_id);
                }
            }
        }

        propagator_id
    }

    pub(crate) fn algorithm(&self, propagator_id: PropagatorId) -> Algorithm {
        self.algorithms[propagator_id]
    }

    pub(crate) fn compute_fn(&self, propagator_id: PropagatorId) -> ComputeFn {
        self.compute[propagator_id]
    }

    /// A self-aliasing propagator has to be run again after changing one of its own domains,
    /// since the change is visible at the other positions of that domain.
    pub(crate) fn is_self_aliasing(&self, propagator_id: PropagatorId) -> bool {
        self.self_aliasing[propagator_id]
    }

    pub(crate) fn domains(&self, propagator_id: PropagatorId) -> &[DomainId] {
        &self.domains[self.variable_slices[propagator_id].clone()]
    }

    pub(crate) fn offsets(&self, propagator_id: PropagatorId) -> &[i32] {
        &self.offsets[self.variable_slices[propagator_id].clone()]
    }

    pub(crate) fn triggers(&self, propagator_id: PropagatorId) -> &[EnumSet<Bound>] {
        &self.triggers[self.variable_slices[propagator_id].clone()]
    }

    pub(crate) fn parameters(&self, propagator_id: PropagatorId) -> &[i32] {
        &self.parameters[self.parameter_slices[propagator_id].clone()]
    }

    pub(crate) fn subscribers(&self, domain: DomainId, bound: Bound) -> &[PropagatorId] {
        &self.subscriptions[domain][bound]
    }

    pub(crate) fn propagator_ids(&self) -> impl Iterator<Item = PropagatorId> {
        self.algorithms.keys()
    }
}
