use log::trace;

use super::problem::Problem;
use super::solver_statistics::SolverStatistics;
use super::solver_statistics::StatisticKind;
use super::variables::Bound;
use super::variables::DomainId;
use super::variables::PropagatorId;
use crate::basic_types::EmptyDomain;
use crate::basic_types::FixpointStatus;
use crate::basic_types::Interval;
use crate::basic_types::PropagationStatus;
use crate::containers::KeyedVec;
use crate::containers::TriggeredSet;
use crate::gourd_assert_moderate;
use crate::gourd_assert_simple;

/// Runs triggered propagators until none is left, i.e. until the shared domains are at a
/// bound-consistency fixpoint of all non-entailed propagators.
#[derive(Clone, Debug)]
pub(crate) struct FixpointEngine {
    triggered: TriggeredSet,
    /// Propagators which can no longer prune; cleared again by backtracking.
    entailed: KeyedVec<PropagatorId, bool>,
    /// The bounds of the variables of the propagator being run, with offsets applied.
    view: Vec<Interval>,
    /// A copy of `view` before running the propagator.
    previous: Vec<Interval>,
}

impl FixpointEngine {
    pub(crate) fn new(num_propagators: usize) -> FixpointEngine {
        FixpointEngine {
            triggered: TriggeredSet::with_num_propagators(num_propagators),
            entailed: (0..num_propagators).map(|_| false).collect(),
            view: Vec::new(),
            previous: Vec::new(),
        }
    }

    pub(crate) fn entailed(&self) -> &[bool] {
        self.entailed.as_slice()
    }

    pub(crate) fn restore_entailed(&mut self, entailed: &[bool]) {
        self.entailed.copy_from_slice(entailed);
    }

    pub(crate) fn clear(&mut self) {
        self.triggered.clear();
        self.entailed.iter_mut().for_each(|flag| *flag = false);
    }

    /// Triggers every propagator which is not entailed.
    pub(crate) fn trigger_all(&mut self, problem: &Problem) {
        for propagator_id in problem.propagators.propagator_ids() {
            if !self.entailed[propagator_id] {
                self.triggered.insert(propagator_id);
            }
        }
    }

    /// Triggers the propagators subscribed to a changed bound of a shared domain.
    pub(crate) fn trigger_subscribers(&mut self, problem: &Problem, domain: DomainId, bound: Bound) {
        for &subscriber in problem.propagators.subscribers(domain, bound) {
            if !self.entailed[subscriber] {
                self.triggered.insert(subscriber);
            }
        }
    }

    /// Propagates until no propagator is triggered.
    ///
    /// On failure the triggered set is cleared; the shared domains are left as they were when
    /// the failure was detected and have to be restored by the caller.
    pub(crate) fn propagate(
        &mut self,
        problem: &mut Problem,
        statistics: &mut SolverStatistics,
    ) -> FixpointStatus {
        statistics.increment(StatisticKind::Filters);

        while let Some(propagator_id) = self.triggered.pop() {
            if self.entailed[propagator_id] {
                continue;
            }

            if let Err(empty_domain) = self.run(problem, statistics, propagator_id) {
                statistics.increment(StatisticKind::Inconsistencies);
                self.triggered.clear();
                return Err(empty_domain);
            }
        }

        gourd_assert_simple!(self.triggered.is_empty());
        Ok(())
    }

    fn run(
        &mut self,
        problem: &mut Problem,
        statistics: &mut SolverStatistics,
        propagator_id: PropagatorId,
    ) -> FixpointStatus {
        statistics.increment(StatisticKind::PropagatorCalls);

        let Problem {
            domains,
            propagators,
        } = problem;
        let variable_domains = propagators.domains(propagator_id);
        let offsets = propagators.offsets(propagator_id);

        self.view.clear();
        self.view.extend(
            variable_domains
                .iter()
                .zip(offsets)
                .map(|(&domain, &offset)| domains.domain(domain).shifted(offset)),
        );
        self.previous.clone_from(&self.view);

        let compute = propagators.compute_fn(propagator_id);
        match compute(&mut self.view, propagators.parameters(propagator_id)) {
            PropagationStatus::Inconsistent => {
                trace!(
                    "{} ({propagator_id:?}) is inconsistent",
                    propagators.algorithm(propagator_id)
                );
                return Err(EmptyDomain);
            }
            PropagationStatus::Entailed => {
                statistics.increment(StatisticKind::Entailments);
                self.entailed[propagator_id] = true;
            }
            PropagationStatus::Consistent => {}
        }

        let self_aliasing = propagators.is_self_aliasing(propagator_id);
        let mut changed_any = false;
        for position in 0..self.view.len() {
            let narrowed = self.view[position];
            gourd_assert_moderate!(
                narrowed.is_empty() || narrowed.is_within(&self.previous[position]),
                "{} widened {} to {narrowed}",
                propagators.algorithm(propagator_id),
                self.previous[position]
            );
            if narrowed == self.previous[position] {
                continue;
            }
            if narrowed.is_empty() {
                return Err(EmptyDomain);
            }

            let domain = variable_domains[position];
            let (min_changed, max_changed) =
                domains.tighten_to(domain, narrowed.shifted(-offsets[position]));
            if domains.is_empty(domain) {
                return Err(EmptyDomain);
            }

            for (changed, bound) in [(min_changed, Bound::Min), (max_changed, Bound::Max)] {
                if changed {
                    changed_any = true;
                    for &subscriber in propagators.subscribers(domain, bound) {
                        if (subscriber != propagator_id || self_aliasing)
                            && !self.entailed[subscriber]
                        {
                            self.triggered.insert(subscriber);
                        }
                    }
                }
            }
        }

        if !changed_any {
            statistics.increment(StatisticKind::NoOpCalls);
        }

        Ok(())
    }
}
