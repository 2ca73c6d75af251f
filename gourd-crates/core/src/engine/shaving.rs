//! Shaving: a stronger consistency than the fixpoint alone, obtained by trying out the bounds of
//! every shared domain.
//!
//! For every unfixed shared domain, first its lower and then its upper bound is committed to as
//! a trial and propagated. A bound whose trial fails cannot be part of any solution and is
//! removed, after which the next value at that bound is tried. Passes over all domains are
//! repeated until a pass removes nothing.

use log::trace;

use super::fixpoint::FixpointEngine;
use super::problem::Problem;
use super::solver_statistics::SolverStatistics;
use super::solver_statistics::StatisticKind;
use super::variables::Bound;
use super::variables::DomainId;
use crate::basic_types::EmptyDomain;
use crate::basic_types::FixpointStatus;
use crate::basic_types::Interval;

#[derive(Clone, Debug, Default)]
pub(crate) struct ShavingEngine {
    domains: Vec<Interval>,
    entailed: Vec<bool>,
}

impl ShavingEngine {
    /// Shaves the shared domains, which are expected to be at a fixpoint.
    ///
    /// Fails if removing a value leads to an inconsistency, in which case the domains have to be
    /// restored by the caller. On success the domains are at a fixpoint again.
    pub(crate) fn shave(
        &mut self,
        problem: &mut Problem,
        fixpoint: &mut FixpointEngine,
        statistics: &mut SolverStatistics,
    ) -> FixpointStatus {
        loop {
            let mut shaved_any = false;

            for index in 0..problem.num_domains() {
                let domain = DomainId::new(index as u32);
                for bound in [Bound::Min, Bound::Max] {
                    shaved_any |= self.shave_bound(problem, fixpoint, statistics, domain, bound)?;
                }
            }

            if !shaved_any {
                return Ok(());
            }
        }
    }

    /// Removes values at `bound` of `domain` until one survives its trial. Returns whether any
    /// value was removed.
    fn shave_bound(
        &mut self,
        problem: &mut Problem,
        fixpoint: &mut FixpointEngine,
        statistics: &mut SolverStatistics,
        domain: DomainId,
        bound: Bound,
    ) -> Result<bool, EmptyDomain> {
        let mut shaved = false;

        loop {
            let interval = problem.domain(domain);
            if interval.is_fixed() {
                return Ok(shaved);
            }
            let value = interval.get(bound);

            statistics.increment(StatisticKind::ShavingTrials);
            if self.trial(problem, fixpoint, statistics, domain, bound, value) {
                return Ok(shaved);
            }

            trace!("shaving {value} from {domain}");
            statistics.increment(StatisticKind::ShavedValues);
            shaved = true;

            let excluded = match bound {
                Bound::Min => value + 1,
                Bound::Max => value - 1,
            };
            let _ = problem.domains.tighten(domain, bound, excluded);
            fixpoint.trigger_subscribers(problem, domain, bound);
            fixpoint.propagate(problem, statistics)?;
        }
    }

    /// Propagates `domain = value` and undoes all of its effects. Returns whether the
    /// propagation succeeded.
    fn trial(
        &mut self,
        problem: &mut Problem,
        fixpoint: &mut FixpointEngine,
        statistics: &mut SolverStatistics,
        domain: DomainId,
        bound: Bound,
        value: i32,
    ) -> bool {
        self.domains.clear();
        self.domains.extend_from_slice(problem.domains.domains());
        self.entailed.clear();
        self.entailed.extend_from_slice(fixpoint.entailed());

        let opposite = bound.opposite();
        let _ = problem.domains.tighten(domain, opposite, value);
        fixpoint.trigger_subscribers(problem, domain, opposite);
        let consistent = fixpoint.propagate(problem, statistics).is_ok();

        problem.domains.restore(&self.domains);
        fixpoint.restore_entailed(&self.entailed);

        consistent
    }
}
