use std::ops::AddAssign;

use enum_map::Enum;
use enum_map::EnumMap;

use crate::statistics::StatisticLogger;

/// The counters kept by a [`crate::Solver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enum)]
pub enum StatisticKind {
    /// Runs of the fixpoint loop.
    Filters,
    /// Calls to propagators.
    PropagatorCalls,
    /// Propagator calls which did not change any bound.
    NoOpCalls,
    /// Propagator calls and fixpoints which ended in an empty domain.
    Inconsistencies,
    /// Propagators which were found to be entailed.
    Entailments,
    /// Choice points popped from the stack.
    Backtracks,
    /// Decisions taken.
    Choices,
    /// The largest number of choice points on the stack at once.
    MaxDepth,
    /// Solutions found.
    Solutions,
    /// Values tried while shaving.
    ShavingTrials,
    /// Values removed by shaving.
    ShavedValues,
}

impl StatisticKind {
    pub const ALL: [StatisticKind; 11] = [
        StatisticKind::Filters,
        StatisticKind::PropagatorCalls,
        StatisticKind::NoOpCalls,
        StatisticKind::Inconsistencies,
        StatisticKind::Entailments,
        StatisticKind::Backtracks,
        StatisticKind::Choices,
        StatisticKind::MaxDepth,
        StatisticKind::Solutions,
        StatisticKind::ShavingTrials,
        StatisticKind::ShavedValues,
    ];

    /// The name under which the counter is logged.
    pub const fn label(self) -> &'static str {
        match self {
            StatisticKind::Filters => "filters",
            StatisticKind::PropagatorCalls => "propagator calls",
            StatisticKind::NoOpCalls => "no-op calls",
            StatisticKind::Inconsistencies => "inconsistencies",
            StatisticKind::Entailments => "entailments",
            StatisticKind::Backtracks => "backtracks",
            StatisticKind::Choices => "choices",
            StatisticKind::MaxDepth => "max depth",
            StatisticKind::Solutions => "solutions",
            StatisticKind::ShavingTrials => "shaving trials",
            StatisticKind::ShavedValues => "shaved values",
        }
    }
}

/// A fixed set of counters, indexed by [`StatisticKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverStatistics {
    counters: EnumMap<StatisticKind, u64>,
}

impl SolverStatistics {
    pub fn get(&self, kind: StatisticKind) -> u64 {
        self.counters[kind]
    }

    pub(crate) fn increment(&mut self, kind: StatisticKind) {
        self.counters[kind] += 1;
    }

    pub(crate) fn record_depth(&mut self, depth: usize) {
        let depth = depth as u64;
        if depth > self.counters[StatisticKind::MaxDepth] {
            self.counters[StatisticKind::MaxDepth] = depth;
        }
    }

    /// Combines the counters of another search into these: the depth is the maximum of both,
    /// every other counter is summed.
    pub fn merge(&mut self, other: &SolverStatistics) {
        for (kind, &value) in other.counters.iter() {
            if kind == StatisticKind::MaxDepth {
                self.counters[kind] = self.counters[kind].max(value);
            } else {
                self.counters[kind] += value;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatisticKind, u64)> + '_ {
        self.counters.iter().map(|(kind, &value)| (kind, value))
    }

    /// Logs every counter through `statistic_logger`.
    pub fn log(&self, statistic_logger: &StatisticLogger) {
        for (kind, value) in self.iter() {
            statistic_logger.log_statistic(kind.label(), value);
        }
    }
}

impl AddAssign<&SolverStatistics> for SolverStatistics {
    fn add_assign(&mut self, other: &SolverStatistics) {
        self.merge(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merging_sums_counters_and_keeps_the_deepest_depth() {
        let mut first = SolverStatistics::default();
        first.increment(StatisticKind::Backtracks);
        first.record_depth(7);

        let mut second = SolverStatistics::default();
        second.increment(StatisticKind::Backtracks);
        second.increment(StatisticKind::Solutions);
        second.record_depth(3);

        first += &second;

        assert_eq!(first.get(StatisticKind::Backtracks), 2);
        assert_eq!(first.get(StatisticKind::Solutions), 1);
        assert_eq!(first.get(StatisticKind::MaxDepth), 7);
    }

    #[test]
    fn every_kind_has_a_distinct_label() {
        let mut labels: Vec<_> = StatisticKind::ALL.iter().map(|kind| kind.label()).collect();
        labels.sort_unstable();
        labels.dedup();

        assert_eq!(labels.len(), StatisticKind::ALL.len());
    }
}
