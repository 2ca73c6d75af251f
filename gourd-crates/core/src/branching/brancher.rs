use crate::basic_types::Solution;
use crate::branching::Decision;
use crate::branching::SelectionContext;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
use crate::statistics::StatisticLogger;

/// A branching strategy, usually combining a [`VariableSelector`] and a [`ValueSelector`].
///
/// Every decision has to split the domain it concerns into two non-empty parts (see
/// [`Decision`]); if the brancher does not do so, the behaviour of the solver is undefined.
pub trait Brancher {
    /// Returns the next decision, or [`None`] if every shared domain the brancher considers is
    /// fixed.
    ///
    /// The decision is only a suggestion which is applied by the solver; the
    /// [`SelectionContext`] is mutable only to give access to the random generator.
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision>;

    /// Called whenever the solver backtracks to a choice point.
    fn on_backtrack(&mut self) {}

    /// Called whenever the solver finds a solution.
    fn on_solution(&mut self, _solution: &Solution) {}

    /// Logs statistics of the brancher using the provided [`StatisticLogger`].
    fn log_statistics(&self, _statistic_logger: &StatisticLogger) {}
}

impl<B: Brancher + ?Sized> Brancher for Box<B> {
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Decision> {
        (**self).next_decision(context)
    }

    fn on_backtrack(&mut self) {
        (**self).on_backtrack()
    }

    fn on_solution(&mut self, solution: &Solution) {
        (**self).on_solution(solution)
    }

    fn log_statistics(&self, statistic_logger: &StatisticLogger) {
        (**self).log_statistics(statistic_logger)
    }
}
