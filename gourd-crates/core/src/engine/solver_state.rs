use crate::gourd_assert_simple;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum SolverStateInternal {
    #[default]
    Ready,
    Filtering,
    Solved,
    Backtrack,
    Exhausted,
}

/// The state of the search of a [`crate::Solver`].
///
/// A fresh (or reset) solver is ready. Filtering propagates the current node and either finds a
/// solution, takes a decision (and keeps filtering) or fails, after which the solver backtracks.
/// Once no choice point is left to backtrack to, the search is exhausted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverState {
    internal_state: SolverStateInternal,
}

impl SolverState {
    pub fn is_ready(&self) -> bool {
        matches!(self.internal_state, SolverStateInternal::Ready)
    }

    pub fn is_filtering(&self) -> bool {
        matches!(self.internal_state, SolverStateInternal::Filtering)
    }

    pub fn has_solution(&self) -> bool {
        matches!(self.internal_state, SolverStateInternal::Solved)
    }

    pub fn is_backtracking(&self) -> bool {
        matches!(self.internal_state, SolverStateInternal::Backtrack)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.internal_state, SolverStateInternal::Exhausted)
    }

    pub(crate) fn declare_ready(&mut self) {
        self.internal_state = SolverStateInternal::Ready;
    }

    pub(crate) fn declare_filtering(&mut self) {
        gourd_assert_simple!(!self.is_exhausted());
        self.internal_state = SolverStateInternal::Filtering;
    }

    pub(crate) fn declare_solution_found(&mut self) {
        gourd_assert_simple!(self.is_filtering());
        self.internal_state = SolverStateInternal::Solved;
    }

    pub(crate) fn declare_backtrack(&mut self) {
        self.internal_state = SolverStateInternal::Backtrack;
    }

    pub(crate) fn declare_exhausted(&mut self) {
        self.internal_state = SolverStateInternal::Exhausted;
    }
}
