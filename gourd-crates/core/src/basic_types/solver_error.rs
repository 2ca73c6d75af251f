use thiserror::Error;

/// Errors which can occur while searching. Running out of solutions is not an error; it is
/// signalled by the absence of a solution.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverError {
    #[error("the search exceeded the choice point capacity of {capacity} levels")]
    ChoicePointOverflow { capacity: usize },
}
