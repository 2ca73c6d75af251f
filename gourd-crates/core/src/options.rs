//! Options which determine how a [`crate::Solver`] behaves.

/// The consistency which the solver establishes at every node of the search tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ConsistencyAlgorithm {
    /// The fixpoint of the propagators.
    #[default]
    Bounds,
    /// The fixpoint of the propagators, after which the bounds of every shared domain are tried
    /// out and removed when they lead to an inconsistency.
    Shaving,
}

/// Options for the [`crate::Solver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    pub consistency: ConsistencyAlgorithm,
    /// The maximum number of choice points which can be on the stack at once. Exceeding it
    /// makes the search fail with [`crate::SolverError::ChoicePointOverflow`].
    pub choice_point_capacity: usize,
    /// The seed of the random generator which is handed to the branching strategy.
    pub random_seed: u64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            consistency: ConsistencyAlgorithm::default(),
            choice_point_capacity: 10_000,
            random_seed: 42,
        }
    }
}
