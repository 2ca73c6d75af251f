//! Contains structures related to optimisation.

/// How the search continues after a solution has been found while optimising.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OptimisationMode {
    /// Restart the search from the initial domains, with the objective restricted to values
    /// better than the solution.
    Reset,
    /// Keep the search tree and restrict the objective in every stored choice point, such that
    /// the search continues with only better solutions left.
    #[default]
    Prune,
}

/// The direction of the optimisation, either maximising or minimising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptimisationDirection {
    Maximise,
    Minimise,
}
