/// The outcome of running a propagator on the bounds of its variables.
///
/// An inconsistency is not an error: it is the expected way for a propagator to report that the
/// current bounds admit no solution, after which the solver backtracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropagationStatus {
    /// No assignment within the bounds satisfies the constraint.
    Inconsistent,
    /// The bounds were narrowed as far as the propagator is able to.
    Consistent,
    /// Every assignment within the (narrowed) bounds satisfies the constraint; the propagator
    /// does not need to run again until the solver backtracks.
    Entailed,
}

/// Marker for a shared domain which became empty during propagation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EmptyDomain;

/// The result of propagating to a fixpoint.
pub(crate) type FixpointStatus = Result<(), EmptyDomain>;
