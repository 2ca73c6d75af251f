use thiserror::Error;

use crate::propagators::Algorithm;

/// A malformed problem definition. These are reported when the offending variable or propagator
/// is added to the [`crate::Problem`], never during solving.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemBuildError {
    #[error("variable index {index} is out of range, the problem has {num_variables} variables")]
    VariableOutOfRange { index: usize, num_variables: usize },
    #[error("shared domain index {index} is out of range, the problem has {num_domains} shared domains")]
    DomainOutOfRange { index: usize, num_domains: usize },
    #[error("{algorithm} expects {expected} parameters but {actual} were provided")]
    ParameterCount {
        algorithm: Algorithm,
        expected: usize,
        actual: usize,
    },
    #[error("{algorithm} cannot be posted over {actual} variables: {reason}")]
    VariableCount {
        algorithm: Algorithm,
        actual: usize,
        reason: &'static str,
    },
    #[error("invalid parameters for {algorithm}: {reason}")]
    InvalidParameter {
        algorithm: Algorithm,
        reason: &'static str,
    },
    #[error("the initial domain [{min}, {max}] cannot be restricted to an empty interval")]
    EmptyRestriction { min: i32, max: i32 },
    #[error("the shared domain [{min}, {max}] shifted by {offset} does not fit in an i32")]
    OffsetOutOfRange { min: i32, max: i32, offset: i32 },
}
