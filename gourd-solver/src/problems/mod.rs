//! Builders for a few classic combinatorial problems.
//!
//! Every builder returns the [`gourd_core::Problem`] together with the variables which make up
//! the answer, so that solutions can be interpreted by the caller.

mod bibd;
mod golomb;
mod nqueens;

pub use bibd::Bibd;
pub use bibd::BibdParameters;
pub use golomb::GolombRuler;
pub use nqueens::NQueens;
use gourd_core::ProblemBuildError;
use thiserror::Error;

/// The parameters of a model do not describe a valid instance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid {model} instance: {reason}")]
    InvalidInstance {
        model: &'static str,
        reason: String,
    },
    #[error(transparent)]
    Build(#[from] ProblemBuildError),
}

impl ModelError {
    fn invalid(model: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidInstance {
            model,
            reason: reason.into(),
        }
    }
}

/// Converts a model parameter into a domain bound, rejecting values which do not fit.
fn to_bound(model: &'static str, value: u32) -> Result<i32, ModelError> {
    i32::try_from(value).map_err(|_| ModelError::invalid(model, format!("{value} is too large")))
}
