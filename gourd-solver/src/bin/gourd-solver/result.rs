use gourd_solver::core::SolverError;
use gourd_solver::parallel::ParallelError;
use gourd_solver::problems::ModelError;
use thiserror::Error;

pub(crate) type GourdResult<T> = Result<T, GourdError>;

#[derive(Error, Debug)]
pub(crate) enum GourdError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The model could not be built, more details: {0}")]
    Model(#[from] ModelError),
    #[error("The search failed, more details: {0}")]
    Solver(#[from] SolverError),
    #[error("The parallel search failed, more details: {0}")]
    Parallel(#[from] ParallelError),
}
