mod build_error;
mod interval;
mod propagation_status;
mod solution;
mod solver_error;

pub use build_error::ProblemBuildError;
pub use interval::Interval;
pub use propagation_status::PropagationStatus;
pub(crate) use propagation_status::EmptyDomain;
pub(crate) use propagation_status::FixpointStatus;
pub use solution::Solution;
pub use solver_error::SolverError;
