//! The search engine: the shared domain store, the propagator table, the fixpoint computation,
//! shaving and the backtracking solver built on top of them.

mod choice_point;
mod domain_store;
mod fixpoint;
mod problem;
mod propagator_table;
mod shaving;
mod solver;
mod solver_state;
mod solver_statistics;
mod variables;

pub use problem::Problem;
pub use solver::Solver;
pub use solver_state::SolverState;
pub use solver_statistics::SolverStatistics;
pub use solver_statistics::StatisticKind;
pub use variables::Bound;
pub use variables::DomainId;
pub use variables::PropagatorId;
pub use variables::VariableId;
