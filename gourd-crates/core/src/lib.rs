//! # Gourd
//! Gourd is a bound-consistency constraint solver over integer intervals.
//!
//! A [`Problem`] is a set of shared integer domains, variables which are offset views of those
//! domains, and propagators over the variables. A [`Solver`] explores the search tree of a
//! problem depth first: at every node the propagators are run to a fixpoint, after which a
//! [`branching::Brancher`] splits a domain which is not yet fixed.
//!
//! # Formulating a problem
//! ```
//! # use gourd_core::Algorithm;
//! # use gourd_core::Problem;
//! # use gourd_core::Solver;
//! // x, y, z in [0, 5]
//! let mut problem = Problem::new([0..=5, 0..=5, 0..=5]);
//! let x = problem.variable(0);
//! let y = problem.variable(1);
//! let z = problem.variable(2);
//!
//! // x + y + z = 12 and x, y, z distinct
//! let _ = problem
//!     .add_propagator(&[x, y, z], Algorithm::AffineEq, &[1, 1, 1, 12])
//!     .unwrap();
//! let _ = problem
//!     .add_propagator(&[x, y, z], Algorithm::AllDifferent, &[])
//!     .unwrap();
//!
//! let mut solver = Solver::new(problem);
//! let solution = solver.solve_one().unwrap().unwrap();
//! assert_eq!(solution.values(), &[3, 4, 5]);
//! ```
//!
//! # Optimisation
//! [`Solver::minimize`] and [`Solver::maximize`] return the best solution for an objective
//! variable; the [`optimisation::OptimisationMode`] determines whether the search restarts after
//! every improving solution or continues in the pruned search tree.
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod math;
pub(crate) mod propagators;

#[doc(hidden)]
pub mod gourd_asserts;

pub mod branching;
pub mod optimisation;
pub mod options;
pub mod results;
pub mod statistics;

pub use convert_case;
pub use rand;

pub use crate::basic_types::Interval;
pub use crate::basic_types::ProblemBuildError;
pub use crate::basic_types::PropagationStatus;
pub use crate::basic_types::Solution;
pub use crate::basic_types::SolverError;
pub use crate::engine::Bound;
pub use crate::engine::DomainId;
pub use crate::engine::Problem;
pub use crate::engine::PropagatorId;
pub use crate::engine::Solver;
pub use crate::engine::SolverState;
pub use crate::engine::SolverStatistics;
pub use crate::engine::StatisticKind;
pub use crate::engine::VariableId;
pub use crate::propagators::Algorithm;
