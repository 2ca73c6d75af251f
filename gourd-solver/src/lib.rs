//! # Gourd solver
//! Ready-made models on top of [`gourd_core`] together with an orchestrator which solves one
//! problem with several independent solvers in parallel.
//!
//! ```
//! # use gourd_solver::core::Solver;
//! # use gourd_solver::problems::NQueens;
//! let queens = NQueens::new(6).unwrap();
//! let mut solver = Solver::new(queens.problem);
//! assert_eq!(solver.solve_all().unwrap(), 4);
//! ```
pub mod parallel;
pub mod problems;

pub use gourd_core as core;
