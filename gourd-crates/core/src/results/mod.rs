//! Contains the structures through which the solver hands out solutions.

mod solution_iterator;

pub use solution_iterator::SolutionIterator;

pub use crate::basic_types::Solution;
