//! Contains the structures corresponding to solution iterations.

use std::iter::FusedIterator;

use crate::basic_types::Solution;
use crate::basic_types::SolverError;
use crate::engine::Solver;

/// An iterator over the remaining solutions of a [`Solver`], created by [`Solver::solve`].
///
/// Every call to [`Iterator::next`] continues the search where the previous solution was found.
/// The iterator is fused: after the search is exhausted, or after an error has been returned
/// once, it only yields [`None`].
#[derive(Debug)]
pub struct SolutionIterator<'solver> {
    solver: &'solver mut Solver,
    finished: bool,
}

impl<'solver> SolutionIterator<'solver> {
    pub(crate) fn new(solver: &'solver mut Solver) -> Self {
        SolutionIterator {
            solver,
            finished: false,
        }
    }

    /// Gives access to the solver between two solutions, e.g. to inspect its statistics.
    pub fn solver(&self) -> &Solver {
        self.solver
    }
}

impl Iterator for SolutionIterator<'_> {
    type Item = Result<Solution, SolverError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.solver.solve_one() {
            Ok(Some(solution)) => Some(Ok(solution)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

impl FusedIterator for SolutionIterator<'_> {}

#[cfg(test)]
mod tests {
    use crate::engine::Problem;
    use crate::engine::Solver;
    use crate::options::SolverOptions;
    use crate::propagators::Algorithm;

    fn pigeons(n: i32) -> Problem {
        let mut problem = Problem::new((0..n).map(|_| 0..=n - 1));
        let variables: Vec<_> = problem.variables().collect();
        let _ = problem
            .add_propagator(&variables, Algorithm::AllDifferent, &[])
            .unwrap();
        problem
    }

    #[test]
    fn iterator_continues_from_the_current_search_state() {
        let mut solver = Solver::new(pigeons(3));
        let first = solver.solve_one().unwrap().unwrap();

        let rest: Vec<_> = solver.solve().collect::<Result<_, _>>().unwrap();

        assert_eq!(rest.len(), 5);
        assert!(!rest.contains(&first));
    }

    #[test]
    fn iterator_stops_after_an_error() {
        let options = SolverOptions {
            choice_point_capacity: 0,
            ..SolverOptions::default()
        };
        let mut solver = Solver::with_options(pigeons(3), options);
        let mut solutions = solver.solve();

        assert!(matches!(solutions.next(), Some(Err(_))));
        assert!(solutions.next().is_none());
    }
}
