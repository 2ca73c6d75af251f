use gourd_core::Algorithm;
use gourd_core::Problem;
use gourd_core::Solution;
use gourd_core::VariableId;

use super::to_bound;
use super::ModelError;

/// Place `n` queens on an `n x n` board such that no two queens attack each other.
///
/// Queen `i` is placed in row `i`; its variable is the column. The columns and both diagonal
/// directions are kept distinct by three [`Algorithm::AllDifferent`] propagators, the diagonals
/// through variables which alias the columns with offset `i` and `-i`.
#[derive(Clone, Debug)]
pub struct NQueens {
    pub problem: Problem,
    pub queens: Vec<VariableId>,
}

impl NQueens {
    pub fn new(n: u32) -> Result<NQueens, ModelError> {
        let n = to_bound("n-queens", n)?;
        let mut problem = Problem::default();

        let queens = problem.add_variables((0..n).map(|_| 0..=n - 1));
        let mut ascending = Vec::with_capacity(queens.len());
        let mut descending = Vec::with_capacity(queens.len());
        for (row, &queen) in (0..n).zip(&queens) {
            let domain = problem.domain_of(queen);
            ascending.push(problem.add_offset_variable(domain, row)?);
            descending.push(problem.add_offset_variable(domain, -row)?);
        }

        if n > 0 {
            let _ = problem.add_propagator(&queens, Algorithm::AllDifferent, &[])?;
            let _ = problem.add_propagator(&ascending, Algorithm::AllDifferent, &[])?;
            let _ = problem.add_propagator(&descending, Algorithm::AllDifferent, &[])?;
        }

        Ok(NQueens { problem, queens })
    }

    /// The column of the queen in every row.
    pub fn columns(&self, solution: &Solution) -> Vec<i32> {
        self.queens
            .iter()
            .map(|&queen| solution.value(queen))
            .collect()
    }

    /// Draws the board of a solution, one line per row.
    pub fn render(&self, solution: &Solution) -> String {
        let n = self.queens.len();
        let row_separator = format!("{}+", "+---".repeat(n));

        let mut board = String::new();
        for column in self.columns(solution) {
            board.push_str(&row_separator);
            board.push('\n');
            for col in 0..n {
                board.push_str(if column as usize == col {
                    "| * "
                } else {
                    "|   "
                });
            }
            board.push_str("|\n");
        }
        board.push_str(&row_separator);
        board
    }
}

#[cfg(test)]
mod tests {
    use gourd_core::Solver;

    use super::*;

    #[test]
    fn solutions_are_non_attacking() {
        let queens = NQueens::new(6).unwrap();
        let mut solver = Solver::new(queens.problem.clone());

        for solution in solver.solve() {
            let columns = queens.columns(&solution.unwrap());
            for i in 0..columns.len() {
                for j in i + 1..columns.len() {
                    assert_ne!(columns[i], columns[j]);
                    assert_ne!((columns[i] - columns[j]).abs(), (j - i) as i32);
                }
            }
        }
    }

    #[test]
    fn board_is_rendered_per_row() {
        let queens = NQueens::new(4).unwrap();
        let solution = Solver::new(queens.problem.clone())
            .solve_one()
            .unwrap()
            .unwrap();

        let board = queens.render(&solution);

        assert_eq!(board.lines().count(), 9);
        assert_eq!(board.matches('*').count(), 4);
    }
}
