use gourd_core::Algorithm;
use gourd_core::Problem;
use gourd_core::Solution;
use gourd_core::VariableId;

use super::to_bound;
use super::ModelError;

/// A balanced incomplete block design `(v, b, r, k, λ)`: a `v x b` incidence matrix of 0/1 values
/// with `r` ones in every row, `k` ones in every column and exactly `λ` columns in which any two
/// distinct rows both have a one.
///
/// The rows and columns are ordered lexicographically (`row_o <=lex row_{o+1}`, and likewise for
/// the columns) which removes the symmetry of permuting them.
#[derive(Clone, Debug)]
pub struct Bibd {
    pub problem: Problem,
    num_blocks: usize,
    /// The incidence matrix in row-major order.
    incidence: Vec<VariableId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BibdParameters {
    /// The number of objects, the rows of the matrix.
    pub v: u32,
    /// The number of blocks, the columns of the matrix.
    pub b: u32,
    /// The number of blocks each object occurs in.
    pub r: u32,
    /// The number of objects in each block.
    pub k: u32,
    /// The number of blocks each pair of objects occurs in together.
    pub lambda: u32,
}

impl Bibd {
    pub fn new(parameters: BibdParameters) -> Result<Bibd, ModelError> {
        let BibdParameters { v, b, r, k, lambda } = parameters;
        if v == 0 || b == 0 {
            return Err(ModelError::invalid(
                "BIBD",
                "there has to be at least one object and one block",
            ));
        }
        let r = to_bound("BIBD", r)?;
        let k = to_bound("BIBD", k)?;
        let lambda = to_bound("BIBD", lambda)?;
        let (v, b) = (v as usize, b as usize);

        let mut problem = Problem::default();
        let incidence = problem.add_variables((0..v * b).map(|_| 0..=1));
        let rows: Vec<&[VariableId]> = incidence.chunks(b).collect();
        let columns: Vec<Vec<VariableId>> = (0..b)
            .map(|block| rows.iter().map(|row| row[block]).collect())
            .collect();

        for row in &rows {
            let _ = problem.add_propagator(row, Algorithm::ExactlyEq, &[1, r])?;
        }
        for column in &columns {
            let _ = problem.add_propagator(column, Algorithm::ExactlyEq, &[1, k])?;
        }

        for (first, row) in rows.iter().enumerate() {
            for other in &rows[first + 1..] {
                let mut both = Vec::with_capacity(b);
                for block in 0..b {
                    let together = problem.add_variable(0..=1);
                    let _ = problem.add_propagator(
                        &[row[block], other[block], together],
                        Algorithm::AndEq,
                        &[],
                    )?;
                    both.push(together);
                }
                let _ = problem.add_propagator(&both, Algorithm::ExactlyEq, &[1, lambda])?;
            }
        }

        for pair in rows.windows(2) {
            let _ = problem.add_propagator(
                &[pair[0], pair[1]].concat(),
                Algorithm::LexicographicLeq,
                &[],
            )?;
        }
        for pair in columns.windows(2) {
            let _ = problem.add_propagator(
                &[pair[0].as_slice(), pair[1].as_slice()].concat(),
                Algorithm::LexicographicLeq,
                &[],
            )?;
        }

        Ok(Bibd {
            problem,
            num_blocks: b,
            incidence,
        })
    }

    /// The variable which is 1 iff `object` occurs in `block`.
    pub fn incidence(&self, object: usize, block: usize) -> VariableId {
        self.incidence[object * self.num_blocks + block]
    }

    /// The incidence matrix of a solution, one row per object.
    pub fn matrix(&self, solution: &Solution) -> Vec<Vec<i32>> {
        self.incidence
            .chunks(self.num_blocks)
            .map(|row| row.iter().map(|&variable| solution.value(variable)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use gourd_core::Solver;

    use super::*;

    #[test]
    fn design_satisfies_the_incidence_properties() {
        let parameters = BibdParameters {
            v: 7,
            b: 7,
            r: 3,
            k: 3,
            lambda: 1,
        };
        let bibd = Bibd::new(parameters).unwrap();
        let mut solver = Solver::new(bibd.problem.clone());

        let matrix = bibd.matrix(&solver.solve_one().unwrap().unwrap());

        for row in &matrix {
            assert_eq!(row.iter().sum::<i32>(), 3);
        }
        for block in 0..7 {
            assert_eq!(matrix.iter().map(|row| row[block]).sum::<i32>(), 3);
        }
        for first in 0..7 {
            for second in first + 1..7 {
                let together = (0..7)
                    .filter(|&block| matrix[first][block] == 1 && matrix[second][block] == 1)
                    .count();
                assert_eq!(together, 1);
            }
        }
    }

    #[test]
    fn counts_larger_than_the_matrix_are_rejected() {
        let parameters = BibdParameters {
            v: 3,
            b: 2,
            r: 3,
            k: 1,
            lambda: 0,
        };

        assert!(matches!(Bibd::new(parameters), Err(ModelError::Build(_))));
    }
}
