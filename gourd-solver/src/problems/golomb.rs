use gourd_core::Algorithm;
use gourd_core::Problem;
use gourd_core::Solution;
use gourd_core::VariableId;

use super::to_bound;
use super::ModelError;

/// A Golomb ruler with `n` marks: the marks are at distinct integer positions starting at 0 such
/// that all pairwise distances are distinct. The objective is the [`GolombRuler::length`], the
/// position of the last mark.
///
/// The model has one variable per pair of marks `i < j` for the distance between them, linked by
/// `d(i, j) = d(0, j) - d(0, i)`; the marks themselves are the distances to mark 0. Besides the
/// distinctness of all distances it contains
/// - the mirror symmetry breaking `d(0, 1) < d(n - 2, n - 1)`;
/// - the redundant bound `d(i, j) <= length - m(m+1)/2`: the `m = n - 1 - (j - i)` segments outside
///   of a distance are pairwise distinct and therefore at least `1 + ... + m` long.
#[derive(Clone, Debug)]
pub struct GolombRuler {
    pub problem: Problem,
    num_marks: usize,
    /// The distance variables, ordered by `i` and then by `j`.
    distances: Vec<VariableId>,
}

impl GolombRuler {
    pub fn new(num_marks: u32) -> Result<GolombRuler, ModelError> {
        if num_marks < 2 {
            return Err(ModelError::invalid(
                "Golomb ruler",
                "a ruler needs at least two marks",
            ));
        }
        let n = to_bound("Golomb ruler", num_marks)?;
        let upper = n
            .checked_mul(n)
            .ok_or_else(|| ModelError::invalid("Golomb ruler", "too many marks"))?;

        let mut problem = Problem::default();
        let mut distances = Vec::new();
        for i in 0..n - 1 {
            for j in i + 1..n {
                let span = j - i;
                distances.push(problem.add_variable(span * (span + 1) / 2..=upper));
            }
        }

        let mut ruler = GolombRuler {
            problem,
            num_marks: num_marks as usize,
            distances,
        };
        ruler.post_constraints()?;
        Ok(ruler)
    }

    /// The distance between marks `i < j`.
    pub fn distance(&self, i: usize, j: usize) -> VariableId {
        assert!(i < j && j < self.num_marks, "no distance between marks {i} and {j}");
        // Rows before `i` hold n - 1, n - 2, ... distances.
        let preceding = i * (2 * self.num_marks - i - 1) / 2;
        self.distances[preceding + j - i - 1]
    }

    /// The position of the last mark.
    pub fn length(&self) -> VariableId {
        self.distance(0, self.num_marks - 1)
    }

    pub fn num_marks(&self) -> usize {
        self.num_marks
    }

    /// The positions of the marks in a solution.
    pub fn marks(&self, solution: &Solution) -> Vec<i32> {
        std::iter::once(0)
            .chain((1..self.num_marks).map(|j| solution.value(self.distance(0, j))))
            .collect()
    }

    fn post_constraints(&mut self) -> Result<(), ModelError> {
        let n = self.num_marks;

        for i in 1..n - 1 {
            for j in i + 1..n {
                let variables = [self.distance(i, j), self.distance(0, i), self.distance(0, j)];
                let _ = self.problem.add_propagator(
                    &variables,
                    Algorithm::AffineEq,
                    &[1, 1, -1, 0],
                )?;
            }
        }

        let _ = self
            .problem
            .add_propagator(&self.distances, Algorithm::AllDifferent, &[])?;

        if n >= 3 {
            let variables = [self.distance(0, 1), self.distance(n - 2, n - 1)];
            let _ = self.problem.add_propagator(
                &variables,
                Algorithm::AffineLeq,
                &[1, -1, -1],
            )?;
        }

        let length = self.length();
        for i in 0..n - 1 {
            for j in i + 1..n {
                let remaining = (n - 1 - (j - i)) as i32;
                if remaining == 0 {
                    continue;
                }
                let variables = [self.distance(i, j), length];
                let _ = self.problem.add_propagator(
                    &variables,
                    Algorithm::AffineLeq,
                    &[1, -1, -(remaining * (remaining + 1) / 2)],
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gourd_core::optimisation::OptimisationMode;
    use gourd_core::Solver;

    use super::*;

    #[test]
    fn distances_are_indexed_per_pair() {
        let ruler = GolombRuler::new(4).unwrap();

        let all: Vec<_> = (0..3)
            .flat_map(|i| (i + 1..4).map(move |j| (i, j)))
            .map(|(i, j)| ruler.distance(i, j))
            .collect();

        assert_eq!(all, ruler.distances);
        assert_eq!(ruler.length(), ruler.distances[2]);
    }

    #[test]
    fn optimal_ruler_has_distinct_distances() {
        let ruler = GolombRuler::new(5).unwrap();
        let mut solver = Solver::new(ruler.problem.clone());

        let solution = solver
            .minimize(ruler.length(), OptimisationMode::Prune)
            .unwrap()
            .unwrap();
        let marks = ruler.marks(&solution);

        assert_eq!(marks.len(), 5);
        assert_eq!(marks[4], 11);
        let mut distances: Vec<_> = (0..5)
            .flat_map(|i| (i + 1..5).map(move |j| (i, j)))
            .map(|(i, j)| marks[j] - marks[i])
            .collect();
        distances.sort_unstable();
        distances.dedup();
        assert_eq!(distances.len(), 10);
    }

    #[test]
    fn rulers_need_two_marks() {
        assert!(matches!(
            GolombRuler::new(1),
            Err(ModelError::InvalidInstance { .. })
        ));
    }
}
