//! Contains the propagator implementations that can be posted on a [`crate::Problem`].
//!
//! A propagator is a pure function over the bounds of its own variables (with the offsets of
//! the variables already applied) and the parameters it was posted with. The [`Algorithm`] of a
//! propagator is resolved to that function once, when the propagator is added to a problem.

mod all_different;
mod and_eq;
mod element_eq;
mod exactly_eq;
mod lexicographic_leq;
mod max_eq;

pub(crate) mod arithmetic;

use std::fmt::Display;
use std::fmt::Formatter;

use enumset::EnumSet;

use crate::basic_types::Interval;
use crate::basic_types::ProblemBuildError;
use crate::basic_types::PropagationStatus;
use crate::engine::Bound;

/// The signature shared by every propagator implementation.
pub(crate) type ComputeFn = fn(&mut [Interval], &[i32]) -> PropagationStatus;

/// The propagator kinds which can be posted on a [`crate::Problem`].
///
/// The variables and parameters expected by every kind are documented on the variants. Both are
/// validated when the propagator is added, see [`crate::Problem::add_propagator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// `x_0, ..., x_{n-1}` take pairwise distinct values; no parameters.
    ///
    /// Enforces bounds consistency with the Hall interval algorithm of López-Ortiz et al.
    AllDifferent,
    /// `a_0 * x_0 + ... + a_{n-1} * x_{n-1} = c`; the parameters are `a_0, ..., a_{n-1}, c`.
    AffineEq,
    /// `a_0 * x_0 + ... + a_{n-1} * x_{n-1} <= c`; the parameters are `a_0, ..., a_{n-1}, c`.
    AffineLeq,
    /// `r <-> (b_0 /\ ... /\ b_{n-1})` over the variables `b_0, ..., b_{n-1}, r`, each with a
    /// domain within `[0, 1]`; no parameters.
    AndEq,
    /// `l[i] = v` over the variables `l_0, ..., l_{n-1}, i, v` with `i` a 0-based index; no
    /// parameters.
    ElementEq,
    /// Exactly `count` of `x_0, ..., x_{n-1}` are equal to `value`; the parameters are
    /// `value, count`.
    ExactlyEq,
    /// `(x_0, ..., x_{n-1})` is lexicographically at most `(y_0, ..., y_{n-1})`, over the
    /// variables `x_0, ..., x_{n-1}, y_0, ..., y_{n-1}`; no parameters.
    LexicographicLeq,
    /// `m = max(x_0, ..., x_{n-1})` over the variables `x_0, ..., x_{n-1}, m`; no parameters.
    MaxEq,
}

impl Algorithm {
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::AllDifferent => "AllDifferent",
            Algorithm::AffineEq => "AffineEq",
            Algorithm::AffineLeq => "AffineLeq",
            Algorithm::AndEq => "AndEq",
            Algorithm::ElementEq => "ElementEq",
            Algorithm::ExactlyEq => "ExactlyEq",
            Algorithm::LexicographicLeq => "LexicographicLeq",
            Algorithm::MaxEq => "MaxEq",
        }
    }

    /// Runs the propagator once on `bounds`, narrowing them in place.
    ///
    /// The bounds and parameters are expected to have passed [`Algorithm::validate`].
    pub fn compute(self, bounds: &mut [Interval], parameters: &[i32]) -> PropagationStatus {
        (self.compute_fn())(bounds, parameters)
    }

    pub(crate) fn compute_fn(self) -> ComputeFn {
        match self {
            Algorithm::AllDifferent => all_different::compute,
            Algorithm::AffineEq => arithmetic::affine_eq::compute,
            Algorithm::AffineLeq => arithmetic::affine_leq::compute,
            Algorithm::AndEq => and_eq::compute,
            Algorithm::ElementEq => element_eq::compute,
            Algorithm::ExactlyEq => exactly_eq::compute,
            Algorithm::LexicographicLeq => lexicographic_leq::compute,
            Algorithm::MaxEq => max_eq::compute,
        }
    }

    /// The bounds of every variable position which, when changed, can lead to new propagation.
    pub(crate) fn triggers(self, num_variables: usize, parameters: &[i32]) -> Vec<EnumSet<Bound>> {
        match self {
            Algorithm::AffineLeq => arithmetic::affine_leq::triggers(num_variables, parameters),
            Algorithm::AffineEq => arithmetic::affine_eq::triggers(num_variables, parameters),
            Algorithm::AllDifferent
            | Algorithm::AndEq
            | Algorithm::ElementEq
            | Algorithm::ExactlyEq
            | Algorithm::LexicographicLeq
            | Algorithm::MaxEq => vec![EnumSet::all(); num_variables],
        }
    }

    /// Checks the number of variables and the parameters of a propagator, given the bounds of
    /// its variables at the time it is posted.
    pub(crate) fn validate(
        self,
        bounds: &[Interval],
        parameters: &[i32],
    ) -> Result<(), ProblemBuildError> {
        match self {
            Algorithm::AllDifferent => {
                self.expect_parameters(parameters, 0)?;
                self.expect_variables(bounds, 1, "at least one variable is required")
            }
            Algorithm::AffineEq | Algorithm::AffineLeq => {
                self.expect_variables(bounds, 1, "at least one variable is required")?;
                self.expect_parameters(parameters, bounds.len() + 1)
            }
            Algorithm::AndEq => {
                self.expect_parameters(parameters, 0)?;
                self.expect_variables(bounds, 2, "at least one conjunct and a result are required")?;
                if bounds.iter().any(|b| !b.is_within(&Interval::new(0, 1))) {
                    return Err(ProblemBuildError::InvalidParameter {
                        algorithm: self,
                        reason: "every variable must have a domain within [0, 1]",
                    });
                }
                Ok(())
            }
            Algorithm::ElementEq => {
                self.expect_parameters(parameters, 0)?;
                self.expect_variables(
                    bounds,
                    3,
                    "at least one element, an index and a value are required",
                )
            }
            Algorithm::ExactlyEq => {
                self.expect_parameters(parameters, 2)?;
                let count = parameters[1];
                if count < 0 || count as usize > bounds.len() {
                    return Err(ProblemBuildError::InvalidParameter {
                        algorithm: self,
                        reason: "the count must be between zero and the number of variables",
                    });
                }
                Ok(())
            }
            Algorithm::LexicographicLeq => {
                self.expect_parameters(parameters, 0)?;
                if bounds.is_empty() || bounds.len() % 2 != 0 {
                    return Err(ProblemBuildError::VariableCount {
                        algorithm: self,
                        actual: bounds.len(),
                        reason: "two non-empty sequences of equal length are required",
                    });
                }
                Ok(())
            }
            Algorithm::MaxEq => {
                self.expect_parameters(parameters, 0)?;
                self.expect_variables(bounds, 2, "at least one variable and a maximum are required")
            }
        }
    }

    fn expect_parameters(self, parameters: &[i32], expected: usize) -> Result<(), ProblemBuildError> {
        if parameters.len() != expected {
            return Err(ProblemBuildError::ParameterCount {
                algorithm: self,
                expected,
                actual: parameters.len(),
            });
        }
        Ok(())
    }

    fn expect_variables(
        self,
        bounds: &[Interval],
        minimum: usize,
        reason: &'static str,
    ) -> Result<(), ProblemBuildError> {
        if bounds.len() < minimum {
            return Err(ProblemBuildError::VariableCount {
                algorithm: self,
                actual: bounds.len(),
                reason,
            });
        }
        Ok(())
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether every interval in `bounds` is a singleton.
pub(crate) fn all_fixed(bounds: &[Interval]) -> bool {
    bounds.iter().all(Interval::is_fixed)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Whether a full assignment satisfies the constraint; the reference for soundness checks.
    fn satisfies(algorithm: Algorithm, values: &[i32], parameters: &[i32]) -> bool {
        match algorithm {
            Algorithm::AllDifferent => {
                (0..values.len()).all(|i| (i + 1..values.len()).all(|j| values[i] != values[j]))
            }
            Algorithm::AffineEq | Algorithm::AffineLeq => {
                let n = values.len();
                let lhs: i64 = values
                    .iter()
                    .zip(&parameters[..n])
                    .map(|(&x, &a)| x as i64 * a as i64)
                    .sum();
                if algorithm == Algorithm::AffineEq {
                    lhs == parameters[n] as i64
                } else {
                    lhs <= parameters[n] as i64
                }
            }
            Algorithm::AndEq => {
                let (r, b) = values.split_last().unwrap();
                (*r == 1) == b.iter().all(|&v| v == 1)
            }
            Algorithm::ElementEq => {
                let n = values.len() - 2;
                let (i, v) = (values[n], values[n + 1]);
                i >= 0 && (i as usize) < n && values[i as usize] == v
            }
            Algorithm::ExactlyEq => {
                values.iter().filter(|&&v| v == parameters[0]).count() == parameters[1] as usize
            }
            Algorithm::LexicographicLeq => {
                let (x, y) = values.split_at(values.len() / 2);
                x <= y
            }
            Algorithm::MaxEq => {
                let (m, x) = values.split_last().unwrap();
                x.iter().max() == Some(m)
            }
        }
    }

    /// Every assignment within `bounds`, in lexicographic order.
    fn assignments(bounds: &[Interval]) -> Vec<Vec<i32>> {
        let mut result = vec![vec![]];
        for interval in bounds {
            result = result
                .into_iter()
                .flat_map(|prefix| {
                    (interval.min..=interval.max).map(move |v| {
                        let mut next = prefix.clone();
                        next.push(v);
                        next
                    })
                })
                .collect();
        }
        result
    }

    fn intervals(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Interval>> {
        prop::collection::vec(
            (-2_i32..4, 0_i32..4).prop_map(|(min, width)| Interval::new(min, min + width)),
            len,
        )
    }

    fn boolean_intervals(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Interval>> {
        prop::collection::vec(
            prop_oneof![
                Just(Interval::new(0, 0)),
                Just(Interval::new(1, 1)),
                Just(Interval::new(0, 1))
            ],
            len,
        )
    }

    /// Checks that propagation never widens a domain, never removes a value which takes part in
    /// a solution, reports inconsistency only when there is no solution, only reports entailment
    /// when every remaining assignment is a solution, and reaches its own fixpoint in one call.
    fn check_propagation(
        algorithm: Algorithm,
        bounds: Vec<Interval>,
        parameters: Vec<i32>,
    ) -> Result<(), TestCaseError> {
        prop_assume!(algorithm.validate(&bounds, &parameters).is_ok());

        let solutions: Vec<Vec<i32>> = assignments(&bounds)
            .into_iter()
            .filter(|values| satisfies(algorithm, values, &parameters))
            .collect();

        let mut narrowed = bounds.clone();
        let status = algorithm.compute(&mut narrowed, &parameters);

        if status == PropagationStatus::Inconsistent {
            assert!(solutions.is_empty(), "{algorithm} failed on {bounds:?}");
            return Ok(());
        }

        for (before, after) in bounds.iter().zip(&narrowed) {
            assert!(after.is_within(before), "{algorithm} widened {before} to {after}");
        }

        for solution in &solutions {
            assert!(
                solution.iter().zip(&narrowed).all(|(v, b)| b.contains(*v)),
                "{algorithm} removed solution {solution:?} from {bounds:?}, leaving {narrowed:?}"
            );
        }

        if narrowed.iter().any(Interval::is_empty) {
            assert!(solutions.is_empty());
            return Ok(());
        }

        if status == PropagationStatus::Entailed {
            assert!(assignments(&narrowed)
                .iter()
                .all(|values| satisfies(algorithm, values, &parameters)));
            return Ok(());
        }

        let mut again = narrowed.clone();
        let second = algorithm.compute(&mut again, &parameters);
        assert_ne!(second, PropagationStatus::Inconsistent);
        assert_eq!(again, narrowed, "{algorithm} is not idempotent on {bounds:?}");
        Ok(())
    }

    proptest! {
        #[test]
        fn all_different_is_sound_and_idempotent(bounds in intervals(1..6)) {
            check_propagation(Algorithm::AllDifferent, bounds, vec![])?;
        }

        #[test]
        fn all_different_is_inconsistent_exactly_when_unsatisfiable(bounds in intervals(1..6)) {
            let satisfiable = assignments(&bounds)
                .iter()
                .any(|values| satisfies(Algorithm::AllDifferent, values, &[]));
            let mut narrowed = bounds.clone();
            let status = Algorithm::AllDifferent.compute(&mut narrowed, &[]);
            prop_assert_eq!(status == PropagationStatus::Inconsistent, !satisfiable);
        }

        #[test]
        fn affine_eq_is_sound_and_idempotent(
            bounds in intervals(1..4),
            coefficients in prop::collection::vec(-3_i32..4, 3),
            rhs in -6_i32..7,
        ) {
            let mut parameters = coefficients[..bounds.len()].to_vec();
            parameters.push(rhs);
            check_propagation(Algorithm::AffineEq, bounds, parameters)?;
        }

        #[test]
        fn affine_leq_is_sound_and_idempotent(
            bounds in intervals(1..4),
            coefficients in prop::collection::vec(-3_i32..4, 3),
            rhs in -6_i32..7,
        ) {
            let mut parameters = coefficients[..bounds.len()].to_vec();
            parameters.push(rhs);
            check_propagation(Algorithm::AffineLeq, bounds, parameters)?;
        }

        #[test]
        fn and_eq_is_sound_and_idempotent(bounds in boolean_intervals(2..5)) {
            check_propagation(Algorithm::AndEq, bounds, vec![])?;
        }

        #[test]
        fn element_eq_is_sound_and_idempotent(bounds in intervals(3..6)) {
            check_propagation(Algorithm::ElementEq, bounds, vec![])?;
        }

        #[test]
        fn exactly_eq_is_sound_and_idempotent(
            bounds in intervals(1..5),
            value in -1_i32..3,
            count in 0_i32..5,
        ) {
            check_propagation(Algorithm::ExactlyEq, bounds, vec![value, count])?;
        }

        #[test]
        fn lexicographic_leq_is_sound_and_idempotent(bounds in intervals(2..7)) {
            check_propagation(Algorithm::LexicographicLeq, bounds, vec![])?;
        }

        #[test]
        fn max_eq_is_sound_and_idempotent(bounds in intervals(2..5)) {
            check_propagation(Algorithm::MaxEq, bounds, vec![])?;
        }
    }

    #[test]
    fn malformed_propagators_are_rejected() {
        let bounds = [Interval::new(0, 3), Interval::new(0, 3)];

        assert_eq!(
            Algorithm::AffineEq.validate(&bounds, &[1, 1]),
            Err(ProblemBuildError::ParameterCount {
                algorithm: Algorithm::AffineEq,
                expected: 3,
                actual: 2
            })
        );
        assert!(Algorithm::AndEq.validate(&bounds, &[]).is_err());
        assert!(Algorithm::ExactlyEq.validate(&bounds, &[1, 3]).is_err());
        assert!(Algorithm::LexicographicLeq.validate(&bounds[..1], &[]).is_err());
        assert!(Algorithm::AllDifferent.validate(&[], &[]).is_err());
        assert!(Algorithm::AllDifferent.validate(&bounds, &[]).is_ok());
    }

    #[test]
    fn affine_leq_only_triggers_on_the_bound_which_tightens_the_sum() {
        let triggers = Algorithm::AffineLeq.triggers(3, &[2, -1, 0, 5]);

        assert_eq!(triggers, vec![Bound::Min.into(), Bound::Max.into(), EnumSet::empty()]);
    }
}
