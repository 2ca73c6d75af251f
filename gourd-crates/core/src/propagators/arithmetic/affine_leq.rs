use enumset::EnumSet;

use super::split_parameters;
use super::term_max;
use super::term_min;
use crate::basic_types::Interval;
use crate::basic_types::PropagationStatus;
use crate::engine::Bound;
use crate::math::num_ext::NumExt;

/// Propagates `sum a_i * x_i <= c` to bounds consistency.
///
/// The slack of every term is computed against the smallest value of all other terms. Narrowing
/// a variable never changes the smallest value of its own term, so one pass reaches the fixpoint.
pub(crate) fn compute(bounds: &mut [Interval], parameters: &[i32]) -> PropagationStatus {
    let (coefficients, rhs) = split_parameters(parameters);

    let lower_bound_lhs: i64 = coefficients
        .iter()
        .zip(bounds.iter())
        .map(|(&a, &interval)| term_min(a, interval))
        .sum();

    if lower_bound_lhs > rhs {
        return PropagationStatus::Inconsistent;
    }

    let upper_bound_lhs: i64 = coefficients
        .iter()
        .zip(bounds.iter())
        .map(|(&a, &interval)| term_max(a, interval))
        .sum();

    if upper_bound_lhs <= rhs {
        return PropagationStatus::Entailed;
    }

    for (&a, interval) in coefficients.iter().zip(bounds.iter_mut()) {
        if a == 0 {
            continue;
        }

        let slack = rhs - (lower_bound_lhs - term_min(a, *interval));
        let _ = if a > 0 {
            interval.tighten_max(slack.floor_div(a as i64).saturating_to_i32())
        } else {
            interval.tighten_min(slack.ceil_div(a as i64).saturating_to_i32())
        };
    }

    PropagationStatus::Consistent
}

/// A term with a positive coefficient is only constrained further when its lower bound rises,
/// one with a negative coefficient when its upper bound drops.
pub(crate) fn triggers(num_variables: usize, parameters: &[i32]) -> Vec<EnumSet<Bound>> {
    let (coefficients, _) = split_parameters(parameters);
    (0..num_variables)
        .map(|index| match coefficients.get(index).copied().unwrap_or(0) {
            0 => EnumSet::empty(),
            a if a > 0 => EnumSet::only(Bound::Min),
            _ => EnumSet::only(Bound::Max),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_bounds_are_tightened_by_the_minimum_of_the_other_terms() {
        // 2x + 3y <= 12, x in [1, 10], y in [0, 10]
        let mut bounds = vec![Interval::new(1, 10), Interval::new(0, 10)];

        let status = compute(&mut bounds, &[2, 3, 12]);

        assert_eq!(status, PropagationStatus::Consistent);
        assert_eq!(bounds, vec![Interval::new(1, 6), Interval::new(0, 3)]);
    }

    #[test]
    fn negative_coefficients_tighten_lower_bounds() {
        // x - y <= -3, x in [0, 5], y in [0, 5]
        let mut bounds = vec![Interval::new(0, 5), Interval::new(0, 5)];

        let status = compute(&mut bounds, &[1, -1, -3]);

        assert_eq!(status, PropagationStatus::Consistent);
        assert_eq!(bounds, vec![Interval::new(0, 2), Interval::new(3, 5)]);
    }

    #[test]
    fn satisfied_for_every_assignment_is_entailed() {
        let mut bounds = vec![Interval::new(0, 2), Interval::new(0, 2)];

        assert_eq!(compute(&mut bounds, &[1, 1, 4]), PropagationStatus::Entailed);
    }

    #[test]
    fn too_large_lower_bound_is_inconsistent() {
        let mut bounds = vec![Interval::new(3, 5), Interval::new(2, 5)];

        assert_eq!(compute(&mut bounds, &[1, 1, 4]), PropagationStatus::Inconsistent);
    }
}
