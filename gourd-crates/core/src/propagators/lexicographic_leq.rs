use std::cmp::Ordering;

use crate::basic_types::Interval;
use crate::basic_types::PropagationStatus;

/// Propagates `x <=lex y` over the variables `x_0, ..., x_{n-1}, y_0, ..., y_{n-1}`.
///
/// Skips the prefix of positions where `x_q` and `y_q` are fixed to the same value, and
/// enforces `x_q <= y_q` on the first remaining position. The inequality is strict when every
/// assignment of the remaining suffix makes `x` greater than `y`.
pub(crate) fn compute(bounds: &mut [Interval], _parameters: &[i32]) -> PropagationStatus {
    let n = bounds.len() / 2;
    let (x, y) = bounds.split_at_mut(n);

    loop {
        let Some(q) = (0..n).find(|&q| !(x[q].is_fixed() && y[q].is_fixed() && x[q] == y[q]))
        else {
            return PropagationStatus::Entailed;
        };

        let suffix_greater = x[q + 1..]
            .iter()
            .map(|interval| interval.min)
            .cmp(y[q + 1..].iter().map(|interval| interval.max))
            == Ordering::Greater;
        let gap = i32::from(suffix_greater);

        let mut changed = x[q].tighten_max(y[q].max.saturating_sub(gap));
        changed |= y[q].tighten_min(x[q].min.saturating_add(gap));

        if x[q].is_empty() || y[q].is_empty() {
            return PropagationStatus::Inconsistent;
        }

        let always_less_or_equal = x[q..]
            .iter()
            .map(|interval| interval.max)
            .cmp(y[q..].iter().map(|interval| interval.min))
            != Ordering::Greater;
        if always_less_or_equal {
            return PropagationStatus::Entailed;
        }

        if !changed {
            return PropagationStatus::Consistent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_differing_position_is_ordered() {
        // x = (1, [0, 5], [0, 9]), y = (1, [2, 3], [0, 9])
        let mut bounds = vec![
            Interval::new(1, 1),
            Interval::new(0, 5),
            Interval::new(0, 9),
            Interval::new(1, 1),
            Interval::new(2, 3),
            Interval::new(0, 9),
        ];

        let status = compute(&mut bounds, &[]);

        assert_eq!(status, PropagationStatus::Consistent);
        assert_eq!(bounds[1], Interval::new(0, 3));
        assert_eq!(bounds[4], Interval::new(2, 3));
    }

    #[test]
    fn greater_suffix_makes_the_first_position_strict() {
        // x = ([0, 3], 5), y = ([0, 3], 4)
        let mut bounds = vec![
            Interval::new(0, 3),
            Interval::new(5, 5),
            Interval::new(0, 3),
            Interval::new(4, 4),
        ];

        let status = compute(&mut bounds, &[]);

        assert_eq!(status, PropagationStatus::Consistent);
        assert_eq!(bounds[0], Interval::new(0, 2));
        assert_eq!(bounds[2], Interval::new(1, 3));
    }

    #[test]
    fn equal_vectors_are_entailed() {
        let mut bounds = vec![Interval::new(2, 2), Interval::new(2, 2)];

        assert_eq!(compute(&mut bounds, &[]), PropagationStatus::Entailed);
    }

    #[test]
    fn greater_fixed_vector_is_inconsistent() {
        let mut bounds = vec![
            Interval::new(1, 1),
            Interval::new(3, 3),
            Interval::new(1, 1),
            Interval::new(2, 2),
        ];

        assert_eq!(compute(&mut bounds, &[]), PropagationStatus::Inconsistent);
    }
}
