use crate::basic_types::Interval;
use crate::basic_types::PropagationStatus;
use crate::propagators::all_fixed;

/// Propagates `m = max(x_0, ..., x_{n-1})` over the variables `x_0, ..., x_{n-1}, m`.
pub(crate) fn compute(bounds: &mut [Interval], _parameters: &[i32]) -> PropagationStatus {
    let Some((maximum, elements)) = bounds.split_last_mut() else {
        return PropagationStatus::Entailed;
    };
    if elements.is_empty() {
        return PropagationStatus::Inconsistent;
    }

    loop {
        let mut changed = false;

        let highest_min = elements.iter().map(|x| x.min).max().unwrap_or(i32::MIN);
        let highest_max = elements.iter().map(|x| x.max).max().unwrap_or(i32::MIN);
        changed |= maximum.tighten_min(highest_min);
        changed |= maximum.tighten_max(highest_max);
        if maximum.is_empty() {
            return PropagationStatus::Inconsistent;
        }

        for element in elements.iter_mut() {
            changed |= element.tighten_max(maximum.max);
            if element.is_empty() {
                return PropagationStatus::Inconsistent;
            }
        }

        // If only one element can reach the lower bound of the maximum, it has to.
        let mut candidates = elements.iter_mut().filter(|x| x.max >= maximum.min);
        match (candidates.next(), candidates.next()) {
            (None, _) => return PropagationStatus::Inconsistent,
            (Some(candidate), None) => changed |= candidate.tighten_min(maximum.min),
            (Some(_), Some(_)) => {}
        }

        if !changed {
            break;
        }
    }

    if maximum.is_fixed() && all_fixed(elements) {
        PropagationStatus::Entailed
    } else {
        PropagationStatus::Consistent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maximum_is_bounded_by_the_elements() {
        let mut bounds = vec![Interval::new(1, 4), Interval::new(3, 6), Interval::new(0, 10)];

        let status = compute(&mut bounds, &[]);

        assert_eq!(status, PropagationStatus::Consistent);
        assert_eq!(bounds[2], Interval::new(3, 6));
    }

    #[test]
    fn elements_are_bounded_by_the_maximum() {
        let mut bounds = vec![Interval::new(1, 9), Interval::new(3, 9), Interval::new(0, 5)];

        let status = compute(&mut bounds, &[]);

        assert_eq!(status, PropagationStatus::Consistent);
        assert_eq!(bounds, vec![Interval::new(1, 5), Interval::new(3, 5), Interval::new(3, 5)]);
    }

    #[test]
    fn single_support_must_reach_the_maximum() {
        let mut bounds = vec![Interval::new(0, 2), Interval::new(0, 9), Interval::new(5, 7)];

        let status = compute(&mut bounds, &[]);

        assert_eq!(status, PropagationStatus::Consistent);
        assert_eq!(bounds[1], Interval::new(5, 7));
    }

    #[test]
    fn maximum_below_every_element_is_inconsistent() {
        let mut bounds = vec![Interval::new(4, 6), Interval::new(5, 6), Interval::new(0, 3)];

        assert_eq!(compute(&mut bounds, &[]), PropagationStatus::Inconsistent);
    }
}
