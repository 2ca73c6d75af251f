use crate::basic_types::Interval;
use crate::basic_types::PropagationStatus;

/// Propagates `l[i] = v` over the variables `l_0, ..., l_{n-1}, i, v`, with `i` indexing from 0.
///
/// The index is narrowed to the positions whose element can still equal `v`, `v` to the hull of
/// those elements, and once the index is fixed the selected element and `v` are made equal.
pub(crate) fn compute(bounds: &mut [Interval], _parameters: &[i32]) -> PropagationStatus {
    let Some((value, rest)) = bounds.split_last_mut() else {
        return PropagationStatus::Entailed;
    };
    let Some((index, elements)) = rest.split_last_mut() else {
        return PropagationStatus::Entailed;
    };
    if elements.is_empty() {
        return PropagationStatus::Inconsistent;
    }

    loop {
        let mut changed = false;

        let last = (elements.len() - 1) as i32;
        changed |= index.tighten_min(0);
        changed |= index.tighten_max(last);

        while !index.is_empty() && !elements[index.min as usize].intersects(value) {
            index.min += 1;
            changed = true;
        }
        while !index.is_empty() && !elements[index.max as usize].intersects(value) {
            index.max -= 1;
            changed = true;
        }
        if index.is_empty() {
            return PropagationStatus::Inconsistent;
        }

        let supports = elements[index.min as usize..=index.max as usize]
            .iter()
            .filter(|element| element.intersects(value));
        let (lowest, highest) = supports.fold((i32::MAX, i32::MIN), |(lowest, highest), element| {
            (lowest.min(element.min), highest.max(element.max))
        });
        changed |= value.tighten_min(lowest);
        changed |= value.tighten_max(highest);

        if index.is_fixed() {
            let element = &mut elements[index.min as usize];
            changed |= element.tighten_min(value.min);
            changed |= element.tighten_max(value.max);
            changed |= value.tighten_min(element.min);
            changed |= value.tighten_max(element.max);

            if element.is_empty() || value.is_empty() {
                return PropagationStatus::Inconsistent;
            }
            if value.is_fixed() && element.is_fixed() {
                return PropagationStatus::Entailed;
            }
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
    fn index_is_narrowed_to_compatible_elements() {
        let mut bounds = vec![
            Interval::new(0, 1),
            Interval::new(5, 6),
            Interval::new(2, 3),
            Interval::new(7, 9),
            Interval::new(-3, 10),
            Interval::new(4, 8),
        ];

        let status = compute(&mut bounds, &[]);

        assert_eq!(status, PropagationStatus::Consistent);
        assert_eq!(bounds[4], Interval::new(1, 3));
        assert_eq!(bounds[5], Interval::new(5, 8));
    }

    #[test]
    fn fixed_index_equates_element_and_value() {
        let mut bounds = vec![
            Interval::new(0, 9),
            Interval::new(3, 5),
            Interval::new(1, 1),
            Interval::new(4, 7),
        ];

        let status = compute(&mut bounds, &[]);

        assert_eq!(status, PropagationStatus::Consistent);
        assert_eq!(bounds[1], Interval::new(4, 5));
        assert_eq!(bounds[3], Interval::new(4, 5));
    }

    #[test]
    fn no_compatible_element_is_inconsistent() {
        let mut bounds = vec![
            Interval::new(0, 1),
            Interval::new(2, 3),
            Interval::new(0, 1),
            Interval::new(5, 5),
        ];

        assert_eq!(compute(&mut bounds, &[]), PropagationStatus::Inconsistent);
    }
}
