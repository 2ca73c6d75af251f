use crate::basic_types::Interval;
use crate::basic_types::PropagationStatus;

/// Propagates that exactly `count` of the variables equal `value`; the parameters are
/// `value, count`.
///
/// Once `count` variables are fixed to `value`, the value is removed from the bounds of all
/// others where it sits on a bound. Once only `count` variables can still take `value`, they are
/// all fixed to it.
pub(crate) fn compute(bounds: &mut [Interval], parameters: &[i32]) -> PropagationStatus {
    let [value, count] = *parameters else {
        return PropagationStatus::Inconsistent;
    };
    let count = count as usize;

    loop {
        let assigned = bounds
            .iter()
            .filter(|interval| interval.is_fixed() && interval.min == value)
            .count();
        let possible = bounds
            .iter()
            .filter(|interval| interval.contains(value))
            .count();

        if assigned > count || possible < count {
            return PropagationStatus::Inconsistent;
        }
        if assigned == possible {
            return PropagationStatus::Entailed;
        }

        let mut changed = false;
        for interval in bounds.iter_mut() {
            if !interval.contains(value) || interval.is_fixed() {
                continue;
            }

            if possible == count {
                let _ = interval.tighten_min(value);
                let _ = interval.tighten_max(value);
                changed = true;
            } else if assigned == count {
                if interval.min == value {
                    changed |= interval.tighten_min(value + 1);
                } else if interval.max == value {
                    changed |= interval.tighten_max(value - 1);
                }
            }
        }

        if !changed {
            return PropagationStatus::Consistent;
        }
    }
}
