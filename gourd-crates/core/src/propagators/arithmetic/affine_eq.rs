use enumset::EnumSet;

use super::split_parameters;
use super::term_max;
use super::term_min;
use crate::basic_types::Interval;
use crate::basic_types::PropagationStatus;
use crate::engine::Bound;
use crate::math::num_ext::NumExt;

/// Propagates `sum a_i * x_i = c` to bounds consistency.
///
/// Every term is confined to `c` minus the range of the other terms. Unlike the inequality,
/// narrowing one term changes the range available to the others, so passes are repeated until
/// nothing changes.
pub(crate) fn compute(bounds: &mut [Interval], parameters: &[i32]) -> PropagationStatus {
    let (coefficients, rhs) = split_parameters(parameters);

    let mut lower_bound_lhs: i64 = coefficients
        .iter()
        .zip(bounds.iter())
        .map(|(&a, &interval)| term_min(a, interval))
        .sum();
    let mut upper_bound_lhs: i64 = coefficients
        .iter()
        .zip(bounds.iter())
        .map(|(&a, &interval)| term_max(a, interval))
        .sum();

    loop {
        if lower_bound_lhs > rhs || upper_bound_lhs < rhs {
            return PropagationStatus::Inconsistent;
        }
        if lower_bound_lhs == upper_bound_lhs {
            return PropagationStatus::Entailed;
        }

        let mut changed = false;
        for (&a, interval) in coefficients.iter().zip(bounds.iter_mut()) {
            if a == 0 {
                continue;
            }

            let (old_min, old_max) = (term_min(a, *interval), term_max(a, *interval));
            let low = rhs - (upper_bound_lhs - old_max);
            let high = rhs - (lower_bound_lhs - old_min);
            let a = a as i64;
            let (new_min, new_max) = if a > 0 {
                (low.ceil_div(a), high.floor_div(a))
            } else {
                (high.ceil_div(a), low.floor_div(a))
            };

            changed |= interval.tighten_min(new_min.saturating_to_i32());
            changed |= interval.tighten_max(new_max.saturating_to_i32());
            if interval.is_empty() {
                return PropagationStatus::Inconsistent;
            }

            let a = a as i32;
            lower_bound_lhs += term_min(a, *interval) - old_min;
            upper_bound_lhs += term_max(a, *interval) - old_max;
        }

        if !changed {
            return PropagationStatus::Consistent;
        }
    }
}

pub(crate) fn triggers(num_variables: usize, parameters: &[i32]) -> Vec<EnumSet<Bound>> {
    let (coefficients, _) = split_parameters(parameters);
    (0..num_variables)
        .map(|index| {
            if coefficients.get(index).copied().unwrap_or(0) == 0 {
                EnumSet::empty()
            } else {
                EnumSet::all()
            }
        })
        .collect()
}
