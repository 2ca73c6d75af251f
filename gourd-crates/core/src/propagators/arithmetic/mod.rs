//! Linear (affine) constraints `sum a_i * x_i (= | <=) c`.
//!
//! The parameters of both propagators are the coefficients followed by the right-hand side.
//! Sums are computed in `i64`; a product of two `i32` values always fits, and so does a sum of
//! any realistic number of them.

pub(crate) mod affine_eq;
pub(crate) mod affine_leq;

use crate::basic_types::Interval;

/// Splits the parameters into the coefficients and the right-hand side.
fn split_parameters(parameters: &[i32]) -> (&[i32], i64) {
    let (rhs, coefficients) = parameters
        .split_last()
        .map(|(rhs, coefficients)| (*rhs as i64, coefficients))
        .unwrap_or((0, parameters));
    (coefficients, rhs)
}

/// The smallest value of `coefficient * x` for `x` within `interval`.
fn term_min(coefficient: i32, interval: Interval) -> i64 {
    if coefficient >= 0 {
        coefficient as i64 * interval.min as i64
    } else {
        coefficient as i64 * interval.max as i64
    }
}

/// The largest value of `coefficient * x` for `x` within `interval`.
fn term_max(coefficient: i32, interval: Interval) -> i64 {
    if coefficient >= 0 {
        coefficient as i64 * interval.max as i64
    } else {
        coefficient as i64 * interval.min as i64
    }
}
