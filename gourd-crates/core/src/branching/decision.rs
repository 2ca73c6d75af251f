use std::fmt::Display;
use std::fmt::Formatter;

use crate::basic_types::Interval;
use crate::engine::Bound;
use crate::engine::DomainId;

/// A split of a shared domain into two parts. The solver explores the part described by the
/// decision first and the complementary part after backtracking.
///
/// The value has to lie strictly inside the domain for the split to be a proper one: for
/// `domain <= value` it has to hold that `min <= value < max`, for `domain >= value` that
/// `min < value <= max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    /// `domain <= value`, with `domain >= value + 1` as the alternative.
    LessOrEqual { domain: DomainId, value: i32 },
    /// `domain >= value`, with `domain <= value - 1` as the alternative.
    GreaterOrEqual { domain: DomainId, value: i32 },
}

impl Decision {
    pub fn domain(&self) -> DomainId {
        match *self {
            Decision::LessOrEqual { domain, .. } | Decision::GreaterOrEqual { domain, .. } => {
                domain
            }
        }
    }

    /// The bound which is tightened when the decision is taken, and the value it is set to.
    pub(crate) fn commitment(&self) -> (Bound, i32) {
        match *self {
            Decision::LessOrEqual { value, .. } => (Bound::Max, value),
            Decision::GreaterOrEqual { value, .. } => (Bound::Min, value),
        }
    }

    /// The bound which is tightened when backtracking over the decision, and the value it is
    /// set to.
    pub(crate) fn alternative(&self) -> (Bound, i32) {
        match *self {
            Decision::LessOrEqual { value, .. } => (Bound::Min, value + 1),
            Decision::GreaterOrEqual { value, .. } => (Bound::Max, value - 1),
        }
    }

    /// Whether both the decision and its alternative leave a non-empty part of `interval`.
    pub fn splits(&self, interval: Interval) -> bool {
        match *self {
            Decision::LessOrEqual { value, .. } => interval.min <= value && value < interval.max,
            Decision::GreaterOrEqual { value, .. } => interval.min < value && value <= interval.max,
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::LessOrEqual { domain, value } => write!(f, "[{domain} <= {value}]"),
            Decision::GreaterOrEqual { domain, value } => write!(f, "[{domain} >= {value}]"),
        }
    }
}
