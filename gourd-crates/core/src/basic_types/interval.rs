use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::RangeInclusive;

use crate::engine::Bound;

/// The bounds `[min, max]` of a shared domain, or of a variable once its offset is applied.
///
/// An interval with `min > max` is empty; this is the one representation of an inconsistent
/// domain used throughout the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    pub min: i32,
    pub max: i32,
}

impl Interval {
    pub const fn new(min: i32, max: i32) -> Interval {
        Interval { min, max }
    }

    pub const fn singleton(value: i32) -> Interval {
        Interval {
            min: value,
            max: value,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub const fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    pub const fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }

    pub const fn intersects(&self, other: &Interval) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// The number of values in the interval; zero when it is empty.
    pub fn size(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.max as i64 - self.min as i64 + 1) as u64
        }
    }

    pub const fn get(&self, bound: Bound) -> i32 {
        match bound {
            Bound::Min => self.min,
            Bound::Max => self.max,
        }
    }

    /// The interval shifted by a constant, i.e. the bounds of `x + offset` for `x` in `self`.
    ///
    /// Saturates instead of wrapping, so an interval which is shifted out of range of `i32`
    /// stays ordered.
    pub const fn shifted(&self, offset: i32) -> Interval {
        Interval {
            min: self.min.saturating_add(offset),
            max: self.max.saturating_add(offset),
        }
    }

    /// Raises the lower bound to `value`; returns whether the interval changed.
    pub fn tighten_min(&mut self, value: i32) -> bool {
        if value > self.min {
            self.min = value;
            true
        } else {
            false
        }
    }

    /// Lowers the upper bound to `value`; returns whether the interval changed.
    pub fn tighten_max(&mut self, value: i32) -> bool {
        if value < self.max {
            self.max = value;
            true
        } else {
            false
        }
    }

    pub fn tighten(&mut self, bound: Bound, value: i32) -> bool {
        match bound {
            Bound::Min => self.tighten_min(value),
            Bound::Max => self.tighten_max(value),
        }
    }

    /// Whether `self` is contained in `other`; used to check that bounds never widen.
    pub const fn is_within(&self, other: &Interval) -> bool {
        self.min >= other.min && self.max <= other.max
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

impl From<i32> for Interval {
    fn from(value: i32) -> Self {
        Interval::singleton(value)
    }
}

impl From<(i32, i32)> for Interval {
    fn from((min, max): (i32, i32)) -> Self {
        Interval::new(min, max)
    }
}

impl From<[i32; 2]> for Interval {
    fn from([min, max]: [i32; 2]) -> Self {
        Interval::new(min, max)
    }
}

impl From<RangeInclusive<i32>> for Interval {
    fn from(range: RangeInclusive<i32>) -> Self {
        Interval::new(*range.start(), *range.end())
    }
}
