//! Bounds consistent all-different, following "A fast and simple algorithm for bounds
//! consistency of the alldifferent constraint" by López-Ortiz, Quimper, Tromp and van Beek.
//!
//! The bounds of the variables are sorted by lower and by upper bound and merged into a sorted
//! sequence of critical bounds. Two symmetric passes then walk the variables, in order of upper
//! bound to raise the lower bounds and in reverse order of lower bound to lower the upper bounds,
//! maintaining the free capacity between critical bounds and the Hall intervals found so far as
//! path compressed forests.

use crate::basic_types::Interval;
use crate::basic_types::PropagationStatus;
use crate::gourd_assert_simple;
use crate::propagators::all_fixed;

pub(crate) fn compute(bounds: &mut [Interval], _parameters: &[i32]) -> PropagationStatus {
    if bounds.len() <= 1 {
        return PropagationStatus::Entailed;
    }

    let mut hall_intervals = HallIntervals::new(bounds);
    if !hall_intervals.update_lower_bounds() || !hall_intervals.update_upper_bounds() {
        return PropagationStatus::Inconsistent;
    }

    for (index, interval) in bounds.iter_mut().enumerate() {
        let (min, max) = hall_intervals.bounds_of(index);
        gourd_assert_simple!(min <= max, "bounds consistency emptied a domain");
        let _ = interval.tighten_min(min);
        let _ = interval.tighten_max(max);
    }

    if all_fixed(bounds) {
        PropagationStatus::Entailed
    } else {
        PropagationStatus::Consistent
    }
}

/// The working state of one propagation.
///
/// The upper bounds are stored exclusively, i.e. as `max + 1`, and all arithmetic is done in
/// `i64` so that the sentinel bounds cannot overflow.
struct HallIntervals {
    min: Vec<i64>,
    max: Vec<i64>,
    min_rank: Vec<usize>,
    max_rank: Vec<usize>,
    min_sorted: Vec<usize>,
    max_sorted: Vec<usize>,
    /// The sorted critical bounds, with a sentinel at either end.
    critical: Vec<i64>,
    num_critical: usize,
    /// Links from each critical bound to the next one with free capacity.
    tree: Vec<usize>,
    /// Links from each critical bound to the end of the Hall interval containing it.
    hall: Vec<usize>,
    capacity: Vec<i64>,
}

impl HallIntervals {
    fn new(bounds: &[Interval]) -> HallIntervals {
        let n = bounds.len();
        let min: Vec<i64> = bounds.iter().map(|interval| interval.min as i64).collect();
        let max: Vec<i64> = bounds.iter().map(|interval| interval.max as i64 + 1).collect();

        let mut min_sorted: Vec<usize> = (0..n).collect();
        min_sorted.sort_by_key(|&index| min[index]);
        let mut max_sorted: Vec<usize> = (0..n).collect();
        max_sorted.sort_by_key(|&index| max[index]);

        let mut hall_intervals = HallIntervals {
            min,
            max,
            min_rank: vec![0; n],
            max_rank: vec![0; n],
            min_sorted,
            max_sorted,
            critical: vec![0; 2 * n + 2],
            num_critical: 0,
            tree: vec![0; 2 * n + 2],
            hall: vec![0; 2 * n + 2],
            capacity: vec![0; 2 * n + 2],
        };
        hall_intervals.rank_bounds();
        hall_intervals
    }

    /// Merges the lower and (exclusive) upper bounds into the critical bounds, and records for
    /// every variable the rank of its bounds in that sequence.
    fn rank_bounds(&mut self) {
        let n = self.min.len();

        let mut current_min = self.min[self.min_sorted[0]];
        let mut current_max = self.max[self.max_sorted[0]];
        let mut last = current_min - 2;
        self.critical[0] = last;

        let mut num_critical = 0;
        let (mut i, mut j) = (0, 0);
        loop {
            if i < n && current_min <= current_max {
                if current_min != last {
                    num_critical += 1;
                    last = current_min;
                    self.critical[num_critical] = last;
                }
                self.min_rank[self.min_sorted[i]] = num_critical;
                i += 1;
                if i < n {
                    current_min = self.min[self.min_sorted[i]];
                }
            } else {
                if current_max != last {
                    num_critical += 1;
                    last = current_max;
                    self.critical[num_critical] = last;
                }
                self.max_rank[self.max_sorted[j]] = num_critical;
                j += 1;
                if j == n {
                    break;
                }
                current_max = self.max[self.max_sorted[j]];
            }
        }

        self.num_critical = num_critical;
        self.critical[num_critical + 1] = self.critical[num_critical] + 2;
    }

    /// Raises the lower bounds past the Hall intervals below them. Returns false if some Hall
    /// interval contains more variables than values.
    fn update_lower_bounds(&mut self) -> bool {
        for k in 1..=self.num_critical + 1 {
            self.tree[k] = k - 1;
            self.hall[k] = k - 1;
            self.capacity[k] = self.critical[k] - self.critical[k - 1];
        }

        for position in 0..self.max_sorted.len() {
            let var = self.max_sorted[position];
            let x = self.min_rank[var];
            let y = self.max_rank[var];

            let mut z = path_max(&self.tree, x + 1);
            let j = self.tree[z];
            self.capacity[z] -= 1;
            if self.capacity[z] == 0 {
                self.tree[z] = z + 1;
                z = path_max(&self.tree, self.tree[z]);
                self.tree[z] = j;
            }
            path_set(&mut self.tree, x + 1, z, z);

            if self.capacity[z] < self.critical[z] - self.critical[y] {
                return false;
            }

            if self.hall[x] > x {
                let w = path_max(&self.hall, self.hall[x]);
                self.min[var] = self.critical[w];
                path_set(&mut self.hall, x, w, w);
            }

            if self.capacity[z] == self.critical[z] - self.critical[y] {
                let start = self.hall[y];
                path_set(&mut self.hall, start, j - 1, y);
                self.hall[y] = j - 1;
            }
        }

        true
    }

    /// The mirror image of [`HallIntervals::update_lower_bounds`].
    fn update_upper_bounds(&mut self) -> bool {
        for k in 0..=self.num_critical {
            self.tree[k] = k + 1;
            self.hall[k] = k + 1;
            self.capacity[k] = self.critical[k + 1] - self.critical[k];
        }

        for position in (0..self.min_sorted.len()).rev() {
            let var = self.min_sorted[position];
            let x = self.max_rank[var];
            let y = self.min_rank[var];

            let mut z = path_min(&self.tree, x - 1);
            let j = self.tree[z];
            self.capacity[z] -= 1;
            if self.capacity[z] == 0 {
                self.tree[z] = z - 1;
                z = path_min(&self.tree, self.tree[z]);
                self.tree[z] = j;
            }
            path_set(&mut self.tree, x - 1, z, z);

            if self.capacity[z] < self.critical[y] - self.critical[z] {
                return false;
            }

            if self.hall[x] < x {
                let w = path_min(&self.hall, self.hall[x]);
                self.max[var] = self.critical[w];
                path_set(&mut self.hall, x, w, w);
            }

            if self.capacity[z] == self.critical[y] - self.critical[z] {
                let start = self.hall[y];
                path_set(&mut self.hall, start, j + 1, y);
                self.hall[y] = j + 1;
            }
        }

        true
    }

    /// The narrowed inclusive bounds of the variable at `index`.
    fn bounds_of(&self, index: usize) -> (i32, i32) {
        // Both bounds lie within the original interval of the variable, so they fit in an i32.
        (self.min[index] as i32, (self.max[index] - 1) as i32)
    }
}

/// Follows the links from `start` until reaching a node which does not link upwards.
fn path_max(links: &[usize], start: usize) -> usize {
    let mut node = start;
    while links[node] > node {
        node = links[node];
    }
    node
}

/// Follows the links from `start` until reaching a node which does not link downwards.
fn path_min(links: &[usize], start: usize) -> usize {
    let mut node = start;
    while links[node] < node {
        node = links[node];
    }
    node
}

/// Points every node on the path from `start` up to (excluding) `end` at `target`.
fn path_set(links: &mut [usize], start: usize, end: usize, target: usize) {
    let mut next = start;
    while next != end {
        let node = next;
        next = links[node];
        links[node] = target;
    }
}
