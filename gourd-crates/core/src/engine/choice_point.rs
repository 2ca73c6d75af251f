use super::variables::Bound;
use super::variables::DomainId;
use crate::basic_types::Interval;
use crate::basic_types::SolverError;
use crate::containers::StorageKey;

/// The branch to take when backtracking to a choice point: `bound` of `domain` is tightened to
/// `value`, after the shared domains have been restored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Branch {
    pub(crate) domain: DomainId,
    pub(crate) bound: Bound,
    pub(crate) value: i32,
}

#[derive(Clone, Debug)]
pub(crate) struct ChoicePoint {
    pub(crate) domains: Vec<Interval>,
    pub(crate) entailed: Vec<bool>,
    pub(crate) alternative: Branch,
}

/// A stack of choice points whose snapshots are stored in an arena indexed by depth.
///
/// Slots are allocated the first time a depth is reached and reused afterwards, so popping and
/// pushing again does not allocate. The depth is limited by a fixed capacity.
#[derive(Clone, Debug)]
pub(crate) struct ChoicePointStack {
    arena: Vec<ChoicePoint>,
    depth: usize,
    capacity: usize,
}

impl ChoicePointStack {
    pub(crate) fn with_capacity(capacity: usize) -> ChoicePointStack {
        ChoicePointStack {
            arena: Vec::new(),
            depth: 0,
            capacity,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Stores a snapshot of the shared domains and entailment flags, together with the branch
    /// to take when this choice point is popped.
    pub(crate) fn push(
        &mut self,
        domains: &[Interval],
        entailed: &[bool],
        alternative: Branch,
    ) -> Result<(), SolverError> {
        if self.depth == self.capacity {
            return Err(SolverError::ChoicePointOverflow {
                capacity: self.capacity,
            });
        }

        if self.depth == self.arena.len() {
            self.arena.push(ChoicePoint {
                domains: domains.to_vec(),
                entailed: entailed.to_vec(),
                alternative,
            });
        } else {
            let slot = &mut self.arena[self.depth];
            slot.domains.clear();
            slot.domains.extend_from_slice(domains);
            slot.entailed.clear();
            slot.entailed.extend_from_slice(entailed);
            slot.alternative = alternative;
        }

        self.depth += 1;
        Ok(())
    }

    /// Removes the top choice point; its slot stays valid until the next push.
    pub(crate) fn pop(&mut self) -> Option<&ChoicePoint> {
        if self.depth == 0 {
            return None;
        }

        self.depth -= 1;
        Some(&self.arena[self.depth])
    }

    /// Tightens `bound` of `domain` in every stored snapshot, such that backtracking can never
    /// restore values beyond `value`.
    pub(crate) fn tighten_all(&mut self, domain: DomainId, bound: Bound, value: i32) {
        for choice_point in &mut self.arena[..self.depth] {
            let _ = choice_point.domains[domain.index()].tighten(bound, value);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(value: i32) -> Branch {
        Branch {
            domain: DomainId::new(0),
            bound: Bound::Min,
            value,
        }
    }

    #[test]
    fn popped_snapshots_are_restored_verbatim() {
        let mut stack = ChoicePointStack::with_capacity(4);
        let domains = [Interval::new(0, 5), Interval::new(2, 2)];

        stack.push(&domains, &[false, true], branch(1)).unwrap();
        stack
            .push(&[Interval::new(1, 5), Interval::new(2, 2)], &[true, true], branch(2))
            .unwrap();

        assert_eq!(stack.pop().unwrap().alternative, branch(2));
        let bottom = stack.pop().unwrap();
        assert_eq!(bottom.domains, domains);
        assert_eq!(bottom.entailed, vec![false, true]);
        assert!(stack.pop().is_none());
    }

    #[test]
    fn exceeding_the_capacity_is_an_error() {
        let mut stack = ChoicePointStack::with_capacity(1);
        stack.push(&[Interval::new(0, 1)], &[], branch(1)).unwrap();

        assert_eq!(
            stack.push(&[Interval::new(0, 1)], &[], branch(1)),
            Err(SolverError::ChoicePointOverflow { capacity: 1 })
        );
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn slots_are_reused_after_popping() {
        let mut stack = ChoicePointStack::with_capacity(2);
        stack.push(&[Interval::new(0, 9)], &[], branch(1)).unwrap();
        let _ = stack.pop();
        stack.push(&[Interval::new(3, 4)], &[], branch(5)).unwrap();

        assert_eq!(stack.arena.len(), 1);
        let top = stack.pop().unwrap();
        assert_eq!(top.domains, vec![Interval::new(3, 4)]);
        assert_eq!(top.alternative.value, 5);
    }

    #[test]
    fn tightening_only_affects_stored_snapshots() {
        let mut stack = ChoicePointStack::with_capacity(3);
        stack.push(&[Interval::new(0, 9)], &[], branch(1)).unwrap();
        stack.push(&[Interval::new(0, 7)], &[], branch(1)).unwrap();
        let _ = stack.pop();

        stack.tighten_all(DomainId::new(0), Bound::Max, 4);

        assert_eq!(stack.arena[0].domains, vec![Interval::new(0, 4)]);
        assert_eq!(stack.arena[1].domains, vec![Interval::new(0, 7)]);
    }
}
