use super::variables::DomainId;
use super::variables::VariableId;
use super::variables::VariableView;
use crate::basic_types::Interval;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::Bound;

/// Owns the shared domains, both as they were defined when modelling and as they currently are
/// during search, together with the mapping from variables to shared domains.
#[derive(Clone, Debug, Default)]
pub(crate) struct DomainStore {
    initial: KeyedVec<DomainId, Interval>,
    current: KeyedVec<DomainId, Interval>,
    variables: KeyedVec<VariableId, VariableView>,
}

impl DomainStore {
    pub(crate) fn num_domains(&self) -> usize {
        self.current.len()
    }

    pub(crate) fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub(crate) fn new_domain(&mut self, interval: Interval) -> DomainId {
        let _ = self.initial.push(interval);
        self.current.push(interval)
    }

    pub(crate) fn new_variable(&mut self, domain: DomainId, offset: i32) -> VariableId {
        self.variables.push(VariableView { domain, offset })
    }

    pub(crate) fn contains_domain(&self, domain: DomainId) -> bool {
        domain.index() < self.current.len()
    }

    pub(crate) fn contains_variable(&self, variable: VariableId) -> bool {
        variable.index() < self.variables.len()
    }

    pub(crate) fn view(&self, variable: VariableId) -> VariableView {
        self.variables[variable]
    }

    pub(crate) fn domain(&self, domain: DomainId) -> Interval {
        self.current[domain]
    }

    pub(crate) fn initial_domain(&self, domain: DomainId) -> Interval {
        self.initial[domain]
    }

    /// The bounds of a variable, i.e. the bounds of its shared domain shifted by its offset.
    pub(crate) fn bounds(&self, variable: VariableId) -> Interval {
        let view = self.variables[variable];
        self.current[view.domain].shifted(view.offset)
    }

    pub(crate) fn domains(&self) -> &[Interval] {
        self.current.as_slice()
    }

    pub(crate) fn domain_ids(&self) -> impl Iterator<Item = DomainId> {
        self.current.keys()
    }

    /// Narrows `bound` of the shared domain towards `value`; the domain is never widened.
    ///
    /// Returns whether the domain changed. The domain may become empty, which the caller has to
    /// check.
    pub(crate) fn tighten(&mut self, domain: DomainId, bound: Bound, value: i32) -> bool {
        self.current[domain].tighten(bound, value)
    }

    /// Narrows a shared domain to the given interval, reporting which bounds changed.
    pub(crate) fn tighten_to(&mut self, domain: DomainId, interval: Interval) -> (bool, bool) {
        let current = &mut self.current[domain];
        (
            current.tighten_min(interval.min),
            current.tighten_max(interval.max),
        )
    }

    pub(crate) fn is_empty(&self, domain: DomainId) -> bool {
        self.current[domain].is_empty()
    }

    pub(crate) fn any_empty(&self) -> bool {
        self.current.iter().any(Interval::is_empty)
    }

    pub(crate) fn all_fixed(&self) -> bool {
        self.current.iter().all(Interval::is_fixed)
    }

    /// The value of every variable, provided that every shared domain is a singleton.
    pub(crate) fn values(&self) -> Option<Vec<i32>> {
        if !self.all_fixed() {
            return None;
        }

        Some(
            self.variables
                .iter()
                .map(|view| self.current[view.domain].min + view.offset)
                .collect(),
        )
    }

    /// Narrows the initial (and current) shared domain of `domain` to `interval`.
    pub(crate) fn restrict_initial(&mut self, domain: DomainId, interval: Interval) {
        let _ = self.initial[domain].tighten_min(interval.min);
        let _ = self.initial[domain].tighten_max(interval.max);
        let _ = self.tighten_to(domain, interval);
    }

    /// Restores the current shared domains to the initial ones.
    pub(crate) fn reset(&mut self) {
        self.current.clone_from(&self.initial);
    }

    pub(crate) fn restore(&mut self, snapshot: &[Interval]) {
        self.current.copy_from_slice(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_variables_alias_their_shared_domain() {
        let mut store = DomainStore::default();
        let domain = store.new_domain(Interval::new(0, 3));
        let x = store.new_variable(domain, 0);
        let y = store.new_variable(domain, 2);

        assert_eq!(store.bounds(x), Interval::new(0, 3));
        assert_eq!(store.bounds(y), Interval::new(2, 5));

        assert!(store.tighten(domain, Bound::Max, 1));

        assert_eq!(store.bounds(y), Interval::new(2, 3));
    }

    #[test]
    fn values_are_only_available_when_all_domains_are_fixed() {
        let mut store = DomainStore::default();
        let domain = store.new_domain(Interval::new(0, 1));
        let _ = store.new_variable(domain, 0);
        let _ = store.new_variable(domain, -4);

        assert_eq!(store.values(), None);

        let _ = store.tighten(domain, Bound::Min, 1);

        assert_eq!(store.values(), Some(vec![1, -3]));
    }

    #[test]
    fn reset_restores_initial_domains() {
        let mut store = DomainStore::default();
        let a = store.new_domain(Interval::new(0, 9));
        let b = store.new_domain(Interval::new(-5, 5));

        let _ = store.tighten(a, Bound::Min, 4);
        let _ = store.tighten_to(b, Interval::new(8, 2));
        assert!(store.any_empty());

        store.reset();

        assert_eq!(store.domains(), &[Interval::new(0, 9), Interval::new(-5, 5)]);
    }

    #[test]
    fn restricted_initial_domains_survive_a_reset() {
        let mut store = DomainStore::default();
        let a = store.new_domain(Interval::new(0, 9));

        store.restrict_initial(a, Interval::new(3, 5));
        let _ = store.tighten(a, Bound::Min, 5);
        store.reset();

        assert_eq!(store.domain(a), Interval::new(3, 5));
        assert_eq!(store.initial_domain(a), Interval::new(3, 5));
    }
}
