use rand::rngs::SmallRng;

use crate::basic_types::Interval;
#[cfg(doc)]
use crate::branching::Brancher;
use crate::containers::StorageKey;
use crate::engine::DomainId;

/// The view of the search state given to a [`Brancher`]: the current shared domains and the
/// random generator of the solver.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    domains: &'a [Interval],
    random_generator: &'a mut SmallRng,
}

impl<'a> SelectionContext<'a> {
    pub fn new(domains: &'a [Interval], random_generator: &'a mut SmallRng) -> Self {
        SelectionContext {
            domains,
            random_generator,
        }
    }

    pub fn random(&mut self) -> &mut SmallRng {
        self.random_generator
    }

    pub fn bounds(&self, domain: DomainId) -> Interval {
        self.domains[domain.index()]
    }

    pub fn lower_bound(&self, domain: DomainId) -> i32 {
        self.domains[domain.index()].min
    }

    pub fn upper_bound(&self, domain: DomainId) -> i32 {
        self.domains[domain.index()].max
    }

    /// The number of values in the shared domain.
    pub fn get_size_of_domain(&self, domain: DomainId) -> u64 {
        self.domains[domain.index()].size()
    }

    pub fn is_fixed(&self, domain: DomainId) -> bool {
        self.domains[domain.index()].is_fixed()
    }

    /// All shared domains, in order of creation.
    pub fn domain_ids(&self) -> impl Iterator<Item = DomainId> + '_ {
        (0..self.domains.len()).map(DomainId::create_from_index)
    }
}
