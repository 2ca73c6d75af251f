use enumset::EnumSet;

use super::domain_store::DomainStore;
use super::propagator_table::PropagatorTable;
use super::variables::Bound;
use super::variables::DomainId;
use super::variables::PropagatorId;
use super::variables::VariableId;
use crate::basic_types::Interval;
use crate::basic_types::ProblemBuildError;
use crate::containers::StorageKey;
use crate::propagators::Algorithm;

/// A constraint satisfaction problem: shared domains, the variables aliasing them and the
/// propagators posted over those variables.
///
/// A problem is built once and then handed to a [`crate::Solver`]. Every build method validates
/// its input, so that nothing can go wrong structurally while solving.
///
/// # Example
/// ```
/// # use gourd_core::Algorithm;
/// # use gourd_core::Problem;
/// let mut problem = Problem::new([0..=2, 0..=2]);
/// let x = problem.variable(0);
/// let y = problem.variable(1);
/// // y is an alias of x shifted by one
/// let y_alias = problem.add_offset_variable(problem.domain_of(x), 1).unwrap();
///
/// let _ = problem
///     .add_propagator(&[y, y_alias], Algorithm::AllDifferent, &[])
///     .unwrap();
/// assert_eq!(problem.num_variables(), 3);
/// assert_eq!(problem.num_domains(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Problem {
    pub(crate) domains: DomainStore,
    pub(crate) propagators: PropagatorTable,
}

impl Problem {
    /// Creates a problem with one shared domain per given interval, each with one variable
    /// (without offset) whose id equals the position of the interval.
    pub fn new<I: Into<Interval>>(shared_domains: impl IntoIterator<Item = I>) -> Problem {
        let mut problem = Problem::default();
        let _ = problem.add_variables(shared_domains);
        problem
    }

    /// Adds a new shared domain and a variable for it.
    pub fn add_variable(&mut self, domain: impl Into<Interval>) -> VariableId {
        let domain = self.domains.new_domain(domain.into());
        self.propagators.grow_domains(self.domains.num_domains());
        self.domains.new_variable(domain, 0)
    }

    pub fn add_variables<I: Into<Interval>>(
        &mut self,
        domains: impl IntoIterator<Item = I>,
    ) -> Vec<VariableId> {
        domains
            .into_iter()
            .map(|domain| self.add_variable(domain))
            .collect()
    }

    /// Adds a variable which takes the value of the shared domain `domain` plus `offset`.
    ///
    /// Every value of the variable has to be representable, so the offset is rejected if it
    /// shifts either bound of the initial domain out of the range of an `i32`.
    pub fn add_offset_variable(
        &mut self,
        domain: DomainId,
        offset: i32,
    ) -> Result<VariableId, ProblemBuildError> {
        if !self.domains.contains_domain(domain) {
            return Err(ProblemBuildError::DomainOutOfRange {
                index: domain.index(),
                num_domains: self.domains.num_domains(),
            });
        }

        let initial = self.domains.initial_domain(domain);
        if initial.min.checked_add(offset).is_none() || initial.max.checked_add(offset).is_none() {
            return Err(ProblemBuildError::OffsetOutOfRange {
                min: initial.min,
                max: initial.max,
                offset,
            });
        }

        Ok(self.domains.new_variable(domain, offset))
    }

    /// Posts a propagator over `variables`.
    ///
    /// The number of variables and the parameters are checked against the requirements of the
    /// algorithm (see [`Algorithm`]) using the initial domains of the variables.
    pub fn add_propagator(
        &mut self,
        variables: &[VariableId],
        algorithm: Algorithm,
        parameters: &[i32],
    ) -> Result<PropagatorId, ProblemBuildError> {
        if let Some(&variable) = variables
            .iter()
            .find(|&&variable| !self.domains.contains_variable(variable))
        {
            return Err(ProblemBuildError::VariableOutOfRange {
                index: variable.index(),
                num_variables: self.domains.num_variables(),
            });
        }

        let views: Vec<_> = variables
            .iter()
            .map(|&variable| self.domains.view(variable))
            .collect();
        let initial_bounds: Vec<Interval> = views
            .iter()
            .map(|view| self.domains.initial_domain(view.domain).shifted(view.offset))
            .collect();
        algorithm.validate(&initial_bounds, parameters)?;

        Ok(self.propagators.add(algorithm, &views, parameters))
    }

    /// The value of every variable, if every shared domain is fixed to a single value.
    pub fn get_values(&self) -> Option<Vec<i32>> {
        self.domains.values()
    }

    /// Narrows the current shared domain of `variable` so that the variable is at least
    /// `value`. Returns whether the domain changed; a domain is never widened.
    pub fn set_min_value(&mut self, variable: VariableId, value: i32) -> bool {
        let view = self.domains.view(variable);
        self.domains
            .tighten(view.domain, Bound::Min, value.saturating_sub(view.offset))
    }

    /// Narrows the current shared domain of `variable` so that the variable is at most `value`.
    /// Returns whether the domain changed; a domain is never widened.
    pub fn set_max_value(&mut self, variable: VariableId, value: i32) -> bool {
        let view = self.domains.view(variable);
        self.domains
            .tighten(view.domain, Bound::Max, value.saturating_sub(view.offset))
    }

    /// Narrows the initial domain of the shared domain of `variable` such that the variable lies
    /// within `[min, max]`. Unlike [`Problem::set_min_value`] this is kept by [`Problem::reset`].
    pub fn restrict_initial_domain(
        &mut self,
        variable: VariableId,
        min: i32,
        max: i32,
    ) -> Result<(), ProblemBuildError> {
        if !self.domains.contains_variable(variable) {
            return Err(ProblemBuildError::VariableOutOfRange {
                index: variable.index(),
                num_variables: self.domains.num_variables(),
            });
        }

        let view = self.domains.view(variable);
        let initial = self.domains.initial_domain(view.domain);
        let restriction =
            Interval::new(min.saturating_sub(view.offset), max.saturating_sub(view.offset));
        let restricted = Interval::new(
            initial.min.max(restriction.min),
            initial.max.min(restriction.max),
        );
        if restricted.is_empty() {
            return Err(ProblemBuildError::EmptyRestriction {
                min: initial.min.saturating_add(view.offset),
                max: initial.max.saturating_add(view.offset),
            });
        }

        self.domains.restrict_initial(view.domain, restricted);
        Ok(())
    }

    /// Restores the current shared domains to the initial ones.
    pub fn reset(&mut self) {
        self.domains.reset();
    }

    pub fn num_variables(&self) -> usize {
        self.domains.num_variables()
    }

    pub fn num_domains(&self) -> usize {
        self.domains.num_domains()
    }

    pub fn num_propagators(&self) -> usize {
        self.propagators.num_propagators()
    }

    /// The variable with the given index.
    ///
    /// # Panics
    /// If there is no such variable.
    pub fn variable(&self, index: usize) -> VariableId {
        assert!(index < self.num_variables(), "variable {index} does not exist");
        VariableId::create_from_index(index)
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableId> {
        (0..self.num_variables()).map(VariableId::create_from_index)
    }

    pub fn domain_of(&self, variable: VariableId) -> DomainId {
        self.domains.view(variable).domain
    }

    pub fn offset_of(&self, variable: VariableId) -> i32 {
        self.domains.view(variable).offset
    }

    /// The current bounds of a variable.
    pub fn bounds(&self, variable: VariableId) -> Interval {
        self.domains.bounds(variable)
    }

    /// The current interval of a shared domain.
    pub fn domain(&self, domain: DomainId) -> Interval {
        self.domains.domain(domain)
    }

    pub fn initial_domain(&self, domain: DomainId) -> Interval {
        self.domains.initial_domain(domain)
    }

    pub fn domain_ids(&self) -> impl Iterator<Item = DomainId> {
        self.domains.domain_ids()
    }

    pub fn algorithm(&self, propagator: PropagatorId) -> Algorithm {
        self.propagators.algorithm(propagator)
    }

    /// The bounds on which the propagator is triggered, per variable position.
    pub fn propagator_triggers(&self, propagator: PropagatorId) -> &[EnumSet<Bound>] {
        self.propagators.triggers(propagator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_are_created_per_shared_domain() {
        let problem = Problem::new([Interval::new(0, 3), Interval::singleton(5)]);

        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_domains(), 2);
        assert_eq!(problem.bounds(problem.variable(1)), Interval::new(5, 5));
    }

    #[test]
    fn offset_variable_of_unknown_domain_is_rejected() {
        let mut problem = Problem::new([0..=3]);

        assert_eq!(
            problem.add_offset_variable(DomainId::new(4), 1),
            Err(ProblemBuildError::DomainOutOfRange {
                index: 4,
                num_domains: 1
            })
        );
    }

    #[test]
    fn offset_leaving_the_i32_range_is_rejected() {
        let mut problem = Problem::new([i32::MIN..=i32::MIN + 1, i32::MAX - 1..=i32::MAX]);
        let low = problem.variable(0);
        let high = problem.variable(1);

        assert_eq!(
            problem.add_offset_variable(problem.domain_of(low), -1),
            Err(ProblemBuildError::OffsetOutOfRange {
                min: i32::MIN,
                max: i32::MIN + 1,
                offset: -1
            })
        );
        assert!(problem
            .add_offset_variable(problem.domain_of(high), 1)
            .is_err());
        assert_eq!(problem.num_variables(), 2);

        let shifted = problem.add_offset_variable(problem.domain_of(low), 1).unwrap();
        assert_eq!(problem.bounds(shifted), Interval::new(i32::MIN + 1, i32::MIN + 2));
    }

    #[test]
    fn propagator_over_unknown_variable_is_rejected() {
        let mut problem = Problem::new([0..=3]);
        let x = problem.variable(0);

        let result = problem.add_propagator(&[x, VariableId::new(7)], Algorithm::AllDifferent, &[]);

        assert_eq!(
            result,
            Err(ProblemBuildError::VariableOutOfRange {
                index: 7,
                num_variables: 1
            })
        );
        assert_eq!(problem.num_propagators(), 0);
    }

    #[test]
    fn and_requires_boolean_variables_including_offsets() {
        let mut problem = Problem::new([0..=1, 0..=1]);
        let a = problem.variable(0);
        let b = problem.variable(1);
        let shifted = problem.add_offset_variable(problem.domain_of(b), 1).unwrap();

        assert!(problem.add_propagator(&[a, b], Algorithm::AndEq, &[]).is_ok());
        assert!(problem
            .add_propagator(&[a, shifted], Algorithm::AndEq, &[])
            .is_err());
    }

    #[test]
    fn bounds_are_set_through_offsets() {
        let mut problem = Problem::new([0..=10]);
        let x = problem.variable(0);
        let y = problem.add_offset_variable(problem.domain_of(x), 3).unwrap();

        assert!(problem.set_min_value(y, 5));
        assert!(problem.set_max_value(y, 9));
        assert!(!problem.set_max_value(y, 12));

        assert_eq!(problem.bounds(x), Interval::new(2, 6));
        assert_eq!(problem.bounds(y), Interval::new(5, 9));
    }

    #[test]
    fn initial_restriction_survives_reset_but_current_bounds_do_not() {
        let mut problem = Problem::new([0..=10]);
        let x = problem.variable(0);

        problem.restrict_initial_domain(x, 2, 20).unwrap();
        let _ = problem.set_min_value(x, 8);
        problem.reset();

        assert_eq!(problem.bounds(x), Interval::new(2, 10));
        assert_eq!(
            problem.restrict_initial_domain(x, 11, 12),
            Err(ProblemBuildError::EmptyRestriction { min: 2, max: 10 })
        );
    }

    #[test]
    fn values_are_reported_once_fixed() {
        let mut problem = Problem::new([0..=1]);
        let x = problem.variable(0);
        let _ = problem.add_offset_variable(problem.domain_of(x), -1).unwrap();

        assert_eq!(problem.get_values(), None);
        let _ = problem.set_min_value(x, 1);
        assert_eq!(problem.get_values(), Some(vec![1, 0]));
    }
}
