use std::fmt::Debug;
use std::fmt::Formatter;

use log::debug;
use log::trace;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::choice_point::Branch;
use super::choice_point::ChoicePointStack;
use super::fixpoint::FixpointEngine;
use super::problem::Problem;
use super::shaving::ShavingEngine;
use super::solver_state::SolverState;
use super::solver_statistics::SolverStatistics;
use super::solver_statistics::StatisticKind;
use super::variables::Bound;
use super::variables::DomainId;
use super::variables::VariableId;
use crate::basic_types::FixpointStatus;
use crate::basic_types::Solution;
use crate::basic_types::SolverError;
use crate::branching::branchers::IndependentVariableValueBrancher;
use crate::branching::value_selection::InDomainMin;
use crate::branching::variable_selection::InputOrder;
use crate::branching::Brancher;
use crate::branching::Decision;
use crate::branching::SelectionContext;
use crate::gourd_assert_simple;
use crate::optimisation::OptimisationDirection;
use crate::optimisation::OptimisationMode;
use crate::options::ConsistencyAlgorithm;
use crate::options::SolverOptions;
use crate::results::SolutionIterator;
use crate::statistics::StatisticLogger;

/// A backtracking solver for a [`Problem`].
///
/// The search is an explicit loop over the [`SolverState`]: every node of the search tree is
/// propagated to a fixpoint (and optionally shaved); a node in which every shared domain is fixed
/// is a solution, otherwise the brancher splits a shared domain and a choice point with a snapshot
/// of all shared domains is pushed. On failure the most recent choice point is restored and its
/// alternative branch is taken.
///
/// # Example
/// ```
/// # use gourd_core::Algorithm;
/// # use gourd_core::Problem;
/// # use gourd_core::Solver;
/// let mut problem = Problem::new([1..=3, 1..=3, 1..=3]);
/// let variables: Vec<_> = problem.variables().collect();
/// let _ = problem
///     .add_propagator(&variables, Algorithm::AllDifferent, &[])
///     .unwrap();
///
/// let mut solver = Solver::new(problem);
/// assert_eq!(solver.solve_all().unwrap(), 6);
/// ```
pub struct Solver {
    problem: Problem,
    options: SolverOptions,
    fixpoint: FixpointEngine,
    shaving: ShavingEngine,
    choice_points: ChoicePointStack,
    brancher: Box<dyn Brancher>,
    random_generator: SmallRng,
    state: SolverState,
    statistics: SolverStatistics,
    /// The bound on the objective which every choice point has been tightened to while
    /// optimising in [`OptimisationMode::Prune`].
    objective_bound: Option<Branch>,
}

impl Debug for Solver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("problem", &self.problem)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("depth", &self.choice_points.depth())
            .field("brancher", &"<Brancher>")
            .finish()
    }
}

impl Solver {
    /// Creates a solver with the default options and [`Solver::default_brancher`].
    pub fn new(problem: Problem) -> Solver {
        Solver::with_options(problem, SolverOptions::default())
    }

    pub fn with_options(problem: Problem, options: SolverOptions) -> Solver {
        let brancher = Box::new(Solver::default_brancher(&problem));
        let num_propagators = problem.num_propagators();

        Solver {
            problem,
            options,
            fixpoint: FixpointEngine::new(num_propagators),
            shaving: ShavingEngine::default(),
            choice_points: ChoicePointStack::with_capacity(options.choice_point_capacity),
            brancher,
            random_generator: SmallRng::seed_from_u64(options.random_seed),
            state: SolverState::default(),
            statistics: SolverStatistics::default(),
            objective_bound: None,
        }
    }

    /// Replaces the branching strategy.
    pub fn with_brancher(mut self, brancher: impl Brancher + 'static) -> Solver {
        self.brancher = Box::new(brancher);
        self
    }

    /// Branches on the shared domains in order of creation, trying the lower bound first.
    pub fn default_brancher(
        problem: &Problem,
    ) -> IndependentVariableValueBrancher<InputOrder, InDomainMin> {
        let domains: Vec<DomainId> = problem.domain_ids().collect();
        IndependentVariableValueBrancher::new(InputOrder::new(&domains), InDomainMin)
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn into_problem(self) -> Problem {
        self.problem
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// The number of choice points currently on the stack.
    pub fn depth(&self) -> usize {
        self.choice_points.depth()
    }

    pub fn log_statistics(&self, statistic_logger: &StatisticLogger) {
        self.statistics.log(statistic_logger);
        self.brancher
            .log_statistics(&statistic_logger.attach_to_prefix("brancher"));
    }

    /// Continues the search until the next solution.
    ///
    /// Returns `Ok(None)` once the search space is exhausted; further calls keep returning
    /// `Ok(None)` until the solver is [reset](Solver::reset). Fails if the search needs more
    /// choice points than [`SolverOptions::choice_point_capacity`], after which the solver has
    /// to be reset as well.
    pub fn solve_one(&mut self) -> Result<Option<Solution>, SolverError> {
        loop {
            if self.state.is_ready() {
                self.state.declare_filtering();
                if self.problem.domains.any_empty() {
                    self.state.declare_exhausted();
                } else {
                    self.fixpoint.trigger_all(&self.problem);
                }
            } else if self.state.is_filtering() {
                if self.filter().is_err() {
                    self.state.declare_backtrack();
                    continue;
                }

                if let Some(values) = self.problem.get_values() {
                    let solution = Solution::new(values);
                    self.statistics.increment(StatisticKind::Solutions);
                    self.brancher.on_solution(&solution);
                    self.state.declare_solution_found();
                    debug!(
                        "solution {} at depth {}",
                        self.statistics.get(StatisticKind::Solutions),
                        self.choice_points.depth()
                    );
                    return Ok(Some(solution));
                }

                if let Err(error) = self.decide() {
                    self.state.declare_exhausted();
                    return Err(error);
                }
            } else if self.state.has_solution() || self.state.is_backtracking() {
                if self.backtrack() {
                    self.state.declare_filtering();
                } else {
                    self.state.declare_exhausted();
                }
            } else {
                return Ok(None);
            }
        }
    }

    /// Pops the most recent choice point: the shared domains and entailment flags are restored
    /// to the snapshot, after which the alternative branch is applied. Choice points whose
    /// alternative is empty are skipped.
    ///
    /// Returns false if there was no choice point left.
    pub fn backtrack(&mut self) -> bool {
        while let Some(choice_point) = self.choice_points.pop() {
            self.statistics.increment(StatisticKind::Backtracks);
            self.brancher.on_backtrack();

            self.problem.domains.restore(&choice_point.domains);
            self.fixpoint.restore_entailed(&choice_point.entailed);

            let Branch {
                domain,
                bound,
                value,
            } = choice_point.alternative;
            let _ = self.problem.domains.tighten(domain, bound, value);
            if self.problem.domains.any_empty() {
                continue;
            }

            trace!("backtracked to depth {}", self.choice_points.depth());
            self.fixpoint
                .trigger_subscribers(&self.problem, domain, bound);
            if let Some(objective) = self.objective_bound {
                self.fixpoint
                    .trigger_subscribers(&self.problem, objective.domain, objective.bound);
            }
            return true;
        }

        false
    }

    /// Iterates over the solutions, continuing from the current state of the search.
    pub fn solve(&mut self) -> SolutionIterator<'_> {
        SolutionIterator::new(self)
    }

    /// Counts the solutions from the current state of the search onwards.
    pub fn solve_all(&mut self) -> Result<u64, SolverError> {
        self.solve_all_with(|_| {})
    }

    /// Counts the solutions from the current state of the search onwards, calling `on_solution`
    /// for each.
    pub fn solve_all_with(
        &mut self,
        mut on_solution: impl FnMut(&Solution),
    ) -> Result<u64, SolverError> {
        let mut count = 0;
        while let Some(solution) = self.solve_one()? {
            on_solution(&solution);
            count += 1;
        }
        Ok(count)
    }

    /// Resets the solver and returns the first solution, if any.
    pub fn find_one(&mut self) -> Result<Option<Solution>, SolverError> {
        self.reset();
        self.solve_one()
    }

    /// Resets the solver and returns all solutions.
    pub fn find_all(&mut self) -> Result<Vec<Solution>, SolverError> {
        self.reset();
        self.solve().collect()
    }

    /// Finds a solution with the smallest value of `objective`; see [`OptimisationMode`] for how
    /// the search continues after each improving solution.
    pub fn minimize(
        &mut self,
        objective: VariableId,
        mode: OptimisationMode,
    ) -> Result<Option<Solution>, SolverError> {
        self.optimise(objective, mode, OptimisationDirection::Minimise)
    }

    /// Finds a solution with the largest value of `objective`.
    pub fn maximize(
        &mut self,
        objective: VariableId,
        mode: OptimisationMode,
    ) -> Result<Option<Solution>, SolverError> {
        self.optimise(objective, mode, OptimisationDirection::Maximise)
    }

    fn optimise(
        &mut self,
        objective: VariableId,
        mode: OptimisationMode,
        direction: OptimisationDirection,
    ) -> Result<Option<Solution>, SolverError> {
        self.reset();

        let domain = self.problem.domain_of(objective);
        let offset = self.problem.offset_of(objective);

        let mut best_solution = None;
        while let Some(solution) = self.solve_one()? {
            let objective_value = solution.value(objective);
            debug!("found solution with objective value {objective_value}");

            // The next solution has to improve on this one.
            let bound = match direction {
                OptimisationDirection::Minimise => Branch {
                    domain,
                    bound: Bound::Max,
                    value: objective_value.saturating_sub(1).saturating_sub(offset),
                },
                OptimisationDirection::Maximise => Branch {
                    domain,
                    bound: Bound::Min,
                    value: objective_value.saturating_add(1).saturating_sub(offset),
                },
            };
            best_solution = Some(solution);

            match mode {
                OptimisationMode::Reset => {
                    self.reset();
                    let _ = self
                        .problem
                        .domains
                        .tighten(bound.domain, bound.bound, bound.value);
                }
                OptimisationMode::Prune => {
                    self.choice_points
                        .tighten_all(bound.domain, bound.bound, bound.value);
                    self.objective_bound = Some(bound);
                }
            }
        }

        self.objective_bound = None;
        Ok(best_solution)
    }

    /// Restores the initial domains and clears the search state; the statistics are kept.
    pub fn reset(&mut self) {
        self.problem.reset();
        self.choice_points.clear();
        self.fixpoint.clear();
        self.state.declare_ready();
        self.objective_bound = None;
    }

    /// Establishes the configured consistency on the current node.
    fn filter(&mut self) -> FixpointStatus {
        self.fixpoint
            .propagate(&mut self.problem, &mut self.statistics)?;

        if self.options.consistency == ConsistencyAlgorithm::Shaving {
            self.shaving
                .shave(&mut self.problem, &mut self.fixpoint, &mut self.statistics)?;
        }

        Ok(())
    }

    /// Asks the brancher for a decision, pushes a choice point for its alternative and applies
    /// it.
    fn decide(&mut self) -> Result<(), SolverError> {
        let mut context =
            SelectionContext::new(self.problem.domains.domains(), &mut self.random_generator);
        let decision = self
            .brancher
            .next_decision(&mut context)
            .or_else(|| first_unfixed_domain(&context));
        let Some(decision) = decision else {
            // Every shared domain is fixed, which is handled before deciding.
            return Ok(());
        };

        let domain = decision.domain();
        gourd_assert_simple!(
            decision.splits(self.problem.domain(domain)),
            "{decision} does not split {}",
            self.problem.domain(domain)
        );

        let (alternative_bound, alternative_value) = decision.alternative();
        self.choice_points.push(
            self.problem.domains.domains(),
            self.fixpoint.entailed(),
            Branch {
                domain,
                bound: alternative_bound,
                value: alternative_value,
            },
        )?;
        self.statistics.increment(StatisticKind::Choices);
        self.statistics.record_depth(self.choice_points.depth());
        trace!("decision {decision} at depth {}", self.choice_points.depth());

        let (bound, value) = decision.commitment();
        let _ = self.problem.domains.tighten(domain, bound, value);
        self.fixpoint.trigger_subscribers(&self.problem, domain, bound);

        Ok(())
    }
}

/// The decision used when the brancher does not consider every shared domain.
fn first_unfixed_domain(context: &SelectionContext) -> Option<Decision> {
    context
        .domain_ids()
        .find(|&domain| !context.is_fixed(domain))
        .map(|domain| Decision::LessOrEqual {
            domain,
            value: context.lower_bound(domain),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Interval;
    use crate::branching::value_selection::InDomainMax;
    use crate::branching::variable_selection::FirstFail;
    use crate::propagators::Algorithm;

    fn permutation_problem(n: i32) -> Problem {
        let mut problem = Problem::new((0..n).map(|_| 1..=n));
        let variables: Vec<_> = problem.variables().collect();
        let _ = problem
            .add_propagator(&variables, Algorithm::AllDifferent, &[])
            .unwrap();
        problem
    }

    #[test]
    fn all_permutations_are_enumerated() {
        let mut solver = Solver::new(permutation_problem(4));

        assert_eq!(solver.solve_all().unwrap(), 24);
        assert!(solver.state().is_exhausted());
        assert_eq!(solver.solve_one().unwrap(), None);
    }

    #[test]
    fn solutions_come_in_lexicographic_order_with_the_default_brancher() {
        let mut solver = Solver::new(permutation_problem(3));

        let solutions: Vec<_> = solver
            .find_all()
            .unwrap()
            .into_iter()
            .map(Solution::into_values)
            .collect();

        assert_eq!(
            solutions,
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1]
            ]
        );
    }

    #[test]
    fn other_branchers_find_the_same_solutions() {
        let problem = permutation_problem(4);
        let domains: Vec<_> = problem.domain_ids().collect();
        let mut solver = Solver::new(problem).with_brancher(IndependentVariableValueBrancher::new(
            FirstFail::new(&domains),
            InDomainMax,
        ));

        let mut solutions = solver.find_all().unwrap();
        solutions.sort_by(|a, b| a.values().cmp(b.values()));
        solutions.dedup();

        assert_eq!(solutions.len(), 24);
    }

    #[test]
    fn brancher_without_decisions_falls_back_to_unfixed_domains() {
        let problem = permutation_problem(3);
        let mut solver = Solver::new(problem).with_brancher(IndependentVariableValueBrancher::new(
            InputOrder::new(&[]),
            InDomainMin,
        ));

        assert_eq!(solver.solve_all().unwrap(), 6);
    }

    #[test]
    fn empty_initial_domain_has_no_solutions() {
        let problem = Problem::new([Interval::new(0, 3), Interval::new(2, 1)]);
        let mut solver = Solver::new(problem);

        assert_eq!(solver.solve_one().unwrap(), None);
    }

    #[test]
    fn exceeding_the_choice_point_capacity_is_reported_and_recoverable() {
        let options = SolverOptions {
            choice_point_capacity: 1,
            ..SolverOptions::default()
        };
        let mut solver = Solver::with_options(permutation_problem(4), options);

        assert_eq!(
            solver.solve_one(),
            Err(SolverError::ChoicePointOverflow { capacity: 1 })
        );

        solver.reset();
        assert_eq!(solver.problem().bounds(VariableId::new(0)), Interval::new(1, 4));
        assert!(solver.state().is_ready());
    }

    #[test]
    fn reset_restarts_the_enumeration() {
        let mut solver = Solver::new(permutation_problem(3));
        let first = solver.solve_one().unwrap();
        let _ = solver.solve_one().unwrap();

        solver.reset();

        assert_eq!(solver.solve_one().unwrap(), first);
        assert!(solver.statistics().get(StatisticKind::Solutions) >= 3);
    }

    #[test]
    fn both_optimisation_modes_find_the_optimum() {
        // minimise x0 + 2 * x1 - x2 over distinct values in [1, 4], expressed through an
        // objective variable o = x0 + 2 * x1 - x2.
        let build = || {
            let mut problem = permutation_problem(4);
            let objective = problem.add_variable(-10..=20);
            let variables: Vec<_> = problem.variables().collect();
            let _ = problem
                .add_propagator(
                    &[variables[0], variables[1], variables[2], objective],
                    Algorithm::AffineEq,
                    &[1, 2, -1, -1, 0],
                )
                .unwrap();
            (problem, objective)
        };

        for mode in [OptimisationMode::Reset, OptimisationMode::Prune] {
            let (problem, objective) = build();
            let mut solver = Solver::new(problem);

            let minimum = solver.minimize(objective, mode).unwrap().unwrap();
            // x1 = 1, x0 = 2, x2 = 4
            assert_eq!(minimum.value(objective), 2 + 2 - 4);

            let maximum = solver.maximize(objective, mode).unwrap().unwrap();
            // x1 = 4, x0 = 3, x2 = 1
            assert_eq!(maximum.value(objective), 3 + 8 - 1);
        }
    }

    #[test]
    fn shaving_finds_the_same_solutions_with_fewer_choices() {
        let bounds = SolverOptions {
            consistency: ConsistencyAlgorithm::Bounds,
            ..SolverOptions::default()
        };
        let shaving = SolverOptions {
            consistency: ConsistencyAlgorithm::Shaving,
            ..SolverOptions::default()
        };

        let mut plain = Solver::with_options(permutation_problem(4), bounds);
        let mut shaved = Solver::with_options(permutation_problem(4), shaving);

        assert_eq!(plain.find_all().unwrap(), shaved.find_all().unwrap());
        assert!(
            shaved.statistics().get(StatisticKind::Choices)
                <= plain.statistics().get(StatisticKind::Choices)
        );
    }
}
