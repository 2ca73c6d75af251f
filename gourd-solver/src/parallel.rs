//! Solves one problem with several independent solvers.
//!
//! The initial domain of a split variable is partitioned into disjoint, contiguous ranges; every
//! worker receives a copy of the problem restricted to one range and searches it with a private
//! [`Solver`] on its own thread. Workers report back over a channel, and only solutions and the
//! final statistics are shared.
//!
//! ```
//! # use gourd_solver::parallel::ParallelSolver;
//! # use gourd_solver::problems::NQueens;
//! let queens = NQueens::new(8).unwrap();
//! let split_variable = queens.queens[0];
//!
//! let outcome = ParallelSolver::new(queens.problem, split_variable, 4)
//!     .unwrap()
//!     .solve()
//!     .unwrap();
//! assert_eq!(outcome.num_solutions, 92);
//! ```
use std::fmt::Debug;
use std::fmt::Formatter;
use std::thread;

use crossbeam::channel;
use crossbeam::channel::Sender;
use gourd_core::branching::Brancher;
use gourd_core::containers::StorageKey;
use gourd_core::options::SolverOptions;
use gourd_core::Interval;
use gourd_core::Problem;
use gourd_core::ProblemBuildError;
use gourd_core::Solution;
use gourd_core::Solver;
use gourd_core::SolverError;
use gourd_core::SolverStatistics;
use gourd_core::VariableId;
use log::debug;
use log::warn;
use thiserror::Error;

/// Creates the brancher of a worker from the worker's (restricted) problem.
pub type BrancherFactory = dyn Fn(&Problem) -> Box<dyn Brancher> + Send + Sync;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParallelError {
    #[error("at least one worker is needed")]
    NoWorkers,
    #[error("the split variable cannot be partitioned: {0}")]
    Partition(#[from] ProblemBuildError),
    #[error("worker {worker} failed: {error}")]
    Worker { worker: usize, error: SolverError },
}

/// What a worker reports to the orchestrator.
#[derive(Clone, Debug)]
pub enum WorkerMessage {
    Solution {
        worker: usize,
        solution: Solution,
    },
    /// The worker exhausted its part of the search space, or stopped early.
    Finished {
        worker: usize,
        statistics: SolverStatistics,
    },
    Failed {
        worker: usize,
        error: SolverError,
        statistics: SolverStatistics,
    },
}

/// The combined result of all workers.
#[derive(Clone, Debug, Default)]
pub struct ParallelOutcome {
    /// The solutions in the order in which they were received.
    pub solutions: Vec<Solution>,
    pub num_solutions: u64,
    /// The sum of the statistics of all workers (the maximum for the choice depth).
    pub statistics: SolverStatistics,
    pub worker_statistics: Vec<SolverStatistics>,
}

pub struct ParallelSolver {
    problem: Problem,
    split_variable: VariableId,
    num_workers: usize,
    options: SolverOptions,
    solution_limit: Option<u64>,
    brancher_factory: Option<Box<BrancherFactory>>,
}

impl Debug for ParallelSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelSolver")
            .field("problem", &self.problem)
            .field("split_variable", &self.split_variable)
            .field("num_workers", &self.num_workers)
            .field("options", &self.options)
            .field("solution_limit", &self.solution_limit)
            .finish_non_exhaustive()
    }
}

impl ParallelSolver {
    pub fn new(
        problem: Problem,
        split_variable: VariableId,
        num_workers: usize,
    ) -> Result<ParallelSolver, ParallelError> {
        if num_workers == 0 {
            return Err(ParallelError::NoWorkers);
        }
        if split_variable.index() >= problem.num_variables() {
            return Err(ProblemBuildError::VariableOutOfRange {
                index: split_variable.index(),
                num_variables: problem.num_variables(),
            }
            .into());
        }

        Ok(ParallelSolver {
            problem,
            split_variable,
            num_workers,
            options: SolverOptions::default(),
            solution_limit: None,
            brancher_factory: None,
        })
    }

    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Stops all workers once this many solutions have been received.
    pub fn with_solution_limit(mut self, limit: u64) -> Self {
        self.solution_limit = Some(limit);
        self
    }

    /// Uses a custom brancher in every worker instead of [`Solver::default_brancher`].
    pub fn with_brancher_factory(
        mut self,
        factory: impl Fn(&Problem) -> Box<dyn Brancher> + Send + Sync + 'static,
    ) -> Self {
        self.brancher_factory = Some(Box::new(factory));
        self
    }

    /// The ranges of the split variable assigned to the workers.
    ///
    /// The initial bounds are divided into at most `num_workers` contiguous ranges whose sizes
    /// differ by at most one; there are fewer ranges if the variable has fewer values.
    pub fn partitions(&self) -> Vec<Interval> {
        let domain = self.problem.domain_of(self.split_variable);
        let bounds = self
            .problem
            .initial_domain(domain)
            .shifted(self.problem.offset_of(self.split_variable));
        partition(bounds, self.num_workers)
    }

    pub fn solve(&self) -> Result<ParallelOutcome, ParallelError> {
        let partitions = self.partitions();
        if partitions.is_empty() {
            warn!("The split variable has an empty domain, no workers are started");
            return Ok(ParallelOutcome::default());
        }

        let mut problems = Vec::with_capacity(partitions.len());
        for range in &partitions {
            let mut problem = self.problem.clone();
            problem.restrict_initial_domain(self.split_variable, range.min, range.max)?;
            problems.push(problem);
        }

        let (sender, receiver) = channel::unbounded();
        let mut outcome = ParallelOutcome {
            worker_statistics: vec![SolverStatistics::default(); problems.len()],
            ..ParallelOutcome::default()
        };
        let mut failure = None;

        thread::scope(|scope| {
            for (worker, problem) in problems.into_iter().enumerate() {
                let sender = sender.clone();
                debug!("starting worker {worker} on {}", partitions[worker]);
                let _ = scope.spawn(move || self.run_worker(worker, problem, sender));
            }
            drop(sender);

            for message in receiver.iter() {
                match message {
                    WorkerMessage::Solution { solution, .. } => {
                        outcome.num_solutions += 1;
                        outcome.solutions.push(solution);
                        if self.limit_reached(outcome.num_solutions) {
                            debug!("solution limit reached, stopping the workers");
                            break;
                        }
                    }
                    WorkerMessage::Finished { worker, statistics } => {
                        outcome.worker_statistics[worker] = statistics;
                    }
                    WorkerMessage::Failed {
                        worker,
                        error,
                        statistics,
                    } => {
                        warn!("worker {worker} failed: {error}");
                        outcome.worker_statistics[worker] = statistics;
                        let _ = failure.get_or_insert(ParallelError::Worker { worker, error });
                    }
                }
            }
            // Workers notice the hang-up when sending their next message.
            drop(receiver);
        });

        if let Some(error) = failure {
            return Err(error);
        }

        for statistics in &outcome.worker_statistics {
            outcome.statistics += statistics;
        }
        Ok(outcome)
    }

    fn limit_reached(&self, num_solutions: u64) -> bool {
        self.solution_limit
            .is_some_and(|limit| num_solutions >= limit)
    }

    fn run_worker(&self, worker: usize, problem: Problem, sender: Sender<WorkerMessage>) {
        let mut solver = Solver::with_options(problem, self.options);
        if let Some(factory) = &self.brancher_factory {
            let brancher = factory(solver.problem());
            solver = solver.with_brancher(brancher);
        }

        let mut num_solutions = 0;
        let result = loop {
            match solver.solve_one() {
                Ok(Some(solution)) => {
                    num_solutions += 1;
                    let message = WorkerMessage::Solution { worker, solution };
                    if sender.send(message).is_err() || self.limit_reached(num_solutions) {
                        break Ok(());
                    }
                }
                Ok(None) => break Ok(()),
                Err(error) => break Err(error),
            }
        };

        let statistics = *solver.statistics();
        let message = match result {
            Ok(()) => WorkerMessage::Finished { worker, statistics },
            Err(error) => WorkerMessage::Failed {
                worker,
                error,
                statistics,
            },
        };
        // The orchestrator may already have stopped listening.
        let _ = sender.send(message);
    }
}

/// Splits `bounds` into at most `parts` contiguous, non-empty ranges which cover it exactly.
fn partition(bounds: Interval, parts: usize) -> Vec<Interval> {
    if bounds.is_empty() || parts == 0 {
        return Vec::new();
    }

    let size = bounds.size();
    let parts = (parts as u64).min(size);
    let (base, remainder) = (size / parts, size % parts);

    let mut ranges = Vec::with_capacity(parts as usize);
    let mut min = i64::from(bounds.min);
    for part in 0..parts {
        let length = base + u64::from(part < remainder);
        let max = min + length as i64 - 1;
        // Every range lies within `bounds`, so the conversions cannot fail.
        ranges.push(Interval::new(min as i32, max as i32));
        min = max + 1;
    }
    ranges
}
