mod result;

use std::io::Write;

use clap::Parser;
use clap::Subcommand;
use gourd_solver::core::convert_case::Case;
use gourd_solver::core::optimisation::OptimisationMode;
use gourd_solver::core::options::ConsistencyAlgorithm;
use gourd_solver::core::options::SolverOptions;
use gourd_solver::core::statistics::configure_statistic_logging;
use gourd_solver::core::statistics::log_statistic_postfix;
use gourd_solver::core::statistics::StatisticLogger;
use gourd_solver::core::Problem;
use gourd_solver::core::Solution;
use gourd_solver::core::Solver;
use gourd_solver::core::VariableId;
use gourd_solver::parallel::ParallelSolver;
use gourd_solver::problems::Bibd;
use gourd_solver::problems::BibdParameters;
use gourd_solver::problems::GolombRuler;
use gourd_solver::problems::NQueens;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use result::GourdResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    #[command(subcommand)]
    problem: ProblemArgs,

    /// The consistency established at every node of the search tree.
    ///
    /// - "bounds" runs the propagators to a fixpoint
    /// - "shaving" additionally tries out the bounds of every domain and removes those which
    ///   lead to an inconsistency
    #[arg(long, value_enum, default_value_t, verbatim_doc_comment)]
    consistency: ConsistencyAlgorithm,

    /// How an optimisation continues after an improving solution.
    #[arg(long, value_enum, default_value_t)]
    optimisation_mode: OptimisationMode,

    /// Instructs the solver to report all solutions of a satisfaction problem.
    #[arg(short = 'a', long = "all-solutions")]
    all_solutions: bool,

    /// Only report the number of solutions instead of printing them.
    #[arg(long)]
    count_only: bool,

    /// The number of workers which split the search space of a satisfaction problem.
    ///
    /// Possible values: usize
    #[arg(short = 'w', long, default_value_t = 1)]
    workers: usize,

    /// Stop after this many solutions.
    ///
    /// Possible values: u64
    #[arg(long)]
    solution_limit: Option<u64>,

    /// The maximum depth of the search tree.
    ///
    /// Possible values: usize
    #[arg(long, default_value_t = 10_000)]
    choice_point_capacity: usize,

    /// The seed of the random generator.
    ///
    /// Possible values: u64
    #[arg(long, default_value_t = 42)]
    random_seed: u64,

    /// Enables log message output from the solver.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Enables statistic output.
    #[arg(short = 's', long = "log-statistics")]
    log_statistics: bool,
}

#[derive(Debug, Subcommand)]
enum ProblemArgs {
    /// Place n non-attacking queens on an n x n board.
    Queens {
        /// The size of the board.
        n: u32,
    },
    /// Find a shortest Golomb ruler with the given number of marks.
    Golomb {
        /// The number of marks.
        marks: u32,
    },
    /// Find a balanced incomplete block design.
    Bibd {
        /// The number of objects.
        v: u32,
        /// The number of blocks.
        b: u32,
        /// The number of blocks containing each object.
        r: u32,
        /// The number of objects in each block.
        k: u32,
        /// The number of blocks containing each pair of objects.
        lambda: u32,
    },
}

fn configure_logging(verbose: bool, log_statistics: bool) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging("%% stat:", Some("%% stat-end"), Some(Case::Snake), None);
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> GourdResult<()> {
    let args = Args::parse();
    configure_logging(args.verbose, args.log_statistics)?;

    if gourd_solver::core::gourd_asserts::GOURD_ASSERT_LEVEL_DEFINITION
        >= gourd_solver::core::gourd_asserts::GOURD_ASSERT_MODERATE
    {
        warn!(
            "Potential performance degradation: the Gourd assert level is set to {}, meaning many debug asserts are active which may result in performance degradation.",
            gourd_solver::core::gourd_asserts::GOURD_ASSERT_LEVEL_DEFINITION
        );
    }

    let options = SolverOptions {
        consistency: args.consistency,
        choice_point_capacity: args.choice_point_capacity,
        random_seed: args.random_seed,
    };

    match args.problem {
        ProblemArgs::Queens { n } => {
            let queens = NQueens::new(n)?;
            let split_variable = queens.queens.first().copied();
            satisfy(&args, options, queens.problem.clone(), split_variable, |solution| {
                println!("{}", queens.render(solution))
            })
        }
        ProblemArgs::Golomb { marks } => {
            if args.workers > 1 {
                warn!("Optimisation runs on a single worker, ignoring --workers");
            }
            let ruler = GolombRuler::new(marks)?;
            let mut solver = Solver::with_options(ruler.problem.clone(), options);
            let best = solver.minimize(ruler.length(), args.optimisation_mode)?;

            match best {
                Some(solution) => {
                    println!("length={}", solution.value(ruler.length()));
                    println!("marks={:?}", ruler.marks(&solution));
                }
                None => println!("=====UNSATISFIABLE====="),
            }
            solver.log_statistics(&StatisticLogger::default());
            log_statistic_postfix();
            Ok(())
        }
        ProblemArgs::Bibd { v, b, r, k, lambda } => {
            let bibd = Bibd::new(BibdParameters { v, b, r, k, lambda })?;
            let split_variable = Some(bibd.incidence(0, 0));
            satisfy(&args, options, bibd.problem.clone(), split_variable, |solution| {
                for row in bibd.matrix(solution) {
                    let row: Vec<_> = row.iter().map(i32::to_string).collect();
                    println!("{}", row.join(" "));
                }
            })
        }
    }
}

/// Finds one solution, or all of them with `--all-solutions`, on one or more workers.
fn satisfy(
    args: &Args,
    options: SolverOptions,
    problem: Problem,
    split_variable: Option<VariableId>,
    print_solution: impl Fn(&Solution),
) -> GourdResult<()> {
    let limit = if args.all_solutions {
        args.solution_limit
    } else {
        Some(1)
    };
    let report = |solution: &Solution| {
        if !args.count_only {
            print_solution(solution);
            println!("----------");
        }
    };

    let num_solutions = match split_variable {
        Some(split_variable) if args.workers > 1 => {
            let mut parallel =
                ParallelSolver::new(problem, split_variable, args.workers)?.with_options(options);
            if let Some(limit) = limit {
                parallel = parallel.with_solution_limit(limit);
            }

            let outcome = parallel.solve()?;
            outcome.solutions.iter().for_each(report);
            for (worker, statistics) in outcome.worker_statistics.iter().enumerate() {
                statistics.log(&StatisticLogger::new(["worker".to_owned(), worker.to_string()]));
            }
            outcome.statistics.log(&StatisticLogger::default());
            log_statistic_postfix();
            outcome.num_solutions
        }
        _ => {
            let mut solver = Solver::with_options(problem, options);
            let mut num_solutions = 0;
            while limit.map_or(true, |limit| num_solutions < limit) {
                let Some(solution) = solver.solve_one()? else {
                    break;
                };
                report(&solution);
                num_solutions += 1;
            }
            solver.log_statistics(&StatisticLogger::default());
            log_statistic_postfix();
            num_solutions
        }
    };

    if num_solutions == 0 {
        println!("=====UNSATISFIABLE=====");
    } else if args.all_solutions {
        println!("solutions={num_solutions}");
    }
    Ok(())
}
