#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use gourd_solver::core::optimisation::OptimisationMode;
use gourd_solver::core::Algorithm;
use gourd_solver::core::Problem;
use gourd_solver::core::Solver;
use gourd_solver::problems::GolombRuler;

fn optimal_length(marks: u32, mode: OptimisationMode) -> i32 {
    let ruler = GolombRuler::new(marks).unwrap();
    let mut solver = Solver::new(ruler.problem.clone());

    let solution = solver
        .minimize(ruler.length(), mode)
        .unwrap()
        .expect("every ruler has a solution");
    solution.value(ruler.length())
}

#[test]
fn golomb_rulers_have_the_known_optimal_lengths() {
    let lengths: Vec<_> = (4..=9)
        .map(|marks| optimal_length(marks, OptimisationMode::Prune))
        .collect();

    assert_eq!(lengths, vec![6, 11, 17, 25, 34, 44]);
}

#[test]
fn reset_and_prune_agree_on_the_optimum() {
    for marks in 4..=7 {
        assert_eq!(
            optimal_length(marks, OptimisationMode::Reset),
            optimal_length(marks, OptimisationMode::Prune),
            "{marks} marks"
        );
    }
}

#[test]
fn maximisation_respects_offset_variables() {
    // x in [0, 9], y = x + 5 and x + y <= 12, so the largest y is 8.
    let mut problem = Problem::new([0..=9]);
    let x = problem.variable(0);
    let y = problem
        .add_offset_variable(problem.domain_of(x), 5)
        .unwrap();
    let _ = problem
        .add_propagator(&[x, y], Algorithm::AffineLeq, &[1, 1, 12])
        .unwrap();

    for mode in [OptimisationMode::Reset, OptimisationMode::Prune] {
        let mut solver = Solver::new(problem.clone());
        let best = solver.maximize(y, mode).unwrap().unwrap();

        assert_eq!(best.value(y), 8);
        assert_eq!(best.value(x), 3);
    }
}

#[test]
fn infeasible_problems_have_no_optimum() {
    let mut problem = Problem::new([0..=3, 0..=3]);
    let variables: Vec<_> = problem.variables().collect();
    let _ = problem
        .add_propagator(&variables, Algorithm::AffineEq, &[2, 2, 7])
        .unwrap();

    let mut solver = Solver::new(problem);

    assert_eq!(
        solver
            .minimize(variables[0], OptimisationMode::Prune)
            .unwrap(),
        None
    );
}
