use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use parking_lot::Mutex;
use sweeper_optimizer::{
    problem::scheduling_problem::SchedulingProblem,
    solver::{
        ls::local_search::TerminationReason,
        score::Score,
        solver::{SolveResult, Solver, SolverStatus},
        solver_params::{
            AcceptorStrategy, ConstructionHeuristic, NeighborhoodMode, SolverParams, Termination,
            Threads,
        },
    },
};

use crate::setup::{create_test_problem, create_vehicle, create_work_order, monday};

mod setup;

fn solve(problem: Arc<SchedulingProblem>, params: SolverParams) -> SolveResult {
    let solver = Solver::from_shared(problem, params).unwrap();
    let result = solver.solve();
    assert_eq!(solver.status(), SolverStatus::Completed);
    result
}

fn iterations(iterations: usize) -> SolverParams {
    SolverParams {
        terminations: vec![Termination::Iterations(iterations)],
        ..SolverParams::default()
    }
}

#[test]
fn test_solve_depot_problem() {
    let result = solve(setup::create_depot_problem(), iterations(2000));

    let best = result.best.unwrap();
    assert!(best.is_feasible(), "best score {}", best.score);
    assert_eq!(best.summary().unassigned, 0);
    assert_eq!(best.score_analysis.total_score(), best.score);
    assert_eq!(result.termination, TerminationReason::Iterations);
    assert_eq!(result.statistics.iterations, 2000);
}

#[test]
fn test_every_acceptor_keeps_feasibility() {
    let acceptors = [
        (AcceptorStrategy::HillClimbing, NeighborhoodMode::Exhaustive),
        (
            AcceptorStrategy::tabu_search(),
            NeighborhoodMode::Sampled { sample_size: 16 },
        ),
        (
            AcceptorStrategy::simulated_annealing(),
            NeighborhoodMode::Sampled { sample_size: 8 },
        ),
    ];

    for (acceptor, neighborhood) in acceptors {
        let params = SolverParams {
            acceptor,
            neighborhood,
            ..iterations(300)
        };

        let best = solve(setup::create_depot_problem(), params).best.unwrap();
        assert!(best.is_feasible(), "{acceptor:?} ended at {}", best.score);
    }
}

#[test]
fn test_oversized_work_order_is_reported_in_the_score() {
    let problem = create_test_problem(
        vec![create_vehicle("v1", 100, monday(8, 0), 8)],
        vec![create_work_order("small", 20, 1), create_work_order("huge", 500, 1)],
    );

    let best = solve(problem, iterations(200)).best.unwrap();

    assert!(best.score.hard_score <= -1);
    assert_eq!(best.score_analysis.scores["vehicle_capacity"], Score::hard(-1));
    assert_eq!(best.summary().assigned, 2);
}

#[test]
fn test_same_seed_same_result() {
    let params = SolverParams {
        construction_heuristic: ConstructionHeuristic::None,
        ..iterations(1500)
    };

    let first = solve(setup::create_depot_problem(), params.clone());
    let second = solve(setup::create_depot_problem(), params);

    let (first_best, second_best) = (first.best.unwrap(), second.best.unwrap());
    assert_eq!(first_best.score, second_best.score);
    assert!(first_best.schedule.is_identical(&second_best.schedule));
    assert_eq!(
        first.statistics.accepted_moves,
        second.statistics.accepted_moves
    );
}

#[test]
fn test_longer_budget_never_scores_worse() {
    let budgets = [10, 100, 1000, 3000];

    let scores = budgets
        .iter()
        .map(|&budget| {
            let params = SolverParams {
                construction_heuristic: ConstructionHeuristic::None,
                ..iterations(budget)
            };
            solve(setup::create_depot_problem(), params)
                .best
                .unwrap()
                .score
        })
        .collect::<Vec<_>>();

    assert!(
        scores.windows(2).all(|pair| pair[0] <= pair[1]),
        "scores regressed: {scores:?}"
    );
}

#[test]
fn test_best_solution_never_regresses() {
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mut solver = Solver::from_shared(
        setup::create_depot_problem(),
        SolverParams {
            construction_heuristic: ConstructionHeuristic::None,
            ..iterations(2000)
        },
    )
    .unwrap();

    {
        let seen = Arc::clone(&seen);
        solver.on_best_solution(move |best| seen.lock().push(best.score));
    }

    let result = solver.solve();
    let seen = seen.lock();

    assert!(seen.len() > 1);
    assert!(seen.windows(2).all(|pair| pair[0] < pair[1]), "{seen:?}");
    assert_eq!(seen.last().copied(), result.best.map(|best| best.score));
}

#[test]
fn test_parallel_search() {
    let params = SolverParams {
        search_threads: Threads::Multi(3),
        ..iterations(500)
    };

    let result = solve(setup::create_depot_problem(), params);

    let best = result.best.unwrap();
    assert!(best.is_feasible());
    // Each thread stops on its own budget or because another one finished.
    assert!(result.statistics.iterations >= 500);
    assert_eq!(result.termination, TerminationReason::Iterations);
}

#[test]
fn test_target_score_stops_early() {
    let params = SolverParams {
        terminations: vec![Termination::Score(Score::zero()), Termination::Iterations(100_000)],
        ..SolverParams::default()
    };

    let result = solve(setup::create_depot_problem(), params);

    assert_eq!(result.termination, TerminationReason::Score);
    assert!(result.statistics.iterations < 100_000);
}

#[test]
fn test_time_budget_bounds_construction() {
    let vehicles = (0..10)
        .map(|index| create_vehicle(&format!("v{index}"), 100, monday(8, 0), 8))
        .collect();
    let work_orders = (0..1500_i64)
        .map(|index| create_work_order(&format!("wo-{index}"), 1 + index % 90, 1 + index % 3))
        .collect();
    let problem = create_test_problem(vehicles, work_orders);

    let budget = SignedDuration::from_millis(200);
    let params = SolverParams {
        terminations: vec![Termination::Duration(budget)],
        ..SolverParams::default()
    };

    let started_at = Timestamp::now();
    let result = solve(problem, params);
    let elapsed = Timestamp::now().duration_since(started_at);

    assert_eq!(result.termination, TerminationReason::Duration);
    assert!(elapsed < budget + SignedDuration::from_secs(3), "took {elapsed}");

    let best = result.best.unwrap();
    assert_eq!(best.score_analysis.total_score(), best.score);
}
