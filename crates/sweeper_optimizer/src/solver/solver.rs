use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use jiff::{SignedDuration, Timestamp};
use parking_lot::{MappedRwLockReadGuard, Mutex, RwLock};
use rand::{SeedableRng, rngs::SmallRng};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    acceptor::solution_acceptor::SolutionAcceptor,
    error::ParamsError,
    problem::{scheduling_problem::SchedulingProblem, start_time_domain::StartTimeDomain},
    timer_debug,
};

use super::{
    accepted_solution::AcceptedSolution,
    construction::construct_solution::{ConstructionBudget, construct_solution},
    ls::{
        local_search::{BestSolutionHandler, LocalSearch, SearchContext, TerminationReason},
        neighborhood::Neighborhood,
    },
    score_calculator::ScoreCalculator,
    solution::schedule::Schedule,
    solution_repository::SolutionRepository,
    solver_params::{ConstructionHeuristic, SolverParams, Termination},
    statistics::SearchStatistics,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SolverStatus {
    Pending,
    Running,
    Completed,
}

#[derive(Clone, Debug)]
pub struct SolveResult {
    /// The best schedule found, infeasible or not.
    pub best: Option<AcceptedSolution>,
    pub statistics: SearchStatistics,
    pub termination: TerminationReason,
}

pub struct Solver {
    problem: Arc<SchedulingProblem>,
    params: SolverParams,
    calculator: ScoreCalculator,
    domain: StartTimeDomain,
    repository: SolutionRepository,
    status: RwLock<SolverStatus>,
    is_stopped: AtomicBool,
    on_best_solution_handler: Option<BestSolutionHandler>,
    created_at: Timestamp,
}

impl Solver {
    pub fn new(problem: SchedulingProblem, params: SolverParams) -> Result<Self, ParamsError> {
        Self::from_shared(Arc::new(problem), params)
    }

    pub fn from_shared(
        problem: Arc<SchedulingProblem>,
        params: SolverParams,
    ) -> Result<Self, ParamsError> {
        params.validate()?;

        let calculator =
            ScoreCalculator::from_params(&params.constraints, params.start_time_grid.planning_days);
        let domain = StartTimeDomain::new(&problem, &params.start_time_grid);

        Ok(Solver {
            problem,
            calculator,
            domain,
            params,
            repository: SolutionRepository::new(),
            status: RwLock::new(SolverStatus::Pending),
            is_stopped: AtomicBool::new(false),
            on_best_solution_handler: None,
            created_at: Timestamp::now(),
        })
    }

    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&AcceptedSolution) + Send + Sync + 'static,
    {
        self.on_best_solution_handler = Some(Arc::new(Mutex::new(callback)));
    }

    pub fn problem(&self) -> &SchedulingProblem {
        &self.problem
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn score_calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    #[instrument(skip_all)]
    pub fn solve(&self) -> SolveResult {
        self.is_stopped.store(false, Ordering::Relaxed);
        *self.status.write() = SolverStatus::Running;
        let started_at = Timestamp::now();
        let num_threads = self.params.search_threads.number_of_threads();

        info!(
            work_orders = self.problem.work_orders().len(),
            crews = self.problem.crews().len(),
            threads = num_threads,
            "Running search"
        );

        let oversized = self.problem.oversized_work_orders().count();
        if oversized > 0 {
            warn!(oversized, "Some work orders exceed every crew's capacity");
        }

        let initial = self.initial_schedule(started_at);
        self.record(&initial);

        let mut rng = SmallRng::seed_from_u64(self.params.seed);
        let context = |thread| SearchContext {
            repository: &self.repository,
            is_stopped: &self.is_stopped,
            started_at,
            terminations: &self.params.terminations,
            on_best_solution: self.on_best_solution_handler.as_ref(),
            thread,
        };

        let outcomes = thread::scope(|s| {
            let handles = (0..num_threads)
                .map(|thread_index| {
                    let mut thread_rng = SmallRng::from_rng(&mut rng);
                    let schedule = initial.clone();
                    let context = context(thread_index);

                    s.spawn(move || {
                        let (statistics, reason) =
                            self.local_search().run(schedule, &mut thread_rng, &context);

                        // Make sure other threads stop as well
                        self.stop();
                        (statistics, reason)
                    })
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(outcome) => outcome,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect::<Vec<_>>()
        });

        let mut statistics = SearchStatistics::default();
        let mut termination = TerminationReason::Cancelled;
        for (thread_statistics, reason) in outcomes {
            statistics.accumulate(thread_statistics);
            if termination == TerminationReason::Cancelled {
                termination = reason;
            }
        }

        let best = self.repository.snapshot();
        if let Some(best) = &best {
            info!(
                score = %best.score,
                feasible = best.is_feasible(),
                ?termination,
                iterations = statistics.iterations,
                "Search completed"
            );
        }

        *self.status.write() = SolverStatus::Completed;

        SolveResult {
            best,
            statistics,
            termination,
        }
    }

    /// Asks every search thread to return at its next iteration boundary.
    pub fn stop(&self) {
        self.is_stopped.store(true, Ordering::Relaxed);
    }

    pub fn status(&self) -> SolverStatus {
        *self.status.read()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn current_best_solution(&self) -> Option<MappedRwLockReadGuard<'_, AcceptedSolution>> {
        self.repository.best()
    }

    fn local_search(&self) -> LocalSearch<'_> {
        LocalSearch::new(
            &self.calculator,
            Neighborhood::new(&self.domain),
            self.params.neighborhood,
            self.params.restart,
            SolutionAcceptor::from_strategy(&self.params.acceptor),
        )
    }

    fn initial_schedule(&self, started_at: Timestamp) -> Schedule {
        match self.params.construction_heuristic {
            ConstructionHeuristic::Greedy => {
                let budget = ConstructionBudget {
                    is_stopped: &self.is_stopped,
                    started_at,
                    max_duration: self.max_duration(),
                };

                timer_debug!(
                    "Construction",
                    construct_solution(&self.problem, &self.domain, &self.calculator, &budget)
                )
            }
            ConstructionHeuristic::None => {
                let mut schedule = Schedule::new(Arc::clone(&self.problem));
                self.calculator.initialize(&mut schedule);
                schedule
            }
        }
    }

    /// The tightest time budget among the terminations.
    fn max_duration(&self) -> Option<SignedDuration> {
        self.params
            .terminations
            .iter()
            .filter_map(|termination| match termination {
                Termination::Duration(duration) => Some(*duration),
                _ => None,
            })
            .min()
    }

    fn record(&self, schedule: &Schedule) {
        let score = self.calculator.compute_score(schedule);
        info!(%score, "Initial schedule");

        let recorded = self.repository.record(AcceptedSolution {
            schedule: schedule.clone(),
            score,
            score_analysis: self.calculator.compute_score_analysis(schedule),
        });

        if recorded
            && let Some(handler) = &self.on_best_solution_handler
            && let Some(best) = self.repository.snapshot()
        {
            handler.lock()(&best);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use crate::{
        solver::{score::Score, solver_params::Termination},
        test_utils::{create_test_problem, create_vehicle, create_work_order},
    };

    use super::*;

    fn problem() -> SchedulingProblem {
        create_test_problem(
            vec![create_vehicle("a", 100), create_vehicle("b", 60)],
            vec![
                create_work_order("1", 50, 2),
                create_work_order("2", 80, 3),
                create_work_order("3", 30, 1),
            ],
        )
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let params = SolverParams {
            terminations: vec![],
            ..SolverParams::default()
        };

        assert!(matches!(
            Solver::new(problem(), params),
            Err(ParamsError::NoTermination)
        ));
    }

    #[test]
    fn test_status_lifecycle() {
        let solver = Solver::new(
            problem(),
            SolverParams {
                terminations: vec![Termination::Iterations(10)],
                ..SolverParams::default()
            },
        )
        .unwrap();

        assert_eq!(solver.status(), SolverStatus::Pending);
        assert!(solver.current_best_solution().is_none());

        let result = solver.solve();

        assert_eq!(solver.status(), SolverStatus::Completed);
        assert_eq!(result.termination, TerminationReason::Iterations);
        assert_eq!(
            solver.current_best_solution().map(|best| best.score),
            result.best.as_ref().map(|best| best.score)
        );
    }

    #[test]
    fn test_callback_sees_improving_scores() {
        let calls = Arc::new(AtomicUsize::new(0));
        let last_score = Arc::new(Mutex::new(Score::MIN));

        let mut solver = Solver::new(
            problem(),
            SolverParams {
                terminations: vec![Termination::Iterations(200)],
                construction_heuristic: ConstructionHeuristic::None,
                ..SolverParams::default()
            },
        )
        .unwrap();

        {
            let calls = Arc::clone(&calls);
            let last_score = Arc::clone(&last_score);
            solver.on_best_solution(move |best| {
                let mut last = last_score.lock();
                assert!(best.score > *last);
                *last = best.score;
                calls.fetch_add(1, Ordering::Relaxed);
            });
        }

        let result = solver.solve();

        assert!(calls.load(Ordering::Relaxed) >= 2);
        assert_eq!(result.best.map(|best| best.score), Some(*last_score.lock()));
    }

    #[test]
    fn test_solver_runs_again_after_completion() {
        let solver = Solver::new(
            problem(),
            SolverParams {
                terminations: vec![Termination::Iterations(50)],
                ..SolverParams::default()
            },
        )
        .unwrap();

        let first = solver.solve();
        let second = solver.solve();

        assert_eq!(first.termination, TerminationReason::Iterations);
        assert_eq!(second.termination, TerminationReason::Iterations);
        assert_eq!(second.statistics.iterations, 50);
    }

    #[test]
    fn test_stop_during_search() {
        let solver = Solver::new(
            problem(),
            SolverParams {
                terminations: vec![Termination::Duration(SignedDuration::from_secs(60))],
                ..SolverParams::default()
            },
        )
        .unwrap();

        let result = thread::scope(|s| {
            let handle = s.spawn(|| solver.solve());

            while solver.status() != SolverStatus::Running
                || solver.current_best_solution().is_none()
            {
                thread::sleep(std::time::Duration::from_millis(1));
            }
            thread::sleep(std::time::Duration::from_millis(50));
            solver.stop();

            match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        });

        assert_eq!(result.termination, TerminationReason::Cancelled);
        assert!(result.statistics.iterations > 0);
        assert!(result.statistics.elapsed < SignedDuration::from_secs(10));

        let best = result.best.unwrap();
        assert_eq!(best.score, solver.score_calculator().compute_score(&best.schedule));

        let problem = best.schedule.problem();
        for crew in problem.crew_ids() {
            let mut members = best.schedule.crew_work_orders(crew).to_vec();
            members.sort();
            let expected = problem
                .work_order_ids()
                .filter(|&work_order| best.schedule.crew(work_order) == Some(crew))
                .collect::<Vec<_>>();

            assert_eq!(members, expected, "crew {crew}");
        }
    }
}
