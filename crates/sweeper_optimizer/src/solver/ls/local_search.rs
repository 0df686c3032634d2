use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use jiff::Timestamp;
use parking_lot::Mutex;
use rand::rngs::SmallRng;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    acceptor::{
        accept_solution::{AcceptCandidate, AcceptSolution, AcceptSolutionContext},
        solution_acceptor::SolutionAcceptor,
    },
    solver::{
        accepted_solution::AcceptedSolution,
        score::Score,
        score_calculator::ScoreCalculator,
        solution::schedule::Schedule,
        solution_repository::SolutionRepository,
        solver_params::{NeighborhoodMode, RestartParams, Termination},
        statistics::{ScoreEvolutionRow, SearchStatistics},
    },
};

use super::{r#move::Move, neighborhood::Neighborhood};

pub type BestSolutionHandler = Arc<Mutex<dyn FnMut(&AcceptedSolution) + Send + Sync + 'static>>;

/// Why a search run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TerminationReason {
    Duration,
    Iterations,
    IterationsWithoutImprovement,
    Score,
    /// The neighborhood of the working schedule is empty.
    NoMoves,
    /// Stopped from outside, or by another search thread.
    Cancelled,
}

impl From<&Termination> for TerminationReason {
    fn from(termination: &Termination) -> Self {
        match termination {
            Termination::Duration(_) => TerminationReason::Duration,
            Termination::Iterations(_) => TerminationReason::Iterations,
            Termination::IterationsWithoutImprovement(_) => {
                TerminationReason::IterationsWithoutImprovement
            }
            Termination::Score(_) => TerminationReason::Score,
        }
    }
}

/// What the search threads share.
pub struct SearchContext<'a> {
    pub repository: &'a SolutionRepository,
    pub is_stopped: &'a AtomicBool,
    pub started_at: Timestamp,
    pub terminations: &'a [Termination],
    pub on_best_solution: Option<&'a BestSolutionHandler>,
    pub thread: usize,
}

struct SearchState {
    iteration: usize,
    iterations_without_improvement: usize,
    iterations_since_restart: usize,
    best_schedule: Schedule,
    best_score: Score,
}

/// One local search run over a single working schedule. Moves are applied
/// and scored one at a time; threads only meet in the repository.
pub struct LocalSearch<'a> {
    calculator: &'a ScoreCalculator,
    neighborhood: Neighborhood<'a>,
    neighborhood_mode: NeighborhoodMode,
    restart: Option<RestartParams>,
    acceptor: SolutionAcceptor,
    statistics: SearchStatistics,
}

impl<'a> LocalSearch<'a> {
    pub fn new(
        calculator: &'a ScoreCalculator,
        neighborhood: Neighborhood<'a>,
        neighborhood_mode: NeighborhoodMode,
        restart: Option<RestartParams>,
        acceptor: SolutionAcceptor,
    ) -> Self {
        LocalSearch {
            calculator,
            neighborhood,
            neighborhood_mode,
            restart,
            acceptor,
            statistics: SearchStatistics::default(),
        }
    }

    /// Improves `schedule` until a termination fires or the context is
    /// stopped. The check happens between iterations, so a stopped search
    /// never leaves a move half applied.
    #[instrument(skip_all, fields(thread = context.thread), level = "debug")]
    pub fn run(
        mut self,
        mut schedule: Schedule,
        rng: &mut SmallRng,
        context: &SearchContext,
    ) -> (SearchStatistics, TerminationReason) {
        let score = self.calculator.score(&mut schedule);
        let mut state = SearchState {
            iteration: 0,
            iterations_without_improvement: 0,
            iterations_since_restart: 0,
            best_schedule: schedule.clone(),
            best_score: score,
        };

        let reason = loop {
            if context.is_stopped.load(Ordering::Relaxed) {
                break TerminationReason::Cancelled;
            }

            if let Some(reason) = self.should_terminate(&state, context) {
                break reason;
            }

            state.iteration += 1;
            self.statistics.iterations += 1;

            let current_score = self.calculator.score(&mut schedule);
            let Some(picked) = self.pick_move(&mut schedule, current_score, &state, rng) else {
                break TerminationReason::NoMoves;
            };

            self.acceptor
                .on_step_end(picked.as_ref().map(|(mv, _)| mv));

            let improved = match picked {
                Some((mv, _)) => {
                    self.calculator.do_move(&mut schedule, &mv);
                    self.statistics.accepted_moves += 1;
                    self.update_best(&mut schedule, &mut state, context)
                }
                None => false,
            };

            if improved {
                state.iterations_without_improvement = 0;
                state.iterations_since_restart = 0;
            } else {
                state.iterations_without_improvement += 1;
                state.iterations_since_restart += 1;
            }

            if let Some(restart) = self.restart
                && state.iterations_since_restart >= restart.iterations_without_improvement
            {
                self.restart_from_best(&mut schedule, &mut state, restart, rng);
            }
        };

        debug!(
            iterations = state.iteration,
            best_score = %state.best_score,
            ?reason,
            "Search thread done"
        );

        self.statistics.elapsed = Timestamp::now().duration_since(context.started_at);
        (self.statistics, reason)
    }

    fn check_termination(
        &self,
        state: &SearchState,
        context: &SearchContext,
        termination: &Termination,
    ) -> bool {
        match *termination {
            Termination::Iterations(max_iterations) => state.iteration >= max_iterations,
            Termination::Duration(max_duration) => {
                Timestamp::now().duration_since(context.started_at) > max_duration
            }
            Termination::IterationsWithoutImprovement(max_iterations_without_improvement) => {
                state.iterations_without_improvement >= max_iterations_without_improvement
            }
            Termination::Score(target_score) => context
                .repository
                .best_score()
                .is_some_and(|best_score| best_score >= target_score),
        }
    }

    fn should_terminate(
        &self,
        state: &SearchState,
        context: &SearchContext,
    ) -> Option<TerminationReason> {
        context
            .terminations
            .iter()
            .find(|termination| self.check_termination(state, context, termination))
            .map(|termination| {
                debug!(
                    thread = context.thread,
                    "Termination condition met: {:?} at iteration {}",
                    termination,
                    state.iteration
                );
                TerminationReason::from(termination)
            })
    }

    /// The best accepted move of this iteration with its resulting score.
    /// `None` when the neighborhood is empty, `Some(None)` when no move was
    /// accepted.
    fn pick_move(
        &mut self,
        schedule: &mut Schedule,
        current_score: Score,
        state: &SearchState,
        rng: &mut SmallRng,
    ) -> Option<Option<(Move, Score)>> {
        let candidates = match self.neighborhood_mode {
            NeighborhoodMode::Exhaustive => {
                let mut moves = Vec::new();
                self.neighborhood
                    .for_each_move(schedule, |mv| moves.push(mv));
                moves
            }
            NeighborhoodMode::Sampled { sample_size } => (0..sample_size)
                .filter_map(|_| self.neighborhood.sample_move(schedule, rng))
                .collect(),
        };

        if candidates.is_empty() {
            return None;
        }

        let mut picked: Option<(Move, Score)> = None;
        for mv in candidates {
            let undo = self.calculator.do_move(schedule, &mv);
            let score = self.calculator.score(schedule);
            self.calculator.undo_move(schedule, undo);
            self.statistics.evaluated_moves += 1;

            if picked
                .as_ref()
                .is_some_and(|(_, picked_score)| score <= *picked_score)
            {
                continue;
            }

            let accepted = self.acceptor.accept(
                &AcceptCandidate {
                    mv: &mv,
                    score,
                    current_score,
                    best_score: state.best_score,
                },
                AcceptSolutionContext {
                    iteration: state.iteration,
                    rng: &mut *rng,
                },
            );

            if accepted {
                picked = Some((mv, score));
            }
        }

        Some(picked)
    }

    /// Returns whether the working schedule is a new best for this thread.
    fn update_best(
        &mut self,
        schedule: &mut Schedule,
        state: &mut SearchState,
        context: &SearchContext,
    ) -> bool {
        let score = self.calculator.score(schedule);
        if score <= state.best_score {
            return false;
        }

        state.best_score = score;
        state.best_schedule = schedule.clone();
        self.statistics.best_score_improvements += 1;
        self.statistics.score_evolution.push(ScoreEvolutionRow {
            timestamp: Timestamp::now(),
            score,
            thread: context.thread,
            iteration: state.iteration,
        });

        debug!(thread = context.thread, iteration = state.iteration, %score, "New best score");

        let recorded = context.repository.record_with(score, || AcceptedSolution {
            schedule: schedule.clone(),
            score,
            score_analysis: self.calculator.compute_score_analysis(schedule),
        });

        if recorded
            && let Some(handler) = context.on_best_solution
            && let Some(best) = context.repository.snapshot()
        {
            handler.lock()(&best);
        }

        true
    }

    fn restart_from_best(
        &mut self,
        schedule: &mut Schedule,
        state: &mut SearchState,
        restart: RestartParams,
        rng: &mut SmallRng,
    ) {
        *schedule = state.best_schedule.clone();
        for _ in 0..restart.perturbation_moves {
            if let Some(mv) = self.neighborhood.sample_move(schedule, rng) {
                self.calculator.do_move(schedule, &mv);
            }
        }

        self.acceptor.on_restart();
        self.statistics.restarts += 1;
        state.iterations_since_restart = 0;

        info!(
            iteration = state.iteration,
            best_score = %state.best_score,
            score = %self.calculator.score(schedule),
            "Restarting from best schedule"
        );
    }
}
