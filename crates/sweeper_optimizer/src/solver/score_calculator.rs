use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{problem::work_order::WorkOrderIdx, timer_debug};

use super::{
    constraints::{constraint::Constraint, constraint_params::ConstraintParams},
    ls::r#move::{Move, MoveUndo},
    score::{Score, ScoreAnalysis},
    solution::schedule::Schedule,
};

/// Scores schedules against a fixed list of constraints, either from scratch
/// or incrementally around the work orders a move touches.
#[derive(Clone, Debug)]
pub struct ScoreCalculator {
    constraints: Vec<Constraint>,
}

impl ScoreCalculator {
    pub fn new(constraints: Vec<Constraint>) -> Self {
        ScoreCalculator { constraints }
    }

    pub fn from_params(params: &ConstraintParams, planning_days: usize) -> Self {
        Self::new(Constraint::default_constraints(params, planning_days))
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn compute_score(&self, schedule: &Schedule) -> Score {
        self.constraints
            .iter()
            .map(|constraint| constraint.compute_score(schedule))
            .sum()
    }

    pub fn compute_score_analysis(&self, schedule: &Schedule) -> ScoreAnalysis {
        timer_debug!("Score analysis", {
            ScoreAnalysis {
                scores: self
                    .constraints
                    .par_iter()
                    .map(|constraint| {
                        (
                            constraint.constraint_name(),
                            constraint.compute_score(schedule),
                        )
                    })
                    .collect(),
            }
        })
    }

    /// Sum of every constraint term involving at least one of `changed`.
    pub fn partial_score(&self, schedule: &Schedule, changed: &[WorkOrderIdx]) -> Score {
        self.constraints
            .iter()
            .map(|constraint| constraint.compute_partial_score(schedule, changed))
            .sum()
    }

    /// Computes the full score and caches it on the schedule.
    pub fn initialize(&self, schedule: &mut Schedule) -> Score {
        let score = self.compute_score(schedule);
        schedule.set_score(score);
        score
    }

    /// The cached score, computed first if the schedule has none.
    pub fn score(&self, schedule: &mut Schedule) -> Score {
        match schedule.score() {
            Some(score) => score,
            None => self.initialize(schedule),
        }
    }

    /// Applies `mv` and updates the cached score from the terms of the
    /// changed work orders only.
    pub fn do_move(&self, schedule: &mut Schedule, mv: &Move) -> MoveUndo {
        let score = self.score(schedule);
        let changed = mv.changed_work_orders();

        let before = self.partial_score(schedule, &changed);
        let undo = mv.apply(schedule);
        let after = self.partial_score(schedule, &changed);

        schedule.set_score(score - before + after);
        undo
    }

    pub fn undo_move(&self, schedule: &mut Schedule, undo: MoveUndo) {
        undo.revert(schedule);
    }
}
