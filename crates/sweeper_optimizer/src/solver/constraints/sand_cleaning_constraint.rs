use crate::{
    problem::scheduling_problem::SchedulingProblem,
    solver::{score::Score, score_level::ScoreLevel},
};

use super::{constraint::PlannedWorkOrder, work_order_constraint::WorkOrderConstraint};

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Soft;

/// Rewards every assigned work order with its sand volume, scaled by
/// `weight`.
#[derive(Clone, Debug)]
pub struct SandCleaningConstraint {
    weight: i64,
}

impl SandCleaningConstraint {
    pub fn new(weight: i64) -> Self {
        SandCleaningConstraint { weight }
    }
}

impl WorkOrderConstraint for SandCleaningConstraint {
    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_score(&self, _problem: &SchedulingProblem, planned: &PlannedWorkOrder) -> Score {
        Score::of(
            self.score_level(),
            self.weight * planned.work_order.sand_volume(),
        )
    }
}
