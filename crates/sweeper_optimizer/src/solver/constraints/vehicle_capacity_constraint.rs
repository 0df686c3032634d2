use crate::{
    problem::scheduling_problem::SchedulingProblem,
    solver::{score::Score, score_level::ScoreLevel},
};

use super::{constraint::PlannedWorkOrder, work_order_constraint::WorkOrderConstraint};

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Hard;

/// The crew must be able to carry the sand of the work order.
#[derive(Clone, Debug)]
pub struct VehicleCapacityConstraint;

impl WorkOrderConstraint for VehicleCapacityConstraint {
    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_score(&self, _problem: &SchedulingProblem, planned: &PlannedWorkOrder) -> Score {
        if planned.work_order.sand_volume() > planned.crew.capacity() {
            Score::of(self.score_level(), -1)
        } else {
            Score::zero()
        }
    }
}
