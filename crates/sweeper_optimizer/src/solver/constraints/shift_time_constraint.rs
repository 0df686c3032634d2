use jiff::SignedDuration;

use crate::{
    problem::scheduling_problem::SchedulingProblem,
    solver::{score::Score, score_level::ScoreLevel},
};

use super::{constraint::PlannedWorkOrder, work_order_constraint::WorkOrderConstraint};

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Hard;
const DAY: SignedDuration = SignedDuration::from_hours(24);

/// The cleaning window must fit into the crew's shift. The shift repeats
/// every day of the planning horizon; starting on any other day violates
/// the rule.
#[derive(Clone, Debug)]
pub struct ShiftTimeConstraint {
    planning_days: usize,
}

impl ShiftTimeConstraint {
    pub fn new(planning_days: usize) -> Self {
        ShiftTimeConstraint {
            planning_days: planning_days.max(1),
        }
    }

    fn is_within_shift(&self, planned: &PlannedWorkOrder) -> bool {
        let shift_start = planned.crew.shift_start();
        if planned.start_time < shift_start {
            return false;
        }

        let since_first_shift = shift_start.duration_until(planned.start_time);
        let day = since_first_shift.as_secs() / DAY.as_secs();
        if day >= self.planning_days as i64 {
            return false;
        }

        let shift_end = shift_start
            .saturating_add(SignedDuration::from_secs(day * DAY.as_secs()))
            .saturating_add(planned.crew.shift_length());

        planned.end_time <= shift_end
    }
}

impl WorkOrderConstraint for ShiftTimeConstraint {
    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_score(&self, _problem: &SchedulingProblem, planned: &PlannedWorkOrder) -> Score {
        if self.is_within_shift(planned) {
            Score::zero()
        } else {
            Score::of(self.score_level(), -1)
        }
    }
}
