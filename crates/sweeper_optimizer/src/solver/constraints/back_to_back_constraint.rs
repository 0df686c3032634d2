use crate::solver::{score::Score, score_level::ScoreLevel};

use super::{constraint::PlannedWorkOrder, pair_constraint::PairConstraint};

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Soft;

/// Penalizes a crew going straight from one work order into the next.
#[derive(Clone, Debug)]
pub struct BackToBackConstraint;

impl PairConstraint for BackToBackConstraint {
    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_pair_score(&self, first: &PlannedWorkOrder, second: &PlannedWorkOrder) -> Score {
        if first.end_time == second.start_time || second.end_time == first.start_time {
            Score::of(self.score_level(), -1)
        } else {
            Score::zero()
        }
    }
}
