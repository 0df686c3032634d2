use crate::solver::{score::Score, score_level::ScoreLevel};

use super::{
    back_to_back_constraint::BackToBackConstraint, constraint::PlannedWorkOrder,
    no_overlap_constraint::NoOverlapConstraint,
};

/// A rule scored on an unordered pair of distinct work orders assigned to
/// the same crew.
pub trait PairConstraint {
    fn score_level(&self) -> ScoreLevel;
    fn compute_pair_score(&self, first: &PlannedWorkOrder, second: &PlannedWorkOrder) -> Score;
}

#[derive(Clone, Debug)]
pub enum PairConstraintType {
    NoOverlap(NoOverlapConstraint),
    BackToBack(BackToBackConstraint),
}

impl PairConstraintType {
    pub fn constraint_name(&self) -> &'static str {
        match self {
            Self::NoOverlap(_) => "no_overlapping_jobs",
            Self::BackToBack(_) => "avoid_back_to_back",
        }
    }
}

impl PairConstraint for PairConstraintType {
    fn score_level(&self) -> ScoreLevel {
        match self {
            Self::NoOverlap(c) => c.score_level(),
            Self::BackToBack(c) => c.score_level(),
        }
    }

    fn compute_pair_score(&self, first: &PlannedWorkOrder, second: &PlannedWorkOrder) -> Score {
        match self {
            Self::NoOverlap(c) => c.compute_pair_score(first, second),
            Self::BackToBack(c) => c.compute_pair_score(first, second),
        }
    }
}
