use serde::Serialize;

use super::{
    score::{Score, ScoreAnalysis},
    solution::schedule::Schedule,
};

#[derive(Clone, Debug)]
pub struct AcceptedSolution {
    pub schedule: Schedule,
    pub score: Score,
    pub score_analysis: ScoreAnalysis,
}

impl AcceptedSolution {
    pub fn is_feasible(&self) -> bool {
        self.score.is_feasible()
    }

    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            score: self.score,
            assigned: self.schedule.assigned_count(),
            unassigned: self.schedule.assignments().len() - self.schedule.assigned_count(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SolutionSummary {
    pub score: Score,
    pub assigned: usize,
    pub unassigned: usize,
}
