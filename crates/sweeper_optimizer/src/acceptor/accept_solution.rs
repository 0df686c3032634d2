use rand::rngs::SmallRng;

use crate::solver::{ls::r#move::Move, score::Score};

/// A move evaluated against the working schedule.
pub struct AcceptCandidate<'a> {
    pub mv: &'a Move,
    /// Score of the working schedule with the move applied.
    pub score: Score,
    /// Score of the working schedule before the move.
    pub current_score: Score,
    /// Best score this search run has seen.
    pub best_score: Score,
}

pub struct AcceptSolutionContext<'a> {
    pub iteration: usize,
    pub rng: &'a mut SmallRng,
}

pub trait AcceptSolution {
    fn accept(&self, candidate: &AcceptCandidate, context: AcceptSolutionContext) -> bool;

    /// Called once per iteration with the move the search picked, if any.
    fn on_step_end(&mut self, _picked: Option<&Move>) {}

    /// Called when the search restarts from the best schedule.
    fn on_restart(&mut self) {}
}
