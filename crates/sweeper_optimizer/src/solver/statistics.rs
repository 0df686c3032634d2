use jiff::{SignedDuration, Timestamp};
use serde::Serialize;

use super::score::Score;

/// Counters of one search run, summed over its threads.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SearchStatistics {
    pub iterations: usize,
    pub evaluated_moves: usize,
    pub accepted_moves: usize,
    pub best_score_improvements: usize,
    pub restarts: usize,
    pub elapsed: SignedDuration,
    pub score_evolution: Vec<ScoreEvolutionRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreEvolutionRow {
    pub timestamp: Timestamp,
    pub score: Score,
    pub thread: usize,
    pub iteration: usize,
}

impl SearchStatistics {
    /// Adds the counters of `other`. Score evolutions are merged in
    /// timestamp order; the elapsed time is the longest of the two.
    pub fn accumulate(&mut self, other: SearchStatistics) {
        self.iterations += other.iterations;
        self.evaluated_moves += other.evaluated_moves;
        self.accepted_moves += other.accepted_moves;
        self.best_score_improvements += other.best_score_improvements;
        self.restarts += other.restarts;
        self.elapsed = self.elapsed.max(other.elapsed);
        self.score_evolution.extend(other.score_evolution);
        self.score_evolution.sort_by_key(|row| row.timestamp);
    }
}
