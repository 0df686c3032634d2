use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};

use super::{accepted_solution::AcceptedSolution, score::Score};

/// The best schedule seen by any search thread. Writers hold the lock only
/// to compare and swap the held solution.
#[derive(Default)]
pub struct SolutionRepository {
    best: RwLock<Option<AcceptedSolution>>,
}

impl SolutionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps `solution` if nothing is held yet or if it scores strictly
    /// better than the held one. Returns whether it was kept.
    pub fn record(&self, solution: AcceptedSolution) -> bool {
        if let Some(best_score) = self.best_score()
            && solution.score <= best_score
        {
            return false;
        }

        let mut best = self.best.write();
        match best.as_ref() {
            Some(held) if solution.score <= held.score => false,
            _ => {
                *best = Some(solution);
                true
            }
        }
    }

    /// Like [`record`](Self::record), but only builds the solution when it
    /// would be kept.
    pub fn record_with<F>(&self, score: Score, build: F) -> bool
    where
        F: FnOnce() -> AcceptedSolution,
    {
        if self.best_score().is_some_and(|best_score| score <= best_score) {
            return false;
        }

        self.record(build())
    }

    pub fn best(&self) -> Option<MappedRwLockReadGuard<'_, AcceptedSolution>> {
        RwLockReadGuard::try_map(self.best.read(), |best| best.as_ref()).ok()
    }

    pub fn best_score(&self) -> Option<Score> {
        self.best.read().as_ref().map(|best| best.score)
    }

    pub fn snapshot(&self) -> Option<AcceptedSolution> {
        self.best.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.best.read().is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        solver::{score::ScoreAnalysis, solution::schedule::Schedule},
        test_utils::{create_test_problem, create_vehicle, create_work_order},
    };

    use super::*;

    fn solution(score: Score) -> AcceptedSolution {
        let problem = Arc::new(create_test_problem(
            vec![create_vehicle("a", 100)],
            vec![create_work_order("1", 10, 1)],
        ));
        AcceptedSolution {
            schedule: Schedule::new(problem),
            score,
            score_analysis: ScoreAnalysis::default(),
        }
    }

    #[test]
    fn test_empty_repository() {
        let repository = SolutionRepository::new();

        assert!(repository.best().is_none());
        assert!(repository.best_score().is_none());
        assert!(repository.snapshot().is_none());
    }

    #[test]
    fn test_record_keeps_strictly_better_only() {
        let repository = SolutionRepository::new();

        assert!(repository.record(solution(Score::hard(-2))));
        assert!(repository.record(solution(Score::new(-1, 0, -50))));
        assert!(!repository.record(solution(Score::new(-1, 0, -50))));
        assert!(!repository.record(solution(Score::hard(-3))));

        assert_eq!(repository.best_score(), Some(Score::new(-1, 0, -50)));
        assert_eq!(
            repository.best().map(|best| best.score),
            Some(Score::new(-1, 0, -50))
        );
    }

    #[test]
    fn test_best_never_regresses_across_threads() {
        let repository = Arc::new(SolutionRepository::new());

        std::thread::scope(|s| {
            for thread in 0..4_i64 {
                let repository = Arc::clone(&repository);
                s.spawn(move || {
                    for soft in 0..50 {
                        repository.record(solution(Score::soft(soft * 4 + thread)));
                    }
                });
            }

            let mut previous = None;
            for _ in 0..100 {
                let current = repository.best_score();
                assert!(current >= previous);
                previous = current;
            }
        });

        assert_eq!(repository.best_score(), Some(Score::soft(49 * 4 + 3)));
    }

    #[test]
    fn test_record_with_skips_building_worse_solutions() {
        let repository = SolutionRepository::new();
        repository.record(solution(Score::soft(10)));

        let kept = repository.record_with(Score::soft(5), || panic!("should not be built"));

        assert!(!kept);
    }
}
