use crate::solver::{score::Score, score_level::ScoreLevel};

use super::{constraint::PlannedWorkOrder, pair_constraint::PairConstraint};

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Hard;

/// A crew works on one work order at a time. Windows are half-open, so a
/// work order may start exactly when its predecessor ends.
#[derive(Clone, Debug)]
pub struct NoOverlapConstraint;

impl NoOverlapConstraint {
    fn contains_start(window: &PlannedWorkOrder, other: &PlannedWorkOrder) -> bool {
        window.start_time <= other.start_time && other.start_time < window.end_time
    }
}

impl PairConstraint for NoOverlapConstraint {
    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_pair_score(&self, first: &PlannedWorkOrder, second: &PlannedWorkOrder) -> Score {
        if Self::contains_start(first, second) || Self::contains_start(second, first) {
            Score::of(self.score_level(), -1)
        } else {
            Score::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        solver::constraints::{constraint::Constraint, pair_constraint::PairConstraintType},
        test_utils::{create_test_problem, create_test_schedule, create_vehicle, create_work_order, monday},
    };

    use super::*;

    fn overlap_score(work_orders: &[(i64, usize, (i8, i8))]) -> Score {
        let problem = Arc::new(create_test_problem(
            vec![create_vehicle("a", 100), create_vehicle("b", 100)],
            work_orders
                .iter()
                .enumerate()
                .map(|(index, &(hours, _, _))| create_work_order(&index.to_string(), 10, hours))
                .collect(),
        ));
        let assignments = work_orders
            .iter()
            .enumerate()
            .map(|(index, &(_, crew, (hour, minute)))| (index, crew, monday(hour, minute)))
            .collect::<Vec<_>>();
        let schedule = create_test_schedule(problem, &assignments);

        Constraint::Pair(PairConstraintType::NoOverlap(NoOverlapConstraint)).compute_score(&schedule)
    }

    #[test]
    fn test_nested_start_is_penalized_once() {
        // 08:00-10:00 and 08:30-09:30 on the same crew.
        assert_eq!(overlap_score(&[(2, 0, (8, 0)), (1, 0, (8, 30))]), Score::hard(-1));
    }

    #[test]
    fn test_adjacent_windows_do_not_overlap() {
        assert_eq!(overlap_score(&[(2, 0, (8, 0)), (1, 0, (10, 0))]), Score::zero());
    }

    #[test]
    fn test_equal_starts_overlap() {
        assert_eq!(overlap_score(&[(1, 0, (8, 0)), (1, 0, (8, 0))]), Score::hard(-1));
    }

    #[test]
    fn test_zero_duration_never_contains() {
        assert_eq!(overlap_score(&[(0, 0, (8, 0)), (0, 0, (8, 0))]), Score::zero());
    }

    #[test]
    fn test_other_crews_are_ignored() {
        assert_eq!(overlap_score(&[(2, 0, (8, 0)), (1, 1, (8, 30))]), Score::zero());
    }

    #[test]
    fn test_every_pair_counts() {
        assert_eq!(
            overlap_score(&[(3, 0, (8, 0)), (1, 0, (9, 0)), (1, 0, (9, 30))]),
            Score::hard(-3)
        );
    }
}
