use jiff::civil::DateTime;

use crate::{
    problem::scheduling_problem::SchedulingProblem,
    solver::{score::Score, score_level::ScoreLevel},
};

use super::{constraint::PlannedWorkOrder, work_order_constraint::WorkOrderConstraint};

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Hard;

/// No work order may start on a weekend day or during the break hour. A
/// work order breaking both rules is penalized once.
#[derive(Clone, Debug)]
pub struct WeekendBreakConstraint {
    weekend_days: Vec<i8>,
    break_hour: Option<i8>,
}

impl WeekendBreakConstraint {
    /// `weekend_days` are numbered 1 (Monday) to 7 (Sunday).
    pub fn new(weekend_days: Vec<i8>, break_hour: Option<i8>) -> Self {
        WeekendBreakConstraint {
            weekend_days,
            break_hour,
        }
    }

    fn is_weekend(&self, start_time: DateTime) -> bool {
        self.weekend_days
            .contains(&start_time.weekday().to_monday_one_offset())
    }

    fn is_break(&self, start_time: DateTime) -> bool {
        self.break_hour == Some(start_time.hour())
    }
}

impl WorkOrderConstraint for WeekendBreakConstraint {
    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_score(&self, _problem: &SchedulingProblem, planned: &PlannedWorkOrder) -> Score {
        if self.is_weekend(planned.start_time) || self.is_break(planned.start_time) {
            Score::of(self.score_level(), -1)
        } else {
            Score::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::civil::date;

    use crate::{
        solver::constraints::{
            constraint::Constraint, work_order_constraint::WorkOrderConstraintType,
        },
        test_utils::{create_test_problem, create_test_schedule, create_vehicle, create_work_order, monday},
    };

    use super::*;

    fn weekend_score(constraint: WeekendBreakConstraint, start: DateTime) -> Score {
        let problem = Arc::new(create_test_problem(
            vec![create_vehicle("a", 100)],
            vec![create_work_order("1", 10, 1)],
        ));
        let schedule = create_test_schedule(problem, &[(0, 0, start)]);

        Constraint::WorkOrder(WorkOrderConstraintType::WeekendBreak(constraint))
            .compute_score(&schedule)
    }

    fn default_rule() -> WeekendBreakConstraint {
        WeekendBreakConstraint::new(vec![6, 7], Some(12))
    }

    #[test]
    fn test_saturday_is_penalized_once() {
        let saturday = date(2024, 3, 9).at(9, 0, 0, 0);
        assert_eq!(weekend_score(default_rule(), saturday), Score::hard(-1));

        // Saturday at the break hour still counts once.
        let saturday_noon = date(2024, 3, 9).at(12, 0, 0, 0);
        assert_eq!(weekend_score(default_rule(), saturday_noon), Score::hard(-1));
    }

    #[test]
    fn test_break_hour_is_penalized() {
        assert_eq!(weekend_score(default_rule(), monday(12, 30)), Score::hard(-1));
        assert_eq!(weekend_score(default_rule(), monday(11, 30)), Score::zero());
        assert_eq!(weekend_score(default_rule(), monday(13, 0)), Score::zero());
    }

    #[test]
    fn test_without_break_hour() {
        let rule = WeekendBreakConstraint::new(vec![7], None);

        assert_eq!(weekend_score(rule.clone(), monday(12, 0)), Score::zero());
        assert_eq!(weekend_score(rule.clone(), date(2024, 3, 9).at(9, 0, 0, 0)), Score::zero());
        assert_eq!(weekend_score(rule, date(2024, 3, 10).at(9, 0, 0, 0)), Score::hard(-1));
    }
}
