use crate::{
    problem::scheduling_problem::SchedulingProblem,
    solver::{score::Score, score_level::ScoreLevel},
};

use super::{
    constraint::PlannedWorkOrder, sand_cleaning_constraint::SandCleaningConstraint,
    shift_time_constraint::ShiftTimeConstraint,
    vehicle_capacity_constraint::VehicleCapacityConstraint,
    weekend_break_constraint::WeekendBreakConstraint,
};

/// A rule scored on a single assigned work order.
pub trait WorkOrderConstraint {
    fn score_level(&self) -> ScoreLevel;
    fn compute_score(&self, problem: &SchedulingProblem, planned: &PlannedWorkOrder) -> Score;
}

#[derive(Clone, Debug)]
pub enum WorkOrderConstraintType {
    VehicleCapacity(VehicleCapacityConstraint),
    ShiftTime(ShiftTimeConstraint),
    WeekendBreak(WeekendBreakConstraint),
    SandCleaning(SandCleaningConstraint),
}

impl WorkOrderConstraintType {
    pub fn constraint_name(&self) -> &'static str {
        match self {
            Self::VehicleCapacity(_) => "vehicle_capacity",
            Self::ShiftTime(_) => "shift_time",
            Self::WeekendBreak(_) => "weekend_break",
            Self::SandCleaning(_) => "maximize_sand_cleaning",
        }
    }
}

impl WorkOrderConstraint for WorkOrderConstraintType {
    fn score_level(&self) -> ScoreLevel {
        match self {
            Self::VehicleCapacity(c) => c.score_level(),
            Self::ShiftTime(c) => c.score_level(),
            Self::WeekendBreak(c) => c.score_level(),
            Self::SandCleaning(c) => c.score_level(),
        }
    }

    fn compute_score(&self, problem: &SchedulingProblem, planned: &PlannedWorkOrder) -> Score {
        match self {
            Self::VehicleCapacity(c) => c.compute_score(problem, planned),
            Self::ShiftTime(c) => c.compute_score(problem, planned),
            Self::WeekendBreak(c) => c.compute_score(problem, planned),
            Self::SandCleaning(c) => c.compute_score(problem, planned),
        }
    }
}
