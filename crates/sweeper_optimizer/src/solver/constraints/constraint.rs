use jiff::civil::DateTime;

use crate::{
    problem::{
        crew::{Crew, CrewIdx},
        work_order::{WorkOrder, WorkOrderIdx},
    },
    solver::{score::Score, score_level::ScoreLevel, solution::schedule::Schedule},
};

use super::{
    back_to_back_constraint::BackToBackConstraint,
    constraint_params::ConstraintParams,
    no_overlap_constraint::NoOverlapConstraint,
    pair_constraint::{PairConstraint, PairConstraintType},
    sand_cleaning_constraint::SandCleaningConstraint,
    shift_time_constraint::ShiftTimeConstraint,
    vehicle_capacity_constraint::VehicleCapacityConstraint,
    weekend_break_constraint::WeekendBreakConstraint,
    work_order_constraint::{WorkOrderConstraint, WorkOrderConstraintType},
};

/// A work order with both planning variables set, resolved against the
/// problem facts. Rules only ever see planned work orders, so an unassigned
/// work order never contributes to the score.
#[derive(Debug, Clone, Copy)]
pub struct PlannedWorkOrder<'a> {
    pub id: WorkOrderIdx,
    pub work_order: &'a WorkOrder,
    pub crew_id: CrewIdx,
    pub crew: &'a Crew,
    pub start_time: DateTime,
    pub end_time: DateTime,
}

impl<'a> PlannedWorkOrder<'a> {
    pub fn from_schedule(schedule: &'a Schedule, id: WorkOrderIdx) -> Option<Self> {
        let problem = schedule.problem();
        schedule
            .assignment(id)
            .planned()
            .map(|(crew_id, start_time)| {
                let work_order = problem.work_order(id);
                PlannedWorkOrder {
                    id,
                    work_order,
                    crew_id,
                    crew: problem.crew(crew_id),
                    start_time,
                    end_time: work_order.end_time(start_time),
                }
            })
    }
}

#[derive(Clone, Debug)]
pub enum Constraint {
    WorkOrder(WorkOrderConstraintType),
    Pair(PairConstraintType),
}

impl Constraint {
    /// The default rule set: four hard rules and two soft ones. The medium
    /// level is left free for additional rules.
    pub fn default_constraints(params: &ConstraintParams, planning_days: usize) -> Vec<Constraint> {
        vec![
            // Hard constraints
            Constraint::WorkOrder(WorkOrderConstraintType::VehicleCapacity(
                VehicleCapacityConstraint,
            )),
            Constraint::WorkOrder(WorkOrderConstraintType::ShiftTime(
                ShiftTimeConstraint::new(planning_days),
            )),
            Constraint::WorkOrder(WorkOrderConstraintType::WeekendBreak(
                WeekendBreakConstraint::new(params.weekend_days.clone(), params.break_hour),
            )),
            Constraint::Pair(PairConstraintType::NoOverlap(NoOverlapConstraint)),
            // Soft constraints
            Constraint::WorkOrder(WorkOrderConstraintType::SandCleaning(
                SandCleaningConstraint::new(params.sand_cleaning_weight),
            )),
            Constraint::Pair(PairConstraintType::BackToBack(BackToBackConstraint)),
        ]
    }

    pub fn score_level(&self) -> ScoreLevel {
        match self {
            Constraint::WorkOrder(constraint) => constraint.score_level(),
            Constraint::Pair(constraint) => constraint.score_level(),
        }
    }

    pub fn constraint_name(&self) -> &'static str {
        match self {
            Constraint::WorkOrder(c) => c.constraint_name(),
            Constraint::Pair(c) => c.constraint_name(),
        }
    }

    /// Total contribution of this rule over the whole schedule.
    pub fn compute_score(&self, schedule: &Schedule) -> Score {
        let problem = schedule.problem();
        match self {
            Constraint::WorkOrder(constraint) => problem
                .work_order_ids()
                .filter_map(|id| PlannedWorkOrder::from_schedule(schedule, id))
                .fold(Score::zero(), |acc, planned| {
                    acc + constraint.compute_score(problem, &planned)
                }),
            Constraint::Pair(constraint) => {
                problem.crew_ids().fold(Score::zero(), |acc, crew_id| {
                    let members = planned_members(schedule, crew_id);
                    let mut score = acc;
                    for (index, first) in members.iter().enumerate() {
                        for second in &members[index + 1..] {
                            score += constraint.compute_pair_score(first, second);
                        }
                    }
                    score
                })
            }
        }
    }

    /// Contribution of this rule restricted to the terms that involve at
    /// least one of `changed`. A pair of two changed work orders is counted
    /// once.
    pub fn compute_partial_score(&self, schedule: &Schedule, changed: &[WorkOrderIdx]) -> Score {
        let problem = schedule.problem();
        match self {
            Constraint::WorkOrder(constraint) => changed
                .iter()
                .filter_map(|&id| PlannedWorkOrder::from_schedule(schedule, id))
                .fold(Score::zero(), |acc, planned| {
                    acc + constraint.compute_score(problem, &planned)
                }),
            Constraint::Pair(constraint) => {
                let mut score = Score::zero();
                for &id in changed {
                    let Some(planned) = PlannedWorkOrder::from_schedule(schedule, id) else {
                        continue;
                    };

                    for &mate_id in schedule.crew_work_orders(planned.crew_id) {
                        if mate_id == id || (mate_id < id && changed.contains(&mate_id)) {
                            continue;
                        }

                        if let Some(mate) = PlannedWorkOrder::from_schedule(schedule, mate_id) {
                            score += constraint.compute_pair_score(&planned, &mate);
                        }
                    }
                }
                score
            }
        }
    }
}

fn planned_members(schedule: &Schedule, crew_id: CrewIdx) -> Vec<PlannedWorkOrder<'_>> {
    schedule
        .crew_work_orders(crew_id)
        .iter()
        .filter_map(|&id| PlannedWorkOrder::from_schedule(schedule, id))
        .collect()
}
