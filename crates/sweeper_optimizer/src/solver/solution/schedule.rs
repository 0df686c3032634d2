use std::sync::Arc;

use jiff::civil::DateTime;

use crate::{
    problem::{
        crew::CrewIdx,
        scheduling_problem::SchedulingProblem,
        work_order::{WorkOrder, WorkOrderIdx},
    },
    solver::score::Score,
};

use super::assignment::Assignment;

/// The working solution: one [`Assignment`] per work order of the problem,
/// plus an index of the work orders each crew currently holds.
///
/// Problem facts are shared through the `Arc`, so cloning a schedule only
/// copies indices and timestamps.
#[derive(Clone)]
pub struct Schedule {
    problem: Arc<SchedulingProblem>,
    assignments: Vec<Assignment>,
    crew_work_orders: Vec<Vec<WorkOrderIdx>>,
    score: Option<Score>,
}

impl Schedule {
    /// A schedule with every work order unassigned.
    pub fn new(problem: Arc<SchedulingProblem>) -> Self {
        Schedule {
            assignments: vec![Assignment::UNASSIGNED; problem.work_orders().len()],
            crew_work_orders: vec![Vec::new(); problem.crews().len()],
            score: None,
            problem,
        }
    }

    pub fn problem(&self) -> &SchedulingProblem {
        &self.problem
    }

    pub fn shared_problem(&self) -> &Arc<SchedulingProblem> {
        &self.problem
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn assignment(&self, work_order_id: WorkOrderIdx) -> Assignment {
        self.assignments[work_order_id.get()]
    }

    pub fn crew(&self, work_order_id: WorkOrderIdx) -> Option<CrewIdx> {
        self.assignments[work_order_id.get()].crew
    }

    pub fn start_time(&self, work_order_id: WorkOrderIdx) -> Option<DateTime> {
        self.assignments[work_order_id.get()].start_time
    }

    pub fn is_assigned(&self, work_order_id: WorkOrderIdx) -> bool {
        self.assignments[work_order_id.get()].is_assigned()
    }

    pub fn assigned_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|assignment| assignment.is_assigned())
            .count()
    }

    /// Work orders whose crew is `crew_id`, with or without a start time.
    pub fn crew_work_orders(&self, crew_id: CrewIdx) -> &[WorkOrderIdx] {
        &self.crew_work_orders[crew_id.get()]
    }

    /// Assigned work orders with their facts, crew and window.
    pub fn planned_iter(
        &self,
    ) -> impl Iterator<Item = (WorkOrderIdx, &WorkOrder, CrewIdx, DateTime)> + '_ {
        self.problem
            .work_order_ids()
            .filter_map(move |work_order_id| {
                self.assignment(work_order_id)
                    .planned()
                    .map(|(crew, start)| {
                        (work_order_id, self.problem.work_order(work_order_id), crew, start)
                    })
            })
    }

    /// Overwrites the planning variables of a work order and keeps the crew
    /// index in sync. Invalidates the cached score.
    ///
    /// # Panics
    ///
    /// Panics if the crew is not one of the problem's crews.
    pub fn set_assignment(&mut self, work_order_id: WorkOrderIdx, assignment: Assignment) {
        if let Some(crew) = assignment.crew {
            assert!(
                crew.get() < self.crew_work_orders.len(),
                "work order {work_order_id} assigned to unknown crew {crew}"
            );
        }

        let previous = std::mem::replace(&mut self.assignments[work_order_id.get()], assignment);

        if previous.crew != assignment.crew {
            if let Some(previous_crew) = previous.crew {
                let members = &mut self.crew_work_orders[previous_crew.get()];
                let position = members
                    .iter()
                    .position(|&member| member == work_order_id)
                    .unwrap_or_else(|| {
                        panic!("crew index of {previous_crew} is missing work order {work_order_id}")
                    });
                members.swap_remove(position);
            }

            if let Some(crew) = assignment.crew {
                self.crew_work_orders[crew.get()].push(work_order_id);
            }
        }

        self.score = None;
    }

    pub fn set_crew(&mut self, work_order_id: WorkOrderIdx, crew: Option<CrewIdx>) {
        let assignment = Assignment {
            crew,
            ..self.assignment(work_order_id)
        };
        self.set_assignment(work_order_id, assignment);
    }

    pub fn set_start_time(&mut self, work_order_id: WorkOrderIdx, start_time: Option<DateTime>) {
        let assignment = Assignment {
            start_time,
            ..self.assignment(work_order_id)
        };
        self.set_assignment(work_order_id, assignment);
    }

    /// The score of the current assignment, if it has been computed since
    /// the last change.
    pub fn score(&self) -> Option<Score> {
        self.score
    }

    pub(crate) fn set_score(&mut self, score: Score) {
        self.score = Some(score);
    }

    /// Same planning variables for every work order.
    pub fn is_identical(&self, other: &Schedule) -> bool {
        self.assignments == other.assignments
    }
}

impl std::fmt::Debug for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schedule")
            .field("assignments", &self.assignments)
            .field("score", &self.score)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::civil::date;

    use crate::test_utils::{create_test_problem, create_vehicle, create_work_order};

    use super::*;

    #[test]
    fn test_new_schedule_is_unassigned() {
        let problem = Arc::new(create_test_problem(
            vec![create_vehicle("a", 100)],
            vec![create_work_order("1", 10, 1), create_work_order("2", 10, 1)],
        ));
        let schedule = Schedule::new(problem);

        assert_eq!(schedule.assigned_count(), 0);
        assert!(schedule.crew_work_orders(CrewIdx::new(0)).is_empty());
    }

    #[test]
    fn test_crew_index_follows_assignments() {
        let problem = Arc::new(create_test_problem(
            vec![create_vehicle("a", 100), create_vehicle("b", 100)],
            vec![create_work_order("1", 10, 1), create_work_order("2", 10, 1)],
        ));
        let mut schedule = Schedule::new(problem);
        let start = date(2024, 3, 4).at(8, 0, 0, 0);

        schedule.set_assignment(WorkOrderIdx::new(0), Assignment::new(CrewIdx::new(0), start));
        schedule.set_crew(WorkOrderIdx::new(1), Some(CrewIdx::new(0)));

        assert_eq!(
            schedule.crew_work_orders(CrewIdx::new(0)),
            &[WorkOrderIdx::new(0), WorkOrderIdx::new(1)]
        );
        assert_eq!(schedule.assigned_count(), 1);

        schedule.set_crew(WorkOrderIdx::new(0), Some(CrewIdx::new(1)));

        assert_eq!(schedule.crew_work_orders(CrewIdx::new(0)), &[WorkOrderIdx::new(1)]);
        assert_eq!(schedule.crew_work_orders(CrewIdx::new(1)), &[WorkOrderIdx::new(0)]);
        assert_eq!(schedule.start_time(WorkOrderIdx::new(0)), Some(start));
    }

    #[test]
    #[should_panic(expected = "unknown crew")]
    fn test_unknown_crew_panics() {
        let problem = Arc::new(create_test_problem(
            vec![create_vehicle("a", 100)],
            vec![create_work_order("1", 10, 1)],
        ));
        let mut schedule = Schedule::new(problem);

        schedule.set_crew(WorkOrderIdx::new(0), Some(CrewIdx::new(3)));
    }
}
