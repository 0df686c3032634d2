use jiff::civil::DateTime;
use rand::Rng;
use smallvec::smallvec;

use crate::{
    problem::{start_time_domain::StartTimeDomain, work_order::WorkOrderIdx},
    solver::solution::schedule::Schedule,
};

use super::r#move::{ChangedWorkOrders, MoveOperator, PreviousAssignments};

/// **Change Start Time**
///
/// Moves a work order to another start time taken from the start time
/// domain of its current crew.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeStartTimeOperator {
    params: ChangeStartTimeOperatorParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeStartTimeOperatorParams {
    pub work_order: WorkOrderIdx,
    pub start_time: DateTime,
}

impl ChangeStartTimeOperator {
    pub fn new(params: ChangeStartTimeOperatorParams) -> Self {
        ChangeStartTimeOperator { params }
    }

    pub fn work_order(&self) -> WorkOrderIdx {
        self.params.work_order
    }

    pub fn start_time(&self) -> DateTime {
        self.params.start_time
    }
}

impl MoveOperator for ChangeStartTimeOperator {
    fn generate_moves<C>(schedule: &Schedule, domain: &StartTimeDomain, mut consumer: C)
    where
        C: FnMut(Self),
    {
        for work_order in schedule.problem().work_order_ids() {
            for &start_time in domain.start_times(schedule.crew(work_order)) {
                consumer(ChangeStartTimeOperator::new(
                    ChangeStartTimeOperatorParams {
                        work_order,
                        start_time,
                    },
                ));
            }
        }
    }

    fn random_move<R>(schedule: &Schedule, domain: &StartTimeDomain, rng: &mut R) -> Option<Self>
    where
        R: Rng,
    {
        let problem = schedule.problem();
        if problem.work_orders().is_empty() {
            return None;
        }

        let work_order = problem.random_work_order(rng);
        let start_times = domain.start_times(schedule.crew(work_order));
        if start_times.is_empty() {
            return None;
        }

        Some(ChangeStartTimeOperator::new(ChangeStartTimeOperatorParams {
            work_order,
            start_time: start_times[rng.random_range(0..start_times.len())],
        }))
    }

    fn changed_work_orders(&self) -> ChangedWorkOrders {
        smallvec![self.params.work_order]
    }

    fn is_doable(&self, schedule: &Schedule) -> bool {
        schedule.start_time(self.params.work_order) != Some(self.params.start_time)
    }

    fn apply(&self, schedule: &mut Schedule) -> PreviousAssignments {
        let previous = schedule.assignment(self.params.work_order);
        schedule.set_start_time(self.params.work_order, Some(self.params.start_time));
        smallvec![(self.params.work_order, previous)]
    }
}
