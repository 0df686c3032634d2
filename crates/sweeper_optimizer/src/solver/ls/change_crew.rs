use rand::Rng;
use smallvec::smallvec;

use crate::{
    problem::{crew::CrewIdx, start_time_domain::StartTimeDomain, work_order::WorkOrderIdx},
    solver::solution::schedule::Schedule,
};

use super::r#move::{ChangedWorkOrders, MoveOperator, PreviousAssignments};

/// **Change Crew**
///
/// Hands a work order over to another crew. The start time is kept, so the
/// work order stays unassigned if it had no start time yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeCrewOperator {
    params: ChangeCrewOperatorParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeCrewOperatorParams {
    pub work_order: WorkOrderIdx,
    pub crew: CrewIdx,
}

impl ChangeCrewOperator {
    pub fn new(params: ChangeCrewOperatorParams) -> Self {
        ChangeCrewOperator { params }
    }

    pub fn work_order(&self) -> WorkOrderIdx {
        self.params.work_order
    }

    pub fn crew(&self) -> CrewIdx {
        self.params.crew
    }
}

impl MoveOperator for ChangeCrewOperator {
    fn generate_moves<C>(schedule: &Schedule, _domain: &StartTimeDomain, mut consumer: C)
    where
        C: FnMut(Self),
    {
        let problem = schedule.problem();
        for work_order in problem.work_order_ids() {
            for crew in problem.crew_ids() {
                consumer(ChangeCrewOperator::new(ChangeCrewOperatorParams {
                    work_order,
                    crew,
                }));
            }
        }
    }

    fn random_move<R>(schedule: &Schedule, _domain: &StartTimeDomain, rng: &mut R) -> Option<Self>
    where
        R: Rng,
    {
        let problem = schedule.problem();
        if problem.work_orders().is_empty() || problem.crews().is_empty() {
            return None;
        }

        Some(ChangeCrewOperator::new(ChangeCrewOperatorParams {
            work_order: problem.random_work_order(rng),
            crew: problem.random_crew(rng),
        }))
    }

    fn changed_work_orders(&self) -> ChangedWorkOrders {
        smallvec![self.params.work_order]
    }

    fn is_doable(&self, schedule: &Schedule) -> bool {
        schedule.crew(self.params.work_order) != Some(self.params.crew)
    }

    fn apply(&self, schedule: &mut Schedule) -> PreviousAssignments {
        let previous = schedule.assignment(self.params.work_order);
        schedule.set_crew(self.params.work_order, Some(self.params.crew));
        smallvec![(self.params.work_order, previous)]
    }
}
