use rand::Rng;
use smallvec::smallvec;

use crate::{
    problem::{start_time_domain::StartTimeDomain, work_order::WorkOrderIdx},
    solver::solution::schedule::Schedule,
};

use super::r#move::{ChangedWorkOrders, MoveOperator, PreviousAssignments};

/// **Swap**
///
/// Exchanges the crew and start time of two work orders.
///
/// ```text
/// BEFORE:
///    [first] -> (crew A, 08:00)    [second] -> (crew B, 13:00)
///
/// AFTER:
///    [first] -> (crew B, 13:00)    [second] -> (crew A, 08:00)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SwapOperator {
    params: SwapOperatorParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwapOperatorParams {
    pub first: WorkOrderIdx,
    pub second: WorkOrderIdx,
}

impl SwapOperator {
    pub fn new(params: SwapOperatorParams) -> Self {
        if params.first == params.second {
            panic!("SwapOperator: 'first' and 'second' work orders must be different.");
        }

        SwapOperator { params }
    }

    pub fn first(&self) -> WorkOrderIdx {
        self.params.first
    }

    pub fn second(&self) -> WorkOrderIdx {
        self.params.second
    }
}

impl MoveOperator for SwapOperator {
    fn generate_moves<C>(schedule: &Schedule, _domain: &StartTimeDomain, mut consumer: C)
    where
        C: FnMut(Self),
    {
        let count = schedule.problem().work_orders().len();
        for first in 0..count {
            for second in first + 1..count {
                consumer(SwapOperator::new(SwapOperatorParams {
                    first: WorkOrderIdx::new(first),
                    second: WorkOrderIdx::new(second),
                }));
            }
        }
    }

    fn random_move<R>(schedule: &Schedule, _domain: &StartTimeDomain, rng: &mut R) -> Option<Self>
    where
        R: Rng,
    {
        let count = schedule.problem().work_orders().len();
        if count < 2 {
            return None;
        }

        let first = rng.random_range(0..count);
        let mut second = rng.random_range(0..count - 1);
        if second >= first {
            second += 1;
        }

        Some(SwapOperator::new(SwapOperatorParams {
            first: WorkOrderIdx::new(first),
            second: WorkOrderIdx::new(second),
        }))
    }

    fn changed_work_orders(&self) -> ChangedWorkOrders {
        smallvec![self.params.first, self.params.second]
    }

    fn is_doable(&self, schedule: &Schedule) -> bool {
        schedule.assignment(self.params.first) != schedule.assignment(self.params.second)
    }

    fn apply(&self, schedule: &mut Schedule) -> PreviousAssignments {
        let first = schedule.assignment(self.params.first);
        let second = schedule.assignment(self.params.second);

        schedule.set_assignment(self.params.first, second);
        schedule.set_assignment(self.params.second, first);

        smallvec![(self.params.first, first), (self.params.second, second)]
    }
}
