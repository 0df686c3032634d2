use rand::Rng;
use smallvec::SmallVec;

use crate::{
    problem::{start_time_domain::StartTimeDomain, work_order::WorkOrderIdx},
    solver::{
        score::Score,
        solution::{assignment::Assignment, schedule::Schedule},
    },
};

use super::{
    change_crew::ChangeCrewOperator, change_start_time::ChangeStartTimeOperator,
    swap::SwapOperator,
};

pub type ChangedWorkOrders = SmallVec<[WorkOrderIdx; 2]>;
pub type PreviousAssignments = SmallVec<[(WorkOrderIdx, Assignment); 2]>;

pub trait MoveOperator: Sized {
    /// Calls `consumer` with every operator of this kind reachable from
    /// `schedule`, doable or not, in a fixed order.
    fn generate_moves<C>(schedule: &Schedule, domain: &StartTimeDomain, consumer: C)
    where
        C: FnMut(Self);

    /// Draws one operator of this kind, or `None` when the problem offers no
    /// target for it.
    fn random_move<R>(schedule: &Schedule, domain: &StartTimeDomain, rng: &mut R) -> Option<Self>
    where
        R: Rng;

    fn changed_work_orders(&self) -> ChangedWorkOrders;

    /// `false` when applying the operator would leave the schedule unchanged.
    fn is_doable(&self, schedule: &Schedule) -> bool;

    /// Writes the new planning variables and returns the overwritten ones.
    fn apply(&self, schedule: &mut Schedule) -> PreviousAssignments;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Move {
    /// Moves a work order to another crew, keeping its start time.
    ChangeCrew(ChangeCrewOperator),
    /// Moves a work order to another start time, keeping its crew.
    ChangeStartTime(ChangeStartTimeOperator),
    /// Exchanges crew and start time between two work orders.
    Swap(SwapOperator),
}

/// Everything needed to revert one applied [`Move`].
#[derive(Debug, Clone)]
pub struct MoveUndo {
    previous: PreviousAssignments,
    previous_score: Option<Score>,
}

impl MoveUndo {
    pub fn previous_score(&self) -> Option<Score> {
        self.previous_score
    }

    /// Restores the overwritten assignments, newest first, and the score the
    /// schedule had before the move.
    pub fn revert(self, schedule: &mut Schedule) {
        for &(work_order_id, assignment) in self.previous.iter().rev() {
            schedule.set_assignment(work_order_id, assignment);
        }

        if let Some(score) = self.previous_score {
            schedule.set_score(score);
        }
    }
}

impl Move {
    pub fn operator_name(&self) -> &'static str {
        match self {
            Move::ChangeCrew(_) => "Change Crew",
            Move::ChangeStartTime(_) => "Change Start Time",
            Move::Swap(_) => "Swap",
        }
    }

    pub fn changed_work_orders(&self) -> ChangedWorkOrders {
        match self {
            Move::ChangeCrew(op) => op.changed_work_orders(),
            Move::ChangeStartTime(op) => op.changed_work_orders(),
            Move::Swap(op) => op.changed_work_orders(),
        }
    }

    pub fn is_doable(&self, schedule: &Schedule) -> bool {
        match self {
            Move::ChangeCrew(op) => op.is_doable(schedule),
            Move::ChangeStartTime(op) => op.is_doable(schedule),
            Move::Swap(op) => op.is_doable(schedule),
        }
    }

    /// Applies the move. The cached score is invalidated; use
    /// [`ScoreCalculator::do_move`](crate::solver::score_calculator::ScoreCalculator::do_move)
    /// to keep it up to date incrementally.
    pub fn apply(&self, schedule: &mut Schedule) -> MoveUndo {
        let previous_score = schedule.score();
        let previous = match self {
            Move::ChangeCrew(op) => op.apply(schedule),
            Move::ChangeStartTime(op) => op.apply(schedule),
            Move::Swap(op) => op.apply(schedule),
        };

        MoveUndo {
            previous,
            previous_score,
        }
    }
}
