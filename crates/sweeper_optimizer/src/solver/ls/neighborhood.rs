use rand::Rng;

use crate::{problem::start_time_domain::StartTimeDomain, solver::solution::schedule::Schedule};

use super::{
    change_crew::ChangeCrewOperator,
    change_start_time::ChangeStartTimeOperator,
    r#move::{Move, MoveOperator},
    swap::SwapOperator,
};

/// Draws before giving up on finding a doable move.
const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// The moves reachable from a schedule in one step.
pub struct Neighborhood<'a> {
    domain: &'a StartTimeDomain,
}

impl<'a> Neighborhood<'a> {
    pub fn new(domain: &'a StartTimeDomain) -> Self {
        Neighborhood { domain }
    }

    pub fn domain(&self) -> &StartTimeDomain {
        self.domain
    }

    /// Every doable move, crew changes first, then start time changes, then
    /// swaps. The order only depends on the schedule.
    pub fn for_each_move<C>(&self, schedule: &Schedule, mut consumer: C)
    where
        C: FnMut(Move),
    {
        ChangeCrewOperator::generate_moves(schedule, self.domain, |op| {
            if op.is_doable(schedule) {
                consumer(Move::ChangeCrew(op))
            }
        });
        ChangeStartTimeOperator::generate_moves(schedule, self.domain, |op| {
            if op.is_doable(schedule) {
                consumer(Move::ChangeStartTime(op))
            }
        });
        SwapOperator::generate_moves(schedule, self.domain, |op| {
            if op.is_doable(schedule) {
                consumer(Move::Swap(op))
            }
        });
    }

    /// One random move: the kind is drawn uniformly, then its targets. The
    /// move may be a no-op.
    pub fn random_move<R>(&self, schedule: &Schedule, rng: &mut R) -> Option<Move>
    where
        R: Rng,
    {
        match rng.random_range(0..3) {
            0 => ChangeCrewOperator::random_move(schedule, self.domain, rng).map(Move::ChangeCrew),
            1 => ChangeStartTimeOperator::random_move(schedule, self.domain, rng)
                .map(Move::ChangeStartTime),
            _ => SwapOperator::random_move(schedule, self.domain, rng).map(Move::Swap),
        }
    }

    /// One random doable move, or `None` if none was found within a bounded
    /// number of draws.
    pub fn sample_move<R>(&self, schedule: &Schedule, rng: &mut R) -> Option<Move>
    where
        R: Rng,
    {
        (0..MAX_SAMPLE_ATTEMPTS)
            .filter_map(|_| self.random_move(schedule, rng))
            .find(|mv| mv.is_doable(schedule))
    }
}
