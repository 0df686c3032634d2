use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use jiff::{SignedDuration, Timestamp};
use tracing::{debug, instrument};

use crate::{
    problem::{
        scheduling_problem::SchedulingProblem, start_time_domain::StartTimeDomain,
        work_order::WorkOrderIdx,
    },
    solver::{
        score::Score,
        score_calculator::ScoreCalculator,
        solution::{assignment::Assignment, schedule::Schedule},
    },
};

/// When construction has to give up. Checked before each placement.
pub struct ConstructionBudget<'a> {
    pub is_stopped: &'a AtomicBool,
    pub started_at: Timestamp,
    pub max_duration: Option<SignedDuration>,
}

impl ConstructionBudget<'_> {
    pub fn is_exhausted(&self) -> bool {
        self.is_stopped.load(Ordering::Relaxed)
            || self.max_duration.is_some_and(|max_duration| {
                Timestamp::now().duration_since(self.started_at) > max_duration
            })
    }
}

/// Greedy construction. Work orders are placed one by one in decreasing
/// sand volume. Each goes to the first crew and start time, in crew then
/// time order, that does not lower the hard score; when every slot does,
/// it goes to the slot with the best resulting score.
///
/// Once the budget is exhausted the remaining work orders are left
/// unassigned. The returned schedule carries its score.
#[instrument(skip_all, level = "debug")]
pub fn construct_solution(
    problem: &Arc<SchedulingProblem>,
    domain: &StartTimeDomain,
    calculator: &ScoreCalculator,
    budget: &ConstructionBudget,
) -> Schedule {
    debug!("Start construction heuristic");
    let mut schedule = Schedule::new(Arc::clone(problem));
    let mut score = calculator.initialize(&mut schedule);

    for work_order in placement_order(problem) {
        if budget.is_exhausted() {
            debug!(
                assigned = schedule.assigned_count(),
                "Construction budget exhausted"
            );
            break;
        }

        if let Some(placed) = place_work_order(&mut schedule, domain, calculator, work_order, score)
        {
            score = placed;
        }
    }

    schedule.set_score(score);
    debug!(%score, assigned = schedule.assigned_count(), "Construction done");
    schedule
}

fn placement_order(problem: &SchedulingProblem) -> Vec<WorkOrderIdx> {
    let mut order = problem.work_order_ids().collect::<Vec<_>>();
    // Stable, so equal volumes keep input order.
    order.sort_by_key(|&id| std::cmp::Reverse(problem.work_order(id).sand_volume()));
    order
}

/// Returns the new schedule score, or `None` if the work order could not be
/// placed anywhere.
fn place_work_order(
    schedule: &mut Schedule,
    domain: &StartTimeDomain,
    calculator: &ScoreCalculator,
    work_order: WorkOrderIdx,
    score: Score,
) -> Option<Score> {
    let changed = [work_order];
    let previous = schedule.assignment(work_order);
    let base = score - calculator.partial_score(schedule, &changed);

    let mut best: Option<(Score, Assignment)> = None;

    for crew in schedule.problem().crew_ids() {
        for &start_time in domain.start_times(Some(crew)) {
            let assignment = Assignment::new(crew, start_time);
            schedule.set_assignment(work_order, assignment);
            let candidate = base + calculator.partial_score(schedule, &changed);

            if candidate.hard_score >= score.hard_score {
                return Some(candidate);
            }

            if best.is_none_or(|(best_score, _)| candidate > best_score) {
                best = Some((candidate, assignment));
            }
        }
    }

    match best {
        Some((best_score, assignment)) => {
            schedule.set_assignment(work_order, assignment);
            Some(best_score)
        }
        None => {
            schedule.set_assignment(work_order, previous);
            None
        }
    }
}
