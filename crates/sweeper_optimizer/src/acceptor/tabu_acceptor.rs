use std::collections::VecDeque;

use crate::solver::ls::r#move::{ChangedWorkOrders, Move};

use super::accept_solution::{AcceptCandidate, AcceptSolution, AcceptSolutionContext};

/// Tabu search on work orders: the work orders changed by the last `tenure`
/// picked moves may not be changed again, unless the move would reach a new
/// best score (aspiration). Non-tabu moves are accepted whatever their score,
/// so the forager's best pick drives the search out of local optima.
#[derive(Debug, Clone)]
pub struct TabuAcceptor {
    tenure: usize,
    tabu: VecDeque<ChangedWorkOrders>,
}

impl TabuAcceptor {
    /// # Panics
    ///
    /// Panics if `tenure` is 0.
    pub fn new(tenure: usize) -> Self {
        assert!(tenure > 0, "called `TabuAcceptor::new()` with zero tenure");

        TabuAcceptor {
            tenure,
            tabu: VecDeque::with_capacity(tenure),
        }
    }

    fn is_tabu(&self, mv: &Move) -> bool {
        mv.changed_work_orders()
            .iter()
            .any(|id| self.tabu.iter().any(|entry| entry.contains(id)))
    }
}

impl AcceptSolution for TabuAcceptor {
    fn accept(&self, candidate: &AcceptCandidate, _context: AcceptSolutionContext) -> bool {
        !self.is_tabu(candidate.mv) || candidate.score > candidate.best_score
    }

    fn on_step_end(&mut self, picked: Option<&Move>) {
        let Some(mv) = picked else {
            return;
        };

        if self.tabu.len() >= self.tenure {
            self.tabu.pop_front();
        }
        self.tabu.push_back(mv.changed_work_orders());
    }

    fn on_restart(&mut self) {
        self.tabu.clear();
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};

    use crate::{
        problem::{crew::CrewIdx, work_order::WorkOrderIdx},
        solver::{
            ls::{
                change_crew::{ChangeCrewOperator, ChangeCrewOperatorParams},
                swap::{SwapOperator, SwapOperatorParams},
            },
            score::Score,
        },
    };

    use super::*;

    fn change_crew(work_order: usize) -> Move {
        Move::ChangeCrew(ChangeCrewOperator::new(ChangeCrewOperatorParams {
            work_order: WorkOrderIdx::new(work_order),
            crew: CrewIdx::new(0),
        }))
    }

    fn accepts(acceptor: &TabuAcceptor, mv: &Move, score: Score) -> bool {
        let mut rng = SmallRng::seed_from_u64(0);
        acceptor.accept(
            &AcceptCandidate {
                mv,
                score,
                current_score: Score::soft(10),
                best_score: Score::soft(20),
            },
            AcceptSolutionContext {
                iteration: 0,
                rng: &mut rng,
            },
        )
    }

    #[test]
    fn test_worse_non_tabu_moves_are_accepted() {
        let acceptor = TabuAcceptor::new(2);
        assert!(accepts(&acceptor, &change_crew(0), Score::soft(-50)));
    }

    #[test]
    fn test_recent_work_orders_are_tabu_until_tenure_expires() {
        let mut acceptor = TabuAcceptor::new(2);
        acceptor.on_step_end(Some(&change_crew(0)));
        acceptor.on_step_end(Some(&change_crew(1)));

        let swap = Move::Swap(SwapOperator::new(SwapOperatorParams {
            first: WorkOrderIdx::new(1),
            second: WorkOrderIdx::new(2),
        }));

        assert!(!accepts(&acceptor, &change_crew(0), Score::soft(15)));
        assert!(!accepts(&acceptor, &swap, Score::soft(15)));
        // Aspiration
        assert!(accepts(&acceptor, &change_crew(0), Score::soft(21)));

        acceptor.on_step_end(Some(&change_crew(3)));
        assert!(accepts(&acceptor, &change_crew(0), Score::soft(15)));

        acceptor.on_restart();
        assert!(accepts(&acceptor, &change_crew(1), Score::soft(15)));
    }
}
