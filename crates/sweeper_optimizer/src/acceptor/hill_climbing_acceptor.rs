use super::accept_solution::{AcceptCandidate, AcceptSolution, AcceptSolutionContext};

/// Accepts moves that do not make the working schedule worse. Equal scores
/// are accepted so the search can walk across plateaus.
#[derive(Debug, Clone, Default)]
pub struct HillClimbingAcceptor;

impl AcceptSolution for HillClimbingAcceptor {
    fn accept(&self, candidate: &AcceptCandidate, _context: AcceptSolutionContext) -> bool {
        candidate.score >= candidate.current_score
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
                r#move::Move,
            },
            score::Score,
        },
    };

    use super::*;

    #[test]
    fn test_accept_equal_or_better() {
        let mv = Move::ChangeCrew(ChangeCrewOperator::new(ChangeCrewOperatorParams {
            work_order: WorkOrderIdx::new(0),
            crew: CrewIdx::new(0),
        }));
        let mut rng = SmallRng::seed_from_u64(0);
        let acceptor = HillClimbingAcceptor;

        let mut accepts = |score: Score| {
            acceptor.accept(
                &AcceptCandidate {
                    mv: &mv,
                    score,
                    current_score: Score::new(-1, 0, 10),
                    best_score: Score::new(-1, 0, 10),
                },
                AcceptSolutionContext {
                    iteration: 0,
                    rng: &mut rng,
                },
            )
        };

        assert!(accepts(Score::new(-1, 0, 10)));
        assert!(accepts(Score::new(0, 0, -100)));
        assert!(!accepts(Score::new(-1, 0, 9)));
    }
}
