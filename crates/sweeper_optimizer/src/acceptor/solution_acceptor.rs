use crate::solver::{ls::r#move::Move, solver_params::AcceptorStrategy};

use super::{
    accept_solution::{AcceptCandidate, AcceptSolution, AcceptSolutionContext},
    hill_climbing_acceptor::HillClimbingAcceptor,
    simulated_annealing_acceptor::SimulatedAnnealingAcceptor,
    tabu_acceptor::TabuAcceptor,
};

#[derive(Debug, Clone)]
pub enum SolutionAcceptor {
    HillClimbing(HillClimbingAcceptor),
    SimulatedAnnealing(SimulatedAnnealingAcceptor),
    Tabu(TabuAcceptor),
}

impl SolutionAcceptor {
    pub fn from_strategy(strategy: &AcceptorStrategy) -> Self {
        match *strategy {
            AcceptorStrategy::HillClimbing => SolutionAcceptor::HillClimbing(HillClimbingAcceptor),
            AcceptorStrategy::SimulatedAnnealing {
                starting_temperature,
                cooling_factor,
                minimum_temperature,
            } => SolutionAcceptor::SimulatedAnnealing(SimulatedAnnealingAcceptor::new(
                starting_temperature,
                cooling_factor,
                minimum_temperature,
            )),
            AcceptorStrategy::TabuSearch { tenure } => {
                SolutionAcceptor::Tabu(TabuAcceptor::new(tenure))
            }
        }
    }
}

impl AcceptSolution for SolutionAcceptor {
    fn accept(&self, candidate: &AcceptCandidate, context: AcceptSolutionContext) -> bool {
        match self {
            SolutionAcceptor::HillClimbing(acceptor) => acceptor.accept(candidate, context),
            SolutionAcceptor::SimulatedAnnealing(acceptor) => acceptor.accept(candidate, context),
            SolutionAcceptor::Tabu(acceptor) => acceptor.accept(candidate, context),
        }
    }

    fn on_step_end(&mut self, picked: Option<&Move>) {
        match self {
            SolutionAcceptor::HillClimbing(acceptor) => acceptor.on_step_end(picked),
            SolutionAcceptor::SimulatedAnnealing(acceptor) => acceptor.on_step_end(picked),
            SolutionAcceptor::Tabu(acceptor) => acceptor.on_step_end(picked),
        }
    }

    fn on_restart(&mut self) {
        match self {
            SolutionAcceptor::HillClimbing(acceptor) => acceptor.on_restart(),
            SolutionAcceptor::SimulatedAnnealing(acceptor) => acceptor.on_restart(),
            SolutionAcceptor::Tabu(acceptor) => acceptor.on_restart(),
        }
    }
}
