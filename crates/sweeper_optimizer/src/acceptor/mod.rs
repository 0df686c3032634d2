pub mod accept_solution;
pub mod hill_climbing_acceptor;
pub mod simulated_annealing_acceptor;
pub mod solution_acceptor;
pub mod tabu_acceptor;
