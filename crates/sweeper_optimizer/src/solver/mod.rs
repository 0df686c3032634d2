pub mod accepted_solution;
pub mod constraints;
pub mod construction;
pub mod ls;
pub mod score;
pub mod score_calculator;
pub mod score_level;
pub mod solution;
pub mod solution_repository;
pub mod solver;
pub mod solver_params;
pub mod statistics;
