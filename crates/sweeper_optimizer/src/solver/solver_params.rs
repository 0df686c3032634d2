use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::{error::ParamsError, problem::start_time_domain::StartTimeGrid};

use super::{constraints::constraint_params::ConstraintParams, score::Score};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    pub terminations: Vec<Termination>,
    pub construction_heuristic: ConstructionHeuristic,
    pub acceptor: AcceptorStrategy,
    pub neighborhood: NeighborhoodMode,
    pub restart: Option<RestartParams>,
    pub search_threads: Threads,
    pub seed: u64,
    pub start_time_grid: StartTimeGrid,
    pub constraints: ConstraintParams,
}

/// Stops the search as soon as one of the configured conditions holds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Duration(SignedDuration),
    Iterations(usize),
    IterationsWithoutImprovement(usize),
    /// Reached when the best score is at least this one.
    Score(Score),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionHeuristic {
    None,
    Greedy,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptorStrategy {
    HillClimbing,
    SimulatedAnnealing {
        /// Temperature of each score level at the first iteration.
        starting_temperature: Score,
        cooling_factor: f64,
        minimum_temperature: f64,
    },
    TabuSearch {
        tenure: usize,
    },
}

impl AcceptorStrategy {
    pub fn simulated_annealing() -> Self {
        AcceptorStrategy::SimulatedAnnealing {
            starting_temperature: Score::new(2, 0, 50),
            cooling_factor: 0.9995,
            minimum_temperature: 0.01,
        }
    }

    pub fn tabu_search() -> Self {
        AcceptorStrategy::TabuSearch { tenure: 7 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborhoodMode {
    /// Evaluate every doable move each iteration.
    Exhaustive,
    /// Evaluate `sample_size` random doable moves each iteration.
    Sampled { sample_size: usize },
}

/// Hill climbing with restarts: after `iterations_without_improvement`
/// iterations without a new best, continue from the best schedule perturbed
/// by `perturbation_moves` random moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartParams {
    pub iterations_without_improvement: usize,
    pub perturbation_moves: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            terminations: vec![
                Termination::IterationsWithoutImprovement(2000),
                Termination::Duration(SignedDuration::from_secs(30)),
            ],
            construction_heuristic: ConstructionHeuristic::Greedy,
            acceptor: AcceptorStrategy::simulated_annealing(),
            neighborhood: NeighborhoodMode::Sampled { sample_size: 32 },
            restart: Some(RestartParams {
                iterations_without_improvement: 500,
                perturbation_moves: 3,
            }),
            search_threads: Threads::Single,
            seed: 2427121,
            start_time_grid: StartTimeGrid::default(),
            constraints: ConstraintParams::default(),
        }
    }
}

impl SolverParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.terminations.is_empty() {
            return Err(ParamsError::NoTermination);
        }

        if let NeighborhoodMode::Sampled { sample_size: 0 } = self.neighborhood {
            return Err(ParamsError::EmptySample);
        }

        match self.acceptor {
            AcceptorStrategy::HillClimbing => {}
            AcceptorStrategy::TabuSearch { tenure } => {
                if tenure == 0 {
                    return Err(ParamsError::ZeroTabuTenure);
                }
            }
            AcceptorStrategy::SimulatedAnnealing {
                starting_temperature,
                cooling_factor,
                minimum_temperature,
            } => {
                if !(cooling_factor > 0.0 && cooling_factor < 1.0) {
                    return Err(ParamsError::InvalidCoolingFactor(cooling_factor));
                }

                if starting_temperature.hard_score < 0
                    || starting_temperature.medium_score < 0
                    || starting_temperature.soft_score < 0
                    || minimum_temperature < 0.0
                {
                    return Err(ParamsError::NegativeTemperature);
                }
            }
        }

        if !self.start_time_grid.granularity.is_positive() {
            return Err(ParamsError::InvalidGranularity);
        }

        if self.start_time_grid.planning_days == 0 {
            return Err(ParamsError::EmptyPlanningHorizon);
        }

        self.constraints.validate()
    }
}
