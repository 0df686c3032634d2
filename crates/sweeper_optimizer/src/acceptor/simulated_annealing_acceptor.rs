use rand::Rng;

use crate::solver::{ls::r#move::Move, score::Score};

use super::accept_solution::{AcceptCandidate, AcceptSolution, AcceptSolutionContext};

/// Simulated annealing over a lexicographic score.
///
/// Improving and equal moves are always accepted. A worsening move is
/// accepted with probability `exp(delta / t)`, where `delta` is the loss on
/// the most significant level that differs and `t` is that level's
/// temperature. All levels cool geometrically by `cooling_factor` per
/// iteration; a level whose temperature is at or below
/// `minimum_temperature` no longer accepts losses.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: Score,
    cooling_factor: f64,
    minimum_temperature: f64,
    temperature_ratio: f64,
}

impl SimulatedAnnealingAcceptor {
    /// # Panics
    ///
    /// Panics if `cooling_factor` is not strictly between `0.0` and `1.0`.
    pub fn new(starting_temperature: Score, cooling_factor: f64, minimum_temperature: f64) -> Self {
        assert!(
            cooling_factor > 0.0 && cooling_factor < 1.0,
            "called `SimulatedAnnealingAcceptor::new()` with invalid cooling factor: {cooling_factor}. Must be in (0.0, 1.0)"
        );

        SimulatedAnnealingAcceptor {
            starting_temperature,
            cooling_factor,
            minimum_temperature,
            temperature_ratio: 1.0,
        }
    }

    pub fn temperature(&self, starting_temperature: i64) -> f64 {
        starting_temperature as f64 * self.temperature_ratio
    }
}

impl AcceptSolution for SimulatedAnnealingAcceptor {
    fn accept(&self, candidate: &AcceptCandidate, context: AcceptSolutionContext) -> bool {
        let Some((level, delta)) = candidate.score.first_difference(&candidate.current_score)
        else {
            return true;
        };

        if delta > 0 {
            return true;
        }

        let temperature = self.temperature(self.starting_temperature.level(level));
        if temperature <= self.minimum_temperature {
            return false;
        }

        let probability = (delta as f64 / temperature).exp();
        context.rng.random::<f64>() < probability
    }

    fn on_step_end(&mut self, _picked: Option<&Move>) {
        self.temperature_ratio *= self.cooling_factor;
    }

    fn on_restart(&mut self) {
        self.temperature_ratio = 1.0;
    }
}
