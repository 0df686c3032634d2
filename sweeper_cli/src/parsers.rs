use jiff::SpanRelativeTo;
use sweeper_optimizer::solver::solver_params::{AcceptorStrategy, ConstructionHeuristic};

pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_secs(seconds.abs()));
    }

    Err(String::from("Invalid duration"))
}

/// Acceptors by name, with their default parameters.
pub fn parse_acceptor(input: &str) -> Result<AcceptorStrategy, String> {
    match input.to_ascii_lowercase().as_str() {
        "hill-climbing" | "hc" => Ok(AcceptorStrategy::HillClimbing),
        "simulated-annealing" | "sa" => Ok(AcceptorStrategy::simulated_annealing()),
        "tabu" | "tabu-search" => Ok(AcceptorStrategy::tabu_search()),
        _ => Err(format!(
            "Unknown acceptor {input:?}, expected one of hill-climbing, simulated-annealing, tabu"
        )),
    }
}

pub fn parse_construction(input: &str) -> Result<ConstructionHeuristic, String> {
    match input.to_ascii_lowercase().as_str() {
        "none" => Ok(ConstructionHeuristic::None),
        "greedy" => Ok(ConstructionHeuristic::Greedy),
        _ => Err(format!("Unknown construction heuristic {input:?}")),
    }
}
