use std::path::Path;

use tracing::instrument;

use crate::{
    error::ProblemError, json::types::JsonSchedulingProblem,
    problem::scheduling_problem::SchedulingProblem,
};

use super::TimestampFormats;

#[instrument(skip_all, level = "debug")]
pub fn parse_json_file<P: AsRef<Path>>(
    path: P,
    formats: &TimestampFormats,
) -> Result<SchedulingProblem, ProblemError> {
    let content = std::fs::read_to_string(path)?;
    parse_json(&content, formats)
}

pub fn parse_json(content: &str, formats: &TimestampFormats) -> Result<SchedulingProblem, ProblemError> {
    let input: JsonSchedulingProblem = serde_json::from_str(content)?;
    input.into_problem(formats)
}
