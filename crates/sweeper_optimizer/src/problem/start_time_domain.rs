use jiff::{SignedDuration, civil::DateTime};
use serde::{Deserialize, Serialize};

use super::{crew::CrewIdx, scheduling_problem::SchedulingProblem};

/// Shape of the candidate start times offered to the search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartTimeGrid {
    /// Distance between two consecutive candidate start times.
    pub granularity: SignedDuration,
    /// Number of consecutive days, starting at each crew's shift start, on
    /// which the crew can be planned.
    pub planning_days: usize,
}

impl Default for StartTimeGrid {
    fn default() -> Self {
        StartTimeGrid {
            granularity: SignedDuration::from_mins(30),
            planning_days: 1,
        }
    }
}

/// The bounded value range of the `start_time` planning variable.
#[derive(Debug, Clone)]
pub struct StartTimeDomain {
    per_crew: Vec<Vec<DateTime>>,
    all: Vec<DateTime>,
}

impl StartTimeDomain {
    pub fn new(problem: &SchedulingProblem, grid: &StartTimeGrid) -> Self {
        assert!(
            grid.granularity.is_positive(),
            "start time grid granularity must be positive, got {}",
            grid.granularity
        );

        let per_crew = problem
            .crews()
            .iter()
            .map(|crew| {
                let mut start_times = Vec::new();
                for day in 0..grid.planning_days {
                    let day_start = crew
                        .shift_start()
                        .saturating_add(SignedDuration::from_hours(24 * day as i64));
                    let mut offset = SignedDuration::ZERO;
                    while offset < crew.shift_length() {
                        start_times.push(day_start.saturating_add(offset));
                        offset += grid.granularity;
                    }
                }
                start_times
            })
            .collect::<Vec<_>>();

        let mut all = per_crew.iter().flatten().copied().collect::<Vec<_>>();
        all.sort_unstable();
        all.dedup();

        StartTimeDomain { per_crew, all }
    }

    /// Candidate start times for a work order assigned to `crew`, or the
    /// union over all crews when it has none.
    pub fn start_times(&self, crew: Option<CrewIdx>) -> &[DateTime] {
        match crew {
            Some(crew) => &self.per_crew[crew.get()],
            None => &self.all,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
