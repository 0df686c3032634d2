use jiff::civil::DateTime;
use serde::Serialize;

use crate::problem::crew::CrewIdx;

/// The planning variables of one work order.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Assignment {
    pub crew: Option<CrewIdx>,
    pub start_time: Option<DateTime>,
}

impl Assignment {
    pub const UNASSIGNED: Assignment = Assignment {
        crew: None,
        start_time: None,
    };

    pub fn new(crew: CrewIdx, start_time: DateTime) -> Self {
        Assignment {
            crew: Some(crew),
            start_time: Some(start_time),
        }
    }

    /// Both planning variables are set.
    pub fn is_assigned(&self) -> bool {
        self.crew.is_some() && self.start_time.is_some()
    }

    /// Crew and start time, when both are set.
    pub fn planned(&self) -> Option<(CrewIdx, DateTime)> {
        self.crew.zip(self.start_time)
    }
}
