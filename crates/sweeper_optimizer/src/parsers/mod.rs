use jiff::civil::{DateTime, Time};

use crate::error::ProblemError;

pub mod csv_parser;
pub mod json_parser;

pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// `strptime` formats used for the timestamp columns of the input records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormats {
    pub datetime: String,
    pub time: String,
}

impl Default for TimestampFormats {
    fn default() -> Self {
        TimestampFormats {
            datetime: String::from(DEFAULT_DATETIME_FORMAT),
            time: String::from(DEFAULT_TIME_FORMAT),
        }
    }
}

impl TimestampFormats {
    /// Blank values parse to `None`.
    pub fn parse_datetime(
        &self,
        field: &'static str,
        value: &str,
    ) -> Result<Option<DateTime>, ProblemError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }

        DateTime::strptime(&self.datetime, value)
            .map(Some)
            .map_err(|source| ProblemError::MalformedTimestamp {
                field,
                value: value.to_owned(),
                source,
            })
    }

    pub fn parse_time(&self, field: &'static str, value: &str) -> Result<Option<Time>, ProblemError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }

        Time::strptime(&self.time, value)
            .map(Some)
            .map_err(|source| ProblemError::MalformedTimestamp {
                field,
                value: value.to_owned(),
                source,
            })
    }
}
