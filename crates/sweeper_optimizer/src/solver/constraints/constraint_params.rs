use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

/// Tunables of the default constraint set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintParams {
    /// Hour of day (0..24) at which no work order may start.
    pub break_hour: Option<i8>,
    /// Days on which no work order may start, numbered 1 (Monday) to
    /// 7 (Sunday).
    pub weekend_days: Vec<i8>,
    /// Soft reward per unit of cleaned sand.
    pub sand_cleaning_weight: i64,
}

impl Default for ConstraintParams {
    fn default() -> Self {
        ConstraintParams {
            break_hour: Some(12),
            weekend_days: vec![6, 7],
            sand_cleaning_weight: 1,
        }
    }
}

impl ConstraintParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if let Some(hour) = self.break_hour
            && !(0..24).contains(&hour)
        {
            return Err(ParamsError::InvalidBreakHour(hour));
        }

        if let Some(&day) = self
            .weekend_days
            .iter()
            .find(|day| !(1..=7).contains(*day))
        {
            return Err(ParamsError::InvalidWeekendDay(day));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert_eq!(ConstraintParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_reject_weekend_day_out_of_range() {
        let params = ConstraintParams {
            weekend_days: vec![6, 0],
            ..ConstraintParams::default()
        };

        assert_eq!(params.validate(), Err(ParamsError::InvalidWeekendDay(0)));

        let params = ConstraintParams {
            weekend_days: vec![8],
            ..ConstraintParams::default()
        };

        assert_eq!(params.validate(), Err(ParamsError::InvalidWeekendDay(8)));
    }

    #[test]
    fn test_reject_break_hour_out_of_range() {
        let params = ConstraintParams {
            break_hour: Some(24),
            ..ConstraintParams::default()
        };

        assert_eq!(params.validate(), Err(ParamsError::InvalidBreakHour(24)));
    }
}
