use jiff::{
    SignedDuration,
    civil::{DateTime, Time},
};
use serde::Serialize;

use crate::{define_index_newtype, error::ProblemError};

define_index_newtype!(WorkOrderIdx, WorkOrder);

/// The fixed facts of a work order. The planning variables (crew and start
/// time) live in [`Schedule`](crate::solver::solution::schedule::Schedule).
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkOrder {
    external_id: String,
    task_id: i64,
    status: String,
    created_date: Option<DateTime>,
    est_completion_date: Option<DateTime>,
    est_completion_time: Option<Time>,
    severity: String,
    priority: String,
    area_code: String,
    sand_volume: i64,
    cleaning_duration: SignedDuration,
}

impl WorkOrder {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn task_id(&self) -> i64 {
        self.task_id
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Informational; `None` when the source left it blank.
    pub fn created_date(&self) -> Option<DateTime> {
        self.created_date
    }

    pub fn est_completion_date(&self) -> Option<DateTime> {
        self.est_completion_date
    }

    pub fn est_completion_time(&self) -> Option<Time> {
        self.est_completion_time
    }

    pub fn severity(&self) -> &str {
        &self.severity
    }

    pub fn priority(&self) -> &str {
        &self.priority
    }

    pub fn area_code(&self) -> &str {
        &self.area_code
    }

    pub fn sand_volume(&self) -> i64 {
        self.sand_volume
    }

    pub fn cleaning_duration(&self) -> SignedDuration {
        self.cleaning_duration
    }

    /// End of the cleaning window when started at `start_time`.
    pub fn end_time(&self, start_time: DateTime) -> DateTime {
        start_time.saturating_add(self.cleaning_duration)
    }
}

#[derive(Default)]
pub struct WorkOrderBuilder {
    external_id: Option<String>,
    task_id: Option<i64>,
    status: Option<String>,
    created_date: Option<DateTime>,
    est_completion_date: Option<DateTime>,
    est_completion_time: Option<Time>,
    severity: Option<String>,
    priority: Option<String>,
    area_code: Option<String>,
    sand_volume: Option<i64>,
    cleaning_duration_hours: Option<i64>,
}

impl WorkOrderBuilder {
    pub fn set_external_id(&mut self, external_id: impl Into<String>) -> &mut WorkOrderBuilder {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn set_task_id(&mut self, task_id: i64) -> &mut WorkOrderBuilder {
        self.task_id = Some(task_id);
        self
    }

    pub fn set_status(&mut self, status: impl Into<String>) -> &mut WorkOrderBuilder {
        self.status = Some(status.into());
        self
    }

    pub fn set_created_date(&mut self, created_date: DateTime) -> &mut WorkOrderBuilder {
        self.created_date = Some(created_date);
        self
    }

    pub fn set_est_completion_date(&mut self, date: DateTime) -> &mut WorkOrderBuilder {
        self.est_completion_date = Some(date);
        self
    }

    pub fn set_est_completion_time(&mut self, time: Time) -> &mut WorkOrderBuilder {
        self.est_completion_time = Some(time);
        self
    }

    pub fn set_severity(&mut self, severity: impl Into<String>) -> &mut WorkOrderBuilder {
        self.severity = Some(severity.into());
        self
    }

    pub fn set_priority(&mut self, priority: impl Into<String>) -> &mut WorkOrderBuilder {
        self.priority = Some(priority.into());
        self
    }

    pub fn set_area_code(&mut self, area_code: impl Into<String>) -> &mut WorkOrderBuilder {
        self.area_code = Some(area_code.into());
        self
    }

    pub fn set_sand_volume(&mut self, sand_volume: i64) -> &mut WorkOrderBuilder {
        self.sand_volume = Some(sand_volume);
        self
    }

    pub fn set_cleaning_duration_hours(&mut self, hours: i64) -> &mut WorkOrderBuilder {
        self.cleaning_duration_hours = Some(hours);
        self
    }

    pub fn build(self) -> Result<WorkOrder, ProblemError> {
        let external_id = self.external_id.unwrap_or_default();
        let invalid = |reason: &str| ProblemError::InvalidWorkOrder {
            work_order_id: external_id.clone(),
            reason: reason.to_owned(),
        };

        let sand_volume = self
            .sand_volume
            .ok_or_else(|| invalid("missing sand volume"))?;
        if sand_volume < 0 {
            return Err(invalid("sand volume must not be negative"));
        }

        let cleaning_duration_hours = self
            .cleaning_duration_hours
            .ok_or_else(|| invalid("missing cleaning duration"))?;
        if cleaning_duration_hours < 0 {
            return Err(invalid("cleaning duration must not be negative"));
        }

        Ok(WorkOrder {
            task_id: self.task_id.unwrap_or(0),
            status: self.status.unwrap_or_default(),
            created_date: self.created_date,
            est_completion_date: self.est_completion_date,
            est_completion_time: self.est_completion_time,
            severity: self.severity.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            area_code: self.area_code.unwrap_or_default(),
            sand_volume,
            cleaning_duration: SignedDuration::from_hours(cleaning_duration_hours),
            external_id,
        })
    }
}
