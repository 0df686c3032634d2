use thiserror::Error;

/// Rejected input data. Raised while building a [`SchedulingProblem`], before
/// any search starts.
///
/// [`SchedulingProblem`]: crate::problem::scheduling_problem::SchedulingProblem
#[derive(Error, Debug)]
pub enum ProblemError {
    #[error("vehicle {vehicle_id}: {reason}")]
    InvalidVehicle { vehicle_id: String, reason: String },

    #[error("work order {work_order_id}: {reason}")]
    InvalidWorkOrder { work_order_id: String, reason: String },

    #[error("duplicate vehicle id {0}")]
    DuplicateVehicleId(String),

    #[error("duplicate work order id {0}")]
    DuplicateWorkOrderId(String),

    #[error("crew {crew} has no vehicles")]
    EmptyCrew { crew: usize },

    #[error("crew {crew} references unknown vehicle index {vehicle}")]
    UnknownVehicle { crew: usize, vehicle: usize },

    #[error("crew {crew} references unknown vehicle {vehicle_id}")]
    UnknownVehicleId { crew: usize, vehicle_id: String },

    #[error("malformed timestamp in field `{field}`: {value:?} ({source})")]
    MalformedTimestamp {
        field: &'static str,
        value: String,
        #[source]
        source: jiff::Error,
    },

    #[error("failed to read csv")]
    Csv(#[from] csv::Error),

    #[error("failed to read json")]
    Json(#[from] serde_json::Error),

    #[error("failed to read input file")]
    Io(#[from] std::io::Error),
}

/// Rejected solver configuration.
#[derive(Error, Debug, PartialEq)]
pub enum ParamsError {
    #[error("at least one termination condition must be specified")]
    NoTermination,

    #[error("sampled neighborhood needs a sample size of at least 1")]
    EmptySample,

    #[error("tabu tenure must be at least 1")]
    ZeroTabuTenure,

    #[error("cooling factor must be in (0, 1), got {0}")]
    InvalidCoolingFactor(f64),

    #[error("temperatures must not be negative")]
    NegativeTemperature,

    #[error("start time grid granularity must be positive")]
    InvalidGranularity,

    #[error("planning horizon must span at least one day")]
    EmptyPlanningHorizon,

    #[error("break hour must be within 0..24, got {0}")]
    InvalidBreakHour(i8),

    #[error("weekend days are numbered 1 (Monday) to 7 (Sunday), got {0}")]
    InvalidWeekendDay(i8),
}
