use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::{
    error::ProblemError,
    parsers::TimestampFormats,
    problem::{
        scheduling_problem::{SchedulingProblem, SchedulingProblemBuilder},
        vehicle::{Vehicle, VehicleBuilder, VehicleIdx},
        work_order::{WorkOrder, WorkOrderBuilder},
    },
    solver::{accepted_solution::AcceptedSolution, score::Score},
};

/// Input document. Field names follow the vehicle and work order CSV columns.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "SchedulingProblem")]
pub struct JsonSchedulingProblem {
    pub vehicles: Vec<JsonVehicle>,
    pub work_orders: Vec<JsonWorkOrder>,

    /// Vehicle ids grouped into crews. One crew per vehicle when omitted.
    pub crews: Option<Vec<Vec<String>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "Vehicle")]
pub struct JsonVehicle {
    pub vehicle_num: String,
    #[serde(default)]
    pub speed: i64,
    pub vehicle_capacity: i64,
    #[serde(default)]
    pub vehicle_depot_name: String,
    /// Shift length in hours.
    pub shift_time: i64,
    #[serde(default)]
    pub vehicle_return_depot: String,
    pub vehicle_shift_start: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "WorkOrder")]
pub struct JsonWorkOrder {
    pub id: String,
    #[serde(default)]
    pub task_id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub est_cmp_date: String,
    #[serde(default)]
    pub est_cmp_time: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub area_code: String,
    pub sand_volume: i64,
    /// Cleaning duration in hours.
    pub time_taken_for_cleaning: i64,
}

impl JsonVehicle {
    pub fn to_vehicle(&self, formats: &TimestampFormats) -> Result<Vehicle, ProblemError> {
        let shift_start = formats
            .parse_datetime("vehicle_shift_start", &self.vehicle_shift_start)?
            .ok_or_else(|| ProblemError::InvalidVehicle {
                vehicle_id: self.vehicle_num.clone(),
                reason: String::from("missing shift start"),
            })?;

        let mut builder = VehicleBuilder::default();
        builder
            .set_vehicle_id(self.vehicle_num.as_str())
            .set_speed(self.speed)
            .set_capacity(self.vehicle_capacity)
            .set_depot_name(self.vehicle_depot_name.as_str())
            .set_shift_length_hours(self.shift_time)
            .set_return_depot(self.vehicle_return_depot.as_str())
            .set_shift_start(shift_start);

        builder.build()
    }
}

impl JsonWorkOrder {
    pub fn to_work_order(&self, formats: &TimestampFormats) -> Result<WorkOrder, ProblemError> {
        let mut builder = WorkOrderBuilder::default();
        builder
            .set_external_id(self.id.as_str())
            .set_task_id(self.task_id)
            .set_status(self.status.as_str())
            .set_severity(self.severity.as_str())
            .set_priority(self.priority.as_str())
            .set_area_code(self.area_code.as_str())
            .set_sand_volume(self.sand_volume)
            .set_cleaning_duration_hours(self.time_taken_for_cleaning);

        if let Some(created_date) = formats.parse_datetime("created_date", &self.created_date)? {
            builder.set_created_date(created_date);
        }

        if let Some(date) = formats.parse_datetime("est_cmp_date", &self.est_cmp_date)? {
            builder.set_est_completion_date(date);
        }

        if let Some(time) = formats.parse_time("est_cmp_time", &self.est_cmp_time)? {
            builder.set_est_completion_time(time);
        }

        builder.build()
    }
}

impl JsonSchedulingProblem {
    pub fn into_problem(self, formats: &TimestampFormats) -> Result<SchedulingProblem, ProblemError> {
        let vehicles = self
            .vehicles
            .iter()
            .map(|vehicle| vehicle.to_vehicle(formats))
            .collect::<Result<Vec<_>, _>>()?;

        let work_orders = self
            .work_orders
            .iter()
            .map(|work_order| work_order.to_work_order(formats))
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = SchedulingProblemBuilder::default();

        if let Some(crews) = &self.crews {
            let crews = crews
                .iter()
                .enumerate()
                .map(|(crew, vehicle_ids)| {
                    vehicle_ids
                        .iter()
                        .map(|vehicle_id| {
                            vehicles
                                .iter()
                                .position(|vehicle| vehicle.external_id() == vehicle_id)
                                .map(VehicleIdx::new)
                                .ok_or_else(|| ProblemError::UnknownVehicleId {
                                    crew,
                                    vehicle_id: vehicle_id.clone(),
                                })
                        })
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<Vec<_>, _>>()?;

            builder.set_crews(crews);
        }

        builder.set_vehicles(vehicles).set_work_orders(work_orders);
        builder.build()
    }
}

/// Output document for a solved schedule.
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "Schedule")]
pub struct JsonSchedule {
    pub score: Score,
    pub feasible: bool,
    pub analysis: Vec<JsonConstraintScore>,
    pub assignments: Vec<JsonAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonConstraintScore {
    pub constraint: String,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonAssignment {
    pub work_order_id: String,
    pub crew: Option<usize>,
    pub vehicle_ids: Vec<String>,
    pub start_time: Option<DateTime>,
    pub end_time: Option<DateTime>,
    pub sand_volume: i64,
}

impl JsonSchedule {
    pub fn from_solution(solution: &AcceptedSolution) -> Self {
        let schedule = &solution.schedule;
        let problem = schedule.problem();

        let mut analysis = solution
            .score_analysis
            .scores
            .iter()
            .map(|(&constraint, &score)| JsonConstraintScore {
                constraint: constraint.to_owned(),
                score,
            })
            .collect::<Vec<_>>();
        analysis.sort_by(|a, b| a.constraint.cmp(&b.constraint));

        let assignments = problem
            .work_order_ids()
            .map(|work_order_id| {
                let work_order = problem.work_order(work_order_id);
                let planned = schedule.assignment(work_order_id).planned();

                let vehicle_ids = planned
                    .map(|(crew, _)| {
                        problem
                            .crew(crew)
                            .vehicle_ids()
                            .iter()
                            .map(|&vehicle_id| problem.vehicle(vehicle_id).external_id().to_owned())
                            .collect()
                    })
                    .unwrap_or_default();

                JsonAssignment {
                    work_order_id: work_order.external_id().to_owned(),
                    crew: planned.map(|(crew, _)| crew.get()),
                    vehicle_ids,
                    start_time: planned.map(|(_, start_time)| start_time),
                    end_time: planned.map(|(_, start_time)| work_order.end_time(start_time)),
                    sand_volume: work_order.sand_volume(),
                }
            })
            .collect();

        JsonSchedule {
            score: solution.score,
            feasible: solution.is_feasible(),
            analysis,
            assignments,
        }
    }
}
