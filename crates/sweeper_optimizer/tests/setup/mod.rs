#![allow(dead_code)]

use std::sync::Arc;

use jiff::civil::{DateTime, date};
use sweeper_optimizer::{
    problem::{
        crew::CrewIdx,
        scheduling_problem::{SchedulingProblem, SchedulingProblemBuilder},
        vehicle::{Vehicle, VehicleBuilder},
        work_order::{WorkOrder, WorkOrderBuilder, WorkOrderIdx},
    },
    solver::solution::{assignment::Assignment, schedule::Schedule},
};

pub fn monday(hour: i8, minute: i8) -> DateTime {
    date(2024, 3, 4).at(hour, minute, 0, 0)
}

pub fn saturday(hour: i8, minute: i8) -> DateTime {
    date(2024, 3, 9).at(hour, minute, 0, 0)
}

pub fn create_vehicle(id: &str, capacity: i64, shift_start: DateTime, shift_hours: i64) -> Vehicle {
    let mut builder = VehicleBuilder::default();
    builder
        .set_vehicle_id(id)
        .set_speed(30)
        .set_capacity(capacity)
        .set_shift_length_hours(shift_hours)
        .set_shift_start(shift_start);
    builder.build().unwrap()
}

pub fn create_work_order(id: &str, sand_volume: i64, cleaning_hours: i64) -> WorkOrder {
    let mut builder = WorkOrderBuilder::default();
    builder
        .set_external_id(id)
        .set_sand_volume(sand_volume)
        .set_cleaning_duration_hours(cleaning_hours);
    builder.build().unwrap()
}

pub fn create_test_problem(vehicles: Vec<Vehicle>, work_orders: Vec<WorkOrder>) -> Arc<SchedulingProblem> {
    let mut builder = SchedulingProblemBuilder::default();
    builder.set_vehicles(vehicles).set_work_orders(work_orders);
    Arc::new(builder.build().unwrap())
}

/// Three Monday crews and a dozen work orders of mixed size. Everything fits
/// on the grid without overlaps.
pub fn create_depot_problem() -> Arc<SchedulingProblem> {
    let vehicles = vec![
        create_vehicle("v1", 100, monday(8, 0), 8),
        create_vehicle("v2", 80, monday(8, 0), 8),
        create_vehicle("v3", 60, monday(10, 0), 6),
    ];

    let work_orders = [
        (90, 2),
        (75, 1),
        (60, 3),
        (55, 1),
        (40, 2),
        (35, 1),
        (30, 1),
        (25, 2),
        (20, 1),
        (15, 1),
        (10, 1),
        (5, 1),
    ]
    .iter()
    .enumerate()
    .map(|(index, &(sand, hours))| create_work_order(&format!("wo-{index}"), sand, hours))
    .collect();

    create_test_problem(vehicles, work_orders)
}

pub fn create_test_schedule(
    problem: Arc<SchedulingProblem>,
    assignments: &[(usize, usize, DateTime)],
) -> Schedule {
    let mut schedule = Schedule::new(problem);
    for &(work_order, crew, start_time) in assignments {
        schedule.set_assignment(
            WorkOrderIdx::new(work_order),
            Assignment::new(CrewIdx::new(crew), start_time),
        );
    }
    schedule
}
