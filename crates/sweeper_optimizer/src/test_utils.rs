use std::sync::Arc;

use jiff::civil::{DateTime, date};
use rand::RngCore;

use crate::{
    problem::{
        crew::CrewIdx,
        scheduling_problem::{SchedulingProblem, SchedulingProblemBuilder},
        vehicle::{Vehicle, VehicleBuilder},
        work_order::{WorkOrder, WorkOrderBuilder, WorkOrderIdx},
    },
    solver::solution::{assignment::Assignment, schedule::Schedule},
};

/// Monday 2024-03-04 at the given time.
pub fn monday(hour: i8, minute: i8) -> DateTime {
    date(2024, 3, 4).at(hour, minute, 0, 0)
}

/// A vehicle on shift Monday 08:00-16:00.
pub fn create_vehicle(id: &str, capacity: i64) -> Vehicle {
    create_vehicle_with_shift(id, capacity, monday(8, 0), 8)
}

pub fn create_vehicle_with_shift(
    id: &str,
    capacity: i64,
    shift_start: DateTime,
    shift_hours: i64,
) -> Vehicle {
    let mut builder = VehicleBuilder::default();
    builder
        .set_vehicle_id(id)
        .set_speed(30)
        .set_capacity(capacity)
        .set_depot_name("depot")
        .set_shift_length_hours(shift_hours)
        .set_return_depot("depot")
        .set_shift_start(shift_start);
    builder.build().unwrap()
}

pub fn create_work_order(id: &str, sand_volume: i64, cleaning_hours: i64) -> WorkOrder {
    let mut builder = WorkOrderBuilder::default();
    builder
        .set_external_id(id)
        .set_status("open")
        .set_created_date(date(2024, 3, 1).at(9, 0, 0, 0))
        .set_sand_volume(sand_volume)
        .set_cleaning_duration_hours(cleaning_hours);
    builder.build().unwrap()
}

/// One crew per vehicle.
pub fn create_test_problem(vehicles: Vec<Vehicle>, work_orders: Vec<WorkOrder>) -> SchedulingProblem {
    let mut builder = SchedulingProblemBuilder::default();
    builder.set_vehicles(vehicles).set_work_orders(work_orders);
    builder.build().unwrap()
}

/// A schedule with the given `(work order, crew, start)` triples assigned and
/// every other work order unassigned.
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

pub struct MockRng {
    data: Vec<u64>,
    index: usize,
}

impl MockRng {
    pub fn new(data: Vec<u64>) -> Self {
        MockRng { data, index: 0 }
    }
}

impl RngCore for MockRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.data[self.index % self.data.len()];
        self.index = (self.index + 1) % self.data.len();
        value
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for byte in dst.iter_mut() {
            *byte = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_mock_rng_cycles() {
        let data = vec![1, 2, 3];
        let mut rng = MockRng::new(data.clone());

        for &expected in data.iter().cycle().take(6) {
            assert_eq!(rng.next_u64(), expected);
        }
    }

    #[test]
    fn test_mock_rng_random_bool() {
        let mut rng = MockRng::new(vec![u64::MAX / 4]);

        assert!(!rng.random_bool(0.20));
        assert!(rng.random_bool(0.26));
    }
}
