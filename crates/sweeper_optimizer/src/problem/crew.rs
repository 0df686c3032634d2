use jiff::{SignedDuration, civil::DateTime};
use serde::Serialize;
use smallvec::SmallVec;

use crate::define_index_newtype;

use super::vehicle::{Vehicle, VehicleIdx};

define_index_newtype!(CrewIdx, Crew);

/// A crew works with one or more vehicles. Its capacity and shift are
/// derived from the vehicles once, when the problem is built.
///
/// The crew is on shift only while all of its vehicles are, so the shift
/// starts at the latest vehicle start and ends at the earliest vehicle end.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Crew {
    vehicle_ids: SmallVec<[VehicleIdx; 1]>,
    capacity: i64,
    shift_start: DateTime,
    shift_length: SignedDuration,
}

impl Crew {
    /// `vehicles` must not be empty; the problem builder checks this.
    pub(crate) fn from_vehicles(vehicle_ids: &[VehicleIdx], vehicles: &[Vehicle]) -> Self {
        let members = vehicle_ids.iter().map(|&id| &vehicles[id]);

        let capacity: i64 = members.clone().map(Vehicle::capacity).sum();
        let shift_start = members
            .clone()
            .map(Vehicle::shift_start)
            .max()
            .unwrap_or_default();
        let shift_end = members
            .map(Vehicle::shift_end)
            .min()
            .unwrap_or(shift_start);

        Crew {
            vehicle_ids: vehicle_ids.iter().copied().collect(),
            capacity,
            shift_start,
            shift_length: shift_start
                .duration_until(shift_end)
                .max(SignedDuration::ZERO),
        }
    }

    pub fn vehicle_ids(&self) -> &[VehicleIdx] {
        &self.vehicle_ids
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    pub fn shift_start(&self) -> DateTime {
        self.shift_start
    }

    pub fn shift_length(&self) -> SignedDuration {
        self.shift_length
    }

    pub fn shift_end(&self) -> DateTime {
        self.shift_start.saturating_add(self.shift_length)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::problem::vehicle::VehicleBuilder;

    use super::*;

    fn vehicle(capacity: i64, start_hour: i8, hours: i64) -> Vehicle {
        let mut builder = VehicleBuilder::default();
        builder
            .set_vehicle_id(format!("v{capacity}"))
            .set_capacity(capacity)
            .set_shift_length_hours(hours)
            .set_shift_start(date(2024, 3, 4).at(start_hour, 0, 0, 0));
        builder.build().unwrap()
    }

    #[test]
    fn test_single_vehicle_crew() {
        let vehicles = vec![vehicle(100, 8, 8)];
        let crew = Crew::from_vehicles(&[VehicleIdx::new(0)], &vehicles);

        assert_eq!(crew.capacity(), 100);
        assert_eq!(crew.shift_start(), date(2024, 3, 4).at(8, 0, 0, 0));
        assert_eq!(crew.shift_length(), SignedDuration::from_hours(8));
    }

    #[test]
    fn test_multi_vehicle_crew_intersects_shifts() {
        let vehicles = vec![vehicle(100, 8, 8), vehicle(50, 9, 10)];
        let crew = Crew::from_vehicles(&[VehicleIdx::new(0), VehicleIdx::new(1)], &vehicles);

        assert_eq!(crew.capacity(), 150);
        assert_eq!(crew.shift_start(), date(2024, 3, 4).at(9, 0, 0, 0));
        assert_eq!(crew.shift_end(), date(2024, 3, 4).at(16, 0, 0, 0));
    }
}
