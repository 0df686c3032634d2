use jiff::{SignedDuration, civil::DateTime};
use serde::Serialize;

use crate::{define_index_newtype, error::ProblemError};

define_index_newtype!(VehicleIdx, Vehicle);

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    external_id: String,
    speed: i64,
    capacity: i64,
    depot_name: String,
    shift_length: SignedDuration,
    return_depot: String,
    shift_start: DateTime,
}

impl Vehicle {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn speed(&self) -> i64 {
        self.speed
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    pub fn depot_name(&self) -> &str {
        &self.depot_name
    }

    pub fn return_depot(&self) -> &str {
        &self.return_depot
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

#[derive(Default)]
pub struct VehicleBuilder {
    external_id: Option<String>,
    speed: Option<i64>,
    capacity: Option<i64>,
    depot_name: Option<String>,
    shift_length_hours: Option<i64>,
    return_depot: Option<String>,
    shift_start: Option<DateTime>,
}

impl VehicleBuilder {
    pub fn set_vehicle_id(&mut self, external_id: impl Into<String>) -> &mut VehicleBuilder {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn set_speed(&mut self, speed: i64) -> &mut VehicleBuilder {
        self.speed = Some(speed);
        self
    }

    pub fn set_capacity(&mut self, capacity: i64) -> &mut VehicleBuilder {
        self.capacity = Some(capacity);
        self
    }

    pub fn set_depot_name(&mut self, depot_name: impl Into<String>) -> &mut VehicleBuilder {
        self.depot_name = Some(depot_name.into());
        self
    }

    pub fn set_shift_length_hours(&mut self, hours: i64) -> &mut VehicleBuilder {
        self.shift_length_hours = Some(hours);
        self
    }

    pub fn set_return_depot(&mut self, return_depot: impl Into<String>) -> &mut VehicleBuilder {
        self.return_depot = Some(return_depot.into());
        self
    }

    pub fn set_shift_start(&mut self, shift_start: DateTime) -> &mut VehicleBuilder {
        self.shift_start = Some(shift_start);
        self
    }

    pub fn build(self) -> Result<Vehicle, ProblemError> {
        let external_id = self.external_id.unwrap_or_default();
        let invalid = |reason: &str| ProblemError::InvalidVehicle {
            vehicle_id: external_id.clone(),
            reason: reason.to_owned(),
        };

        let speed = self.speed.unwrap_or(0);
        if speed < 0 {
            return Err(invalid("speed must not be negative"));
        }

        let capacity = self.capacity.ok_or_else(|| invalid("missing capacity"))?;
        if capacity < 0 {
            return Err(invalid("capacity must not be negative"));
        }

        let shift_length_hours = self
            .shift_length_hours
            .ok_or_else(|| invalid("missing shift length"))?;
        if shift_length_hours <= 0 {
            return Err(invalid("shift length must be positive"));
        }

        let shift_start = self
            .shift_start
            .ok_or_else(|| invalid("missing shift start"))?;

        Ok(Vehicle {
            speed,
            capacity,
            depot_name: self.depot_name.unwrap_or_default(),
            shift_length: SignedDuration::from_hours(shift_length_hours),
            return_depot: self.return_depot.unwrap_or_default(),
            shift_start,
            external_id,
        })
    }
}
