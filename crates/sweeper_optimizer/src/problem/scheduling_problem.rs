use fxhash::FxHashSet;

use crate::error::ProblemError;

use super::{
    crew::{Crew, CrewIdx},
    vehicle::{Vehicle, VehicleIdx},
    work_order::{WorkOrder, WorkOrderIdx},
};

/// Problem facts shared by every schedule of a run. Never mutated by the
/// search.
#[derive(Debug)]
pub struct SchedulingProblem {
    vehicles: Vec<Vehicle>,
    crews: Vec<Crew>,
    work_orders: Vec<WorkOrder>,
    max_crew_capacity: i64,
}

impl SchedulingProblem {
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn crews(&self) -> &[Crew] {
        &self.crews
    }

    pub fn crew(&self, crew_id: CrewIdx) -> &Crew {
        &self.crews[crew_id]
    }

    pub fn work_orders(&self) -> &[WorkOrder] {
        &self.work_orders
    }

    pub fn work_order(&self, work_order_id: WorkOrderIdx) -> &WorkOrder {
        &self.work_orders[work_order_id]
    }

    pub fn crew_ids(&self) -> impl DoubleEndedIterator<Item = CrewIdx> + Clone + use<> {
        CrewIdx::all(self.crews.len())
    }

    pub fn work_order_ids(&self) -> impl DoubleEndedIterator<Item = WorkOrderIdx> + Clone + use<> {
        WorkOrderIdx::all(self.work_orders.len())
    }

    pub fn random_work_order<R>(&self, rng: &mut R) -> WorkOrderIdx
    where
        R: rand::Rng,
    {
        rng.random_range(0..self.work_orders.len()).into()
    }

    pub fn random_crew<R>(&self, rng: &mut R) -> CrewIdx
    where
        R: rand::Rng,
    {
        rng.random_range(0..self.crews.len()).into()
    }

    /// Work orders no crew can carry. They keep the hard score below zero
    /// whatever the search does.
    pub fn oversized_work_orders(&self) -> impl Iterator<Item = &WorkOrder> {
        self.work_orders
            .iter()
            .filter(|work_order| work_order.sand_volume() > self.max_crew_capacity)
    }
}

#[derive(Default)]
pub struct SchedulingProblemBuilder {
    vehicles: Vec<Vehicle>,
    crews: Option<Vec<Vec<VehicleIdx>>>,
    work_orders: Vec<WorkOrder>,
}

impl SchedulingProblemBuilder {
    pub fn set_vehicles(&mut self, vehicles: Vec<Vehicle>) -> &mut SchedulingProblemBuilder {
        self.vehicles = vehicles;
        self
    }

    /// Groups vehicles into crews. Without it every vehicle forms its own
    /// crew, in vehicle order.
    pub fn set_crews(&mut self, crews: Vec<Vec<VehicleIdx>>) -> &mut SchedulingProblemBuilder {
        self.crews = Some(crews);
        self
    }

    pub fn set_work_orders(&mut self, work_orders: Vec<WorkOrder>) -> &mut SchedulingProblemBuilder {
        self.work_orders = work_orders;
        self
    }

    pub fn build(self) -> Result<SchedulingProblem, ProblemError> {
        let mut vehicle_ids = FxHashSet::default();
        for vehicle in &self.vehicles {
            if !vehicle_ids.insert(vehicle.external_id()) {
                return Err(ProblemError::DuplicateVehicleId(
                    vehicle.external_id().to_owned(),
                ));
            }
        }

        let mut work_order_ids = FxHashSet::default();
        for work_order in &self.work_orders {
            if !work_order_ids.insert(work_order.external_id()) {
                return Err(ProblemError::DuplicateWorkOrderId(
                    work_order.external_id().to_owned(),
                ));
            }
        }

        let crew_vehicles = self.crews.unwrap_or_else(|| {
            VehicleIdx::all(self.vehicles.len())
                .map(|vehicle_id| vec![vehicle_id])
                .collect()
        });

        let mut crews = Vec::with_capacity(crew_vehicles.len());
        for (crew, vehicle_ids) in crew_vehicles.iter().enumerate() {
            if vehicle_ids.is_empty() {
                return Err(ProblemError::EmptyCrew { crew });
            }

            if let Some(unknown) = vehicle_ids
                .iter()
                .find(|vehicle_id| vehicle_id.get() >= self.vehicles.len())
            {
                return Err(ProblemError::UnknownVehicle {
                    crew,
                    vehicle: unknown.get(),
                });
            }

            crews.push(Crew::from_vehicles(vehicle_ids, &self.vehicles));
        }

        let max_crew_capacity = crews.iter().map(Crew::capacity).max().unwrap_or(0);

        Ok(SchedulingProblem {
            vehicles: self.vehicles,
            crews,
            work_orders: self.work_orders,
            max_crew_capacity,
        })
    }
}
