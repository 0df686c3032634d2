use std::{io, path::Path};

use tracing::{debug, instrument};

use crate::{
    error::ProblemError,
    json::types::{JsonVehicle, JsonWorkOrder},
    problem::scheduling_problem::{SchedulingProblem, SchedulingProblemBuilder},
};

use super::TimestampFormats;

/// Reads a `vehicles.csv` and a `work_orders.csv` export. Every vehicle
/// forms its own crew.
#[derive(Debug, Clone, Default)]
pub struct CsvParser {
    formats: TimestampFormats,
}

impl CsvParser {
    pub fn new(formats: TimestampFormats) -> Self {
        CsvParser { formats }
    }

    #[instrument(skip_all, level = "debug")]
    pub fn parse<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        vehicles: P,
        work_orders: Q,
    ) -> Result<SchedulingProblem, ProblemError> {
        let vehicles = std::fs::File::open(vehicles)?;
        let work_orders = std::fs::File::open(work_orders)?;
        self.parse_readers(vehicles, work_orders)
    }

    pub fn parse_readers<V: io::Read, W: io::Read>(
        &self,
        vehicles: V,
        work_orders: W,
    ) -> Result<SchedulingProblem, ProblemError> {
        let vehicles = reader(vehicles)
            .deserialize::<JsonVehicle>()
            .map(|record| record?.to_vehicle(&self.formats))
            .collect::<Result<Vec<_>, _>>()?;

        let work_orders = reader(work_orders)
            .deserialize::<JsonWorkOrder>()
            .map(|record| record?.to_work_order(&self.formats))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            vehicles = vehicles.len(),
            work_orders = work_orders.len(),
            "Parsed csv input"
        );

        let mut builder = SchedulingProblemBuilder::default();
        builder.set_vehicles(vehicles).set_work_orders(work_orders);
        builder.build()
    }
}

fn reader<R: io::Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input)
}
