//! Car fixtures for seeding the in-memory store.
//!
//! The fixture file is a JSON array of car records in the same camelCase
//! shape the API returns.

use std::path::Path;

use serde::Deserialize;

use crate::domain::{Car, CarId, IdValidationError, UserId};

/// Errors raised while loading car fixtures.
#[derive(Debug, thiserror::Error)]
pub enum CarFixtureError {
    /// The file could not be read.
    #[error("failed to read car fixtures from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a JSON array of cars.
    #[error("failed to parse car fixtures: {0}")]
    Parse(#[from] serde_json::Error),
    /// A record carries a malformed identifier.
    #[error("invalid car fixture: {0}")]
    Id(#[from] IdValidationError),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CarRecord {
    id: String,
    owner_id: String,
    make: String,
    model: String,
    price_per_day: u32,
    #[serde(default = "available")]
    availability: bool,
}

fn available() -> bool {
    true
}

impl TryFrom<CarRecord> for Car {
    type Error = IdValidationError;

    fn try_from(record: CarRecord) -> Result<Self, Self::Error> {
        Ok(Car::new(
            CarId::new(&record.id)?,
            UserId::new(&record.owner_id)?,
            record.make,
            record.model,
            record.price_per_day,
            record.availability,
        ))
    }
}

/// Parse cars from fixture JSON text.
pub fn parse_car_fixtures(json: &str) -> Result<Vec<Car>, CarFixtureError> {
    let records: Vec<CarRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .map(|record| Car::try_from(record).map_err(CarFixtureError::from))
        .collect()
}

/// Read and parse a car fixture file.
pub fn load_car_fixtures(path: &Path) -> Result<Vec<Car>, CarFixtureError> {
    let json = std::fs::read_to_string(path).map_err(|source| CarFixtureError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_car_fixtures(&json)
}
