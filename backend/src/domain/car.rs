//! Car records as seen by the booking workflow.
//!
//! Cars are created and retired elsewhere; this service only reads them and
//! flips their availability flag.

use serde::Serialize;
use utoipa::ToSchema;

use super::{CarId, UserId};

/// A car offered for rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    #[schema(value_type = String, example = "8d1c7a4e-2f0b-4c55-9a51-2b1f6d7e9c10")]
    id: CarId,
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    owner_id: UserId,
    #[schema(example = "Toyota")]
    make: String,
    #[schema(example = "Corolla")]
    model: String,
    #[schema(example = 50)]
    price_per_day: u32,
    availability: bool,
}

impl Car {
    /// Assemble a car record.
    #[must_use]
    pub fn new(
        id: CarId,
        owner_id: UserId,
        make: impl Into<String>,
        model: impl Into<String>,
        price_per_day: u32,
        availability: bool,
    ) -> Self {
        Self {
            id,
            owner_id,
            make: make.into(),
            model: model.into(),
            price_per_day,
            availability,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &CarId {
        &self.id
    }

    /// The user who listed the car.
    #[must_use]
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Manufacturer.
    #[must_use]
    pub fn make(&self) -> &str {
        &self.make
    }

    /// Model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Daily price in whole currency units.
    #[must_use]
    pub fn price_per_day(&self) -> u32 {
        self.price_per_day
    }

    /// Whether the car can be booked right now.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.availability
    }

    /// Whether `user` owns this car.
    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }

    /// Return a copy with the availability flag set.
    #[must_use]
    pub fn with_availability(mut self, availability: bool) -> Self {
        self.availability = availability;
        self
    }
}
