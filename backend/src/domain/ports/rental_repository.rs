//! Port abstraction for rental persistence.
//!
//! Booking and cancellation each touch two records: the rental row and the
//! car's availability flag. Adapters must apply both writes atomically.
use async_trait::async_trait;

use crate::domain::{Rental, RentalId, RentalWithCar, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by rental repository adapters.
    pub enum RentalRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "rental repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "rental repository query failed: {message}",
        /// The car is missing or no longer available.
        CarUnavailable { car_id: String } => "car {car_id} is not available",
        /// The rental no longer exists.
        NotFound { rental_id: String } => "rental {rental_id} not found",
    }
}

/// Driven port for the rental record store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Fetch a rental by identifier.
    async fn find_by_id(&self, id: &RentalId) -> Result<Option<Rental>, RentalRepositoryError>;

    /// Every rental booked by `renter`, joined with its car and ordered by
    /// start date.
    async fn list_for_renter(
        &self,
        renter: &UserId,
    ) -> Result<Vec<RentalWithCar>, RentalRepositoryError>;

    /// Mark the rental's car unavailable and store the rental in one step.
    ///
    /// Fails with [`RentalRepositoryError::CarUnavailable`] when the car is
    /// absent or already unavailable; nothing is written in that case.
    async fn book(&self, rental: &Rental) -> Result<(), RentalRepositoryError>;

    /// Delete the rental and mark its car available in one step.
    ///
    /// Fails with [`RentalRepositoryError::NotFound`] when the rental has
    /// already been removed.
    async fn cancel(&self, rental: &Rental) -> Result<(), RentalRepositoryError>;
}
