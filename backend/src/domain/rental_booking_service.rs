//! Booking domain service.
//!
//! Checks availability and ownership before handing the paired rental and
//! car writes to the rental repository, which applies them atomically.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    CarRepository, CarRepositoryError, RentalRepository, RentalRepositoryError, RentalService,
};
use crate::domain::{
    Car, CarId, Error, Rental, RentalId, RentalPeriod, RentalWithCar, SessionIdentity,
};

pub(crate) const CAR_NOT_AVAILABLE: &str = "Car not available";
pub(crate) const OWN_CAR: &str = "You cannot rent your own car.";
pub(crate) const RENTAL_NOT_FOUND: &str = "Rental not found";
pub(crate) const NOT_RENTER: &str = "Forbidden";

fn map_car_error(error: CarRepositoryError) -> Error {
    match error {
        CarRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("car repository unavailable: {message}"))
        }
        CarRepositoryError::Query { message } => {
            Error::internal(format!("car repository error: {message}"))
        }
    }
}

fn map_rental_error(error: RentalRepositoryError) -> Error {
    match error {
        RentalRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("rental repository unavailable: {message}"))
        }
        RentalRepositoryError::Query { message } => {
            Error::internal(format!("rental repository error: {message}"))
        }
        RentalRepositoryError::CarUnavailable { .. } => Error::car_unavailable(CAR_NOT_AVAILABLE),
        RentalRepositoryError::NotFound { .. } => Error::not_found(RENTAL_NOT_FOUND),
    }
}

/// Booking service implementing [`RentalService`].
#[derive(Clone)]
pub struct RentalBookingService<C, R> {
    cars: Arc<C>,
    rentals: Arc<R>,
}

impl<C, R> RentalBookingService<C, R> {
    /// Create a new service over the car and rental stores.
    pub fn new(cars: Arc<C>, rentals: Arc<R>) -> Self {
        Self { cars, rentals }
    }
}

impl<C, R> RentalBookingService<C, R>
where
    C: CarRepository,
    R: RentalRepository,
{
    async fn available_car(&self, car_id: &CarId) -> Result<Car, Error> {
        self.cars
            .find_by_id(car_id)
            .await
            .map_err(map_car_error)?
            .filter(Car::is_available)
            .ok_or_else(|| Error::car_unavailable(CAR_NOT_AVAILABLE))
    }
}

#[async_trait]
impl<C, R> RentalService for RentalBookingService<C, R>
where
    C: CarRepository,
    R: RentalRepository,
{
    async fn rent_form(&self, car_id: &CarId) -> Result<Car, Error> {
        self.available_car(car_id).await
    }

    async fn create_rental(
        &self,
        identity: &SessionIdentity,
        car_id: &CarId,
        period: RentalPeriod,
    ) -> Result<Rental, Error> {
        let car = self.available_car(car_id).await?;
        if car.is_owned_by(identity.user_id()) {
            return Err(Error::self_rental_forbidden(OWN_CAR));
        }

        let rental = Rental::book(*identity.user_id(), &car, period);
        self.rentals.book(&rental).await.map_err(map_rental_error)?;

        info!(
            rental_id = %rental.id(),
            car_id = %rental.car_id(),
            renter_id = %rental.renter_id(),
            total_cost = rental.total_cost(),
            "rental booked"
        );
        Ok(rental)
    }

    async fn list_rentals(&self, identity: &SessionIdentity) -> Result<Vec<RentalWithCar>, Error> {
        self.rentals
            .list_for_renter(identity.user_id())
            .await
            .map_err(map_rental_error)
    }

    async fn cancel_rental(
        &self,
        identity: &SessionIdentity,
        rental_id: &RentalId,
    ) -> Result<(), Error> {
        let rental = self
            .rentals
            .find_by_id(rental_id)
            .await
            .map_err(map_rental_error)?
            .ok_or_else(|| Error::not_found(RENTAL_NOT_FOUND))?;
        if !rental.is_rented_by(identity.user_id()) {
            return Err(Error::forbidden(NOT_RENTER));
        }

        self.rentals
            .cancel(&rental)
            .await
            .map_err(map_rental_error)?;

        info!(rental_id = %rental.id(), car_id = %rental.car_id(), "rental cancelled");
        Ok(())
    }
}

#[cfg(test)]
#[path = "rental_booking_service_tests.rs"]
mod tests;
