//! Driving port for the booking workflow.

use async_trait::async_trait;

use crate::domain::{
    Car, CarId, Error, Rental, RentalId, RentalPeriod, RentalWithCar, SessionIdentity,
};

/// Domain use-case port for renting cars.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RentalService: Send + Sync {
    /// Return the car a rent form is shown for, if it can be booked.
    async fn rent_form(&self, car_id: &CarId) -> Result<Car, Error>;

    /// Book `car_id` for the session user over `period`.
    async fn create_rental(
        &self,
        identity: &SessionIdentity,
        car_id: &CarId,
        period: RentalPeriod,
    ) -> Result<Rental, Error>;

    /// The session user's rentals joined with their cars.
    async fn list_rentals(&self, identity: &SessionIdentity) -> Result<Vec<RentalWithCar>, Error>;

    /// Cancel one of the session user's rentals and release the car.
    async fn cancel_rental(
        &self,
        identity: &SessionIdentity,
        rental_id: &RentalId,
    ) -> Result<(), Error>;
}
