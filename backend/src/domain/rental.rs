//! Rental bookings and their pricing.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::{Car, CarId, RentalId, UserId};

/// Validation errors for a requested rental period.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RentalPeriodError {
    /// The end date does not fall after the start date.
    #[error("end date must be after start date")]
    EndNotAfterStart,
}

/// Inclusive start / exclusive end dates of a booking.
///
/// ## Invariants
/// - `end` is strictly after `start`, so a period always spans at least one
///   billable day.
///
/// # Examples
/// ```
/// use car_rental::domain::RentalPeriod;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
/// let period = RentalPeriod::new(start, end).unwrap();
/// assert_eq!(period.days(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl RentalPeriod {
    /// Validate and construct a rental period.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RentalPeriodError> {
        if end <= start {
            return Err(RentalPeriodError::EndNotAfterStart);
        }
        Ok(Self { start, end })
    }

    /// First day of the rental.
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Day the car is returned.
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of billable days.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Total price for renting at `price_per_day`.
    #[must_use]
    pub fn total_cost(&self, price_per_day: u32) -> i64 {
        i64::from(price_per_day).saturating_mul(self.days())
    }
}

/// A booking of one car by one renter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    #[schema(value_type = String)]
    id: RentalId,
    #[schema(value_type = String)]
    renter_id: UserId,
    #[schema(value_type = String)]
    car_id: CarId,
    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-01-03")]
    end_date: NaiveDate,
    #[schema(example = 100)]
    total_cost: i64,
}

impl Rental {
    /// Price a new booking of `car` for `renter` over `period`.
    #[must_use]
    pub fn book(renter_id: UserId, car: &Car, period: RentalPeriod) -> Self {
        Self {
            id: RentalId::random(),
            renter_id,
            car_id: *car.id(),
            start_date: period.start(),
            end_date: period.end(),
            total_cost: period.total_cost(car.price_per_day()),
        }
    }

    /// Rebuild a stored rental.
    #[must_use]
    pub fn from_parts(
        id: RentalId,
        renter_id: UserId,
        car_id: CarId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_cost: i64,
    ) -> Self {
        Self {
            id,
            renter_id,
            car_id,
            start_date,
            end_date,
            total_cost,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &RentalId {
        &self.id
    }

    /// The user who booked the car.
    #[must_use]
    pub fn renter_id(&self) -> &UserId {
        &self.renter_id
    }

    /// The booked car.
    #[must_use]
    pub fn car_id(&self) -> &CarId {
        &self.car_id
    }

    /// First day of the rental.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Return day.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Price charged for the whole period.
    #[must_use]
    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }

    /// Whether `user` made this booking.
    #[must_use]
    pub fn is_rented_by(&self, user: &UserId) -> bool {
        &self.renter_id == user
    }
}

/// A rental joined with the car it books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalWithCar {
    /// The booking.
    #[serde(flatten)]
    pub rental: Rental,
    /// The booked car.
    pub car: Car,
}
