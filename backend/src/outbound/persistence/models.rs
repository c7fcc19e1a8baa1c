//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types live here so
//! every adapter decodes rows the same way.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Car, CarId, ContactDetails, PasswordHash, Rental, RentalId, User, UserId, Username,
};

use super::schema::{cars, rentals, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(&row.username)
            .map_err(|err| format!("stored username for {} is invalid: {err}", row.id))?;
        Ok(User::new(
            UserId::from_uuid(row.id),
            username,
            PasswordHash::new(row.password_hash),
            ContactDetails::new(row.email, row.phone),
        ))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            password_hash: user.password_hash().as_str(),
            email: user.contact().email.as_deref(),
            phone: user.contact().phone.as_deref(),
        }
    }
}

/// Changeset for the editable profile fields.
///
/// `treat_none_as_null` so clearing an email or phone writes NULL instead of
/// leaving the old value in place.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub(crate) struct ProfileChangeset<'a> {
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
}

/// Row struct for reading from the cars table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CarRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub make: String,
    pub model: String,
    pub price_per_day: i32,
    pub availability: bool,
}

impl TryFrom<CarRow> for Car {
    type Error = String;

    fn try_from(row: CarRow) -> Result<Self, Self::Error> {
        let price = u32::try_from(row.price_per_day)
            .map_err(|_| format!("car {} has negative price {}", row.id, row.price_per_day))?;
        Ok(Car::new(
            CarId::from_uuid(row.id),
            UserId::from_uuid(row.owner_id),
            row.make,
            row.model,
            price,
            row.availability,
        ))
    }
}

/// Row struct for reading from the rentals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rentals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RentalRow {
    pub id: Uuid,
    pub renter_id: Uuid,
    pub car_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: i64,
}

impl From<RentalRow> for Rental {
    fn from(row: RentalRow) -> Self {
        Rental::from_parts(
            RentalId::from_uuid(row.id),
            UserId::from_uuid(row.renter_id),
            CarId::from_uuid(row.car_id),
            row.start_date,
            row.end_date,
            row.total_cost,
        )
    }
}

/// Insertable struct for creating rentals.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rentals)]
pub(crate) struct NewRentalRow {
    pub id: Uuid,
    pub renter_id: Uuid,
    pub car_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: i64,
}

impl From<&Rental> for NewRentalRow {
    fn from(rental: &Rental) -> Self {
        Self {
            id: *rental.id().as_uuid(),
            renter_id: *rental.renter_id().as_uuid(),
            car_id: *rental.car_id().as_uuid(),
            start_date: rental.start_date(),
            end_date: rental.end_date(),
            total_cost: rental.total_cost(),
        }
    }
}
