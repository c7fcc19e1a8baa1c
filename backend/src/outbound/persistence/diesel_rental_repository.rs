//! PostgreSQL-backed `RentalRepository` implementation using Diesel ORM.
//!
//! Booking runs in one transaction: a conditional update claims the car
//! (`availability = true` → `false`) and the rental row is inserted only if
//! the claim succeeded. The `rentals_car_id_key` unique index backs this up
//! so two concurrent bookings can never both commit.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{RentalRepository, RentalRepositoryError};
use crate::domain::{Car, Rental, RentalId, RentalWithCar, UserId};

use super::diesel_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{CarRow, NewRentalRow, RentalRow};
use super::pool::{DbPool, PoolError};
use super::schema::{cars, rentals};

const ONE_RENTAL_PER_CAR: &str = "rentals_car_id_key";

/// Diesel-backed implementation of the [`RentalRepository`] port.
#[derive(Clone)]
pub struct DieselRentalRepository {
    pool: DbPool,
}

impl DieselRentalRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a booking or cancellation transaction.
#[derive(Debug)]
enum TxError {
    Diesel(diesel::result::Error),
    CarUnavailable,
    RentalGone,
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> RentalRepositoryError {
    map_basic_pool_error(error, RentalRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RentalRepositoryError {
    map_basic_diesel_error(
        error,
        RentalRepositoryError::query,
        RentalRepositoryError::connection,
    )
}

fn map_tx_error(error: TxError, rental: &Rental) -> RentalRepositoryError {
    match error {
        TxError::CarUnavailable => RentalRepositoryError::car_unavailable(rental.car_id().to_string()),
        TxError::RentalGone => RentalRepositoryError::not_found(rental.id().to_string()),
        TxError::Diesel(err) if is_unique_violation(&err, ONE_RENTAL_PER_CAR) => {
            RentalRepositoryError::car_unavailable(rental.car_id().to_string())
        }
        TxError::Diesel(err) => map_diesel_error(err),
    }
}

fn join_row(
    (rental, car): (RentalRow, CarRow),
) -> Result<RentalWithCar, RentalRepositoryError> {
    let car = Car::try_from(car).map_err(RentalRepositoryError::query)?;
    Ok(RentalWithCar {
        rental: Rental::from(rental),
        car,
    })
}

#[async_trait]
impl RentalRepository for DieselRentalRepository {
    async fn find_by_id(&self, id: &RentalId) -> Result<Option<Rental>, RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = rentals::table
            .filter(rentals::id.eq(*id.as_uuid()))
            .select(RentalRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Rental::from))
    }

    async fn list_for_renter(
        &self,
        renter: &UserId,
    ) -> Result<Vec<RentalWithCar>, RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(RentalRow, CarRow)> = rentals::table
            .inner_join(cars::table)
            .filter(rentals::renter_id.eq(*renter.as_uuid()))
            .order_by((rentals::start_date.asc(), rentals::id.asc()))
            .select((RentalRow::as_select(), CarRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(join_row).collect()
    }

    async fn book(&self, rental: &Rental) -> Result<(), RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let car_id = *rental.car_id().as_uuid();
        let new_row = NewRentalRow::from(rental);

        conn.transaction::<_, TxError, _>(|conn| {
            async move {
                let claimed = diesel::update(
                    cars::table
                        .filter(cars::id.eq(car_id))
                        .filter(cars::availability.eq(true)),
                )
                .set(cars::availability.eq(false))
                .execute(conn)
                .await?;
                if claimed == 0 {
                    return Err(TxError::CarUnavailable);
                }

                diesel::insert_into(rentals::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_tx_error(err, rental))?;

        debug!(rental_id = %rental.id(), car_id = %rental.car_id(), "rental committed");
        Ok(())
    }

    async fn cancel(&self, rental: &Rental) -> Result<(), RentalRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rental_id = *rental.id().as_uuid();
        let car_id = *rental.car_id().as_uuid();

        conn.transaction::<_, TxError, _>(|conn| {
            async move {
                let removed = diesel::delete(rentals::table.filter(rentals::id.eq(rental_id)))
                    .execute(conn)
                    .await?;
                if removed == 0 {
                    return Err(TxError::RentalGone);
                }

                diesel::update(cars::table.filter(cars::id.eq(car_id)))
                    .set(cars::availability.eq(true))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_tx_error(err, rental))
    }
}
