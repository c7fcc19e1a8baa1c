//! PostgreSQL-backed `CarRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CarRepository, CarRepositoryError};
use crate::domain::{Car, CarId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::CarRow;
use super::pool::{DbPool, PoolError};
use super::schema::cars;

/// Diesel-backed implementation of the [`CarRepository`] port.
#[derive(Clone)]
pub struct DieselCarRepository {
    pool: DbPool,
}

impl DieselCarRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CarRepositoryError {
    map_basic_pool_error(error, CarRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CarRepositoryError {
    map_basic_diesel_error(
        error,
        CarRepositoryError::query,
        CarRepositoryError::connection,
    )
}

#[async_trait]
impl CarRepository for DieselCarRepository {
    async fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        cars::table
            .filter(cars::id.eq(*id.as_uuid()))
            .select(CarRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(|row| Car::try_from(row).map_err(CarRepositoryError::query))
            .transpose()
    }
}
