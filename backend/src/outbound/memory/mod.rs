//! In-process record store.
//!
//! Used when no database URL is configured and by the HTTP tests. One
//! [`InMemoryStore`] implements all three repository ports; every operation
//! takes a single lock over all tables, so a booking's car flip and rental
//! insert can never interleave with another request.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    CarRepository, CarRepositoryError, RentalRepository, RentalRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Car, CarId, ProfileUpdate, Rental, RentalId, RentalWithCar, User, UserId, Username,
};

mod fixtures;

pub use fixtures::{CarFixtureError, load_car_fixtures, parse_car_fixtures};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    cars: HashMap<CarId, Car>,
    rentals: HashMap<RentalId, Rental>,
}

impl Tables {
    fn username_holder(&self, username: &Username) -> Option<&User> {
        self.users.values().find(|user| user.username() == username)
    }
}

/// Mutex-guarded maps of users, cars, and rentals.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a car record.
    pub async fn insert_car(&self, car: Car) {
        self.tables.lock().await.cars.insert(*car.id(), car);
    }

    /// Add every car in `cars`.
    pub async fn insert_cars(&self, cars: impl IntoIterator<Item = Car> + Send) {
        let mut tables = self.tables.lock().await;
        for car in cars {
            tables.cars.insert(*car.id(), car);
        }
    }

    /// Number of stored rentals.
    pub async fn rental_count(&self) -> usize {
        self.tables.lock().await.rentals.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.tables.lock().await;
        if tables.username_holder(user.username()).is_some() {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        tables.users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.tables.lock().await.users.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.tables.lock().await.username_holder(username).cloned())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut tables = self.tables.lock().await;
        if tables
            .username_holder(&update.username)
            .is_some_and(|holder| holder.id() != id)
        {
            return Err(UserPersistenceError::duplicate_username(
                update.username.as_ref(),
            ));
        }
        let Some(current) = tables.users.remove(id) else {
            return Ok(None);
        };
        let updated = current.with_profile(update.clone());
        tables.users.insert(*id, updated.clone());
        Ok(Some(updated))
    }
}

#[async_trait]
impl CarRepository for InMemoryStore {
    async fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, CarRepositoryError> {
        Ok(self.tables.lock().await.cars.get(id).cloned())
    }
}

#[async_trait]
impl RentalRepository for InMemoryStore {
    async fn find_by_id(&self, id: &RentalId) -> Result<Option<Rental>, RentalRepositoryError> {
        Ok(self.tables.lock().await.rentals.get(id).cloned())
    }

    async fn list_for_renter(
        &self,
        renter: &UserId,
    ) -> Result<Vec<RentalWithCar>, RentalRepositoryError> {
        let tables = self.tables.lock().await;
        let mut joined: Vec<RentalWithCar> = tables
            .rentals
            .values()
            .filter(|rental| rental.is_rented_by(renter))
            .filter_map(|rental| {
                tables.cars.get(rental.car_id()).map(|car| RentalWithCar {
                    rental: rental.clone(),
                    car: car.clone(),
                })
            })
            .collect();
        joined.sort_by_key(|entry| (entry.rental.start_date(), *entry.rental.id()));
        Ok(joined)
    }

    async fn book(&self, rental: &Rental) -> Result<(), RentalRepositoryError> {
        let mut tables = self.tables.lock().await;
        let car_id = rental.car_id();
        let Some(car) = tables.cars.remove(car_id) else {
            return Err(RentalRepositoryError::car_unavailable(car_id.to_string()));
        };
        if !car.is_available() {
            tables.cars.insert(*car_id, car);
            return Err(RentalRepositoryError::car_unavailable(car_id.to_string()));
        }
        tables.cars.insert(*car_id, car.with_availability(false));
        tables.rentals.insert(*rental.id(), rental.clone());
        Ok(())
    }

    async fn cancel(&self, rental: &Rental) -> Result<(), RentalRepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.rentals.remove(rental.id()).is_none() {
            return Err(RentalRepositoryError::not_found(rental.id().to_string()));
        }
        if let Some(car) = tables.cars.remove(rental.car_id()) {
            tables
                .cars
                .insert(*rental.car_id(), car.with_availability(true));
        }
        Ok(())
    }
}
