//! Builders wiring storage adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{CarRepository, PasswordHasher, RentalRepository, UserRepository};
use crate::domain::{RentalBookingService, UserAccountService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DieselCarRepository, DieselRentalRepository, DieselUserRepository,
};

use super::{ServerConfig, Storage};

/// Assemble the account and booking services over one set of repositories.
fn state_from_repositories<U, C, R, H>(
    users: Arc<U>,
    cars: Arc<C>,
    rentals: Arc<R>,
    hasher: Arc<H>,
) -> HttpState
where
    U: UserRepository + 'static,
    C: CarRepository + 'static,
    R: RentalRepository + 'static,
    H: PasswordHasher + 'static,
{
    let accounts = Arc::new(UserAccountService::new(users, hasher));
    let booking = Arc::new(RentalBookingService::new(cars, rentals));
    HttpState::new(accounts.clone(), accounts, booking)
}

/// Build the shared HTTP state for the configured storage backend.
#[must_use]
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let hasher = Arc::new(config.hasher.clone());
    let state = match &config.storage {
        Storage::Postgres(pool) => state_from_repositories(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselCarRepository::new(pool.clone())),
            Arc::new(DieselRentalRepository::new(pool.clone())),
            hasher,
        ),
        Storage::Memory(store) => {
            state_from_repositories(store.clone(), store.clone(), store.clone(), hasher)
        }
    };
    web::Data::new(state)
}
