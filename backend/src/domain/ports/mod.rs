//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Service`) are called by inbound adapters; driven ports
//! (`*Repository`, [`PasswordHasher`]) are implemented by outbound adapters.
//! Each driven port exposes a typed error so adapters map their failures into
//! predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_service;
mod car_repository;
mod password_hasher;
mod profile_service;
mod rental_repository;
mod rental_service;
mod user_repository;

pub use auth_service::AuthService;
#[cfg(test)]
pub use auth_service::MockAuthService;
#[cfg(test)]
pub use car_repository::MockCarRepository;
pub use car_repository::{CarRepository, CarRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use profile_service::MockProfileService;
pub use profile_service::ProfileService;
#[cfg(test)]
pub use rental_repository::MockRentalRepository;
pub use rental_repository::{RentalRepository, RentalRepositoryError};
#[cfg(test)]
pub use rental_service::MockRentalService;
pub use rental_service::RentalService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
