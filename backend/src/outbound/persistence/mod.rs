//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` with `bb8` pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Business rules stay in the domain services.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: Diesel and pool failures map to each port's error
//!   enum; unique-constraint violations map to the matching domain conflict.
//!
//! # Example
//!
//! ```no_run
//! use car_rental::outbound::persistence::{DbPool, DieselRentalRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/rentals")).await?;
//! let rentals = DieselRentalRepository::new(pool);
//! # let _ = rentals;
//! # Ok(())
//! # }
//! ```

mod diesel_car_repository;
mod diesel_error_mapping;
mod diesel_rental_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_car_repository::DieselCarRepository;
pub use diesel_rental_repository::DieselRentalRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
