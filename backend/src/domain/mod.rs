//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! layers, and the services that implement the driving ports. Types are
//! immutable; invariants and serialisation contracts live in each type's
//! Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - User, Car, Rental: records handled by the booking workflow.
//! - SessionIdentity: who the caller is authenticated as.
//! - UserAccountService, RentalBookingService: driving port implementations.

pub mod auth;
pub mod car;
pub mod error;
pub mod ids;
pub mod ports;
pub mod rental;
mod rental_booking_service;
pub mod session;
pub mod trace_id;
pub mod user;
mod user_account_service;

pub use self::auth::{CredentialsValidationError, LoginCredentials, Registration};
pub use self::car::Car;
pub use self::error::{Error, ErrorCode};
pub use self::ids::{CarId, IdValidationError, RentalId, UserId};
pub use self::rental::{Rental, RentalPeriod, RentalPeriodError, RentalWithCar};
pub use self::rental_booking_service::RentalBookingService;
pub use self::session::SessionIdentity;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    ContactDetails, PasswordHash, ProfileUpdate, USERNAME_MAX, User, UserValidationError,
    Username,
};
pub use self::user_account_service::UserAccountService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use car_rental::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Forbidden"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
