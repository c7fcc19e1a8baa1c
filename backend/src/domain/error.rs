//! Domain-level error type.
//!
//! Errors are transport agnostic: services return them and the HTTP adapter
//! maps each [`ErrorCode`] to a status code. The serialised shape doubles as
//! the JSON error body sent to clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// No authenticated session accompanies the request.
    Unauthorized,
    /// Credentials did not match a stored user.
    AuthFailed,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// Registration or profile update used a username held by another user.
    DuplicateUser,
    /// Registration password and its confirmation differ.
    PasswordMismatch,
    /// The car is missing or already rented.
    CarUnavailable,
    /// Owners may not rent their own cars.
    SelfRentalForbidden,
    /// A backing store could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// A trace identifier is captured automatically when the error is built inside
/// a request scope.
///
/// # Examples
/// ```
/// use car_rental::domain::{Error, ErrorCode};
///
/// let err = Error::car_unavailable("Car not available");
/// assert_eq!(err.code(), ErrorCode::CarUnavailable);
/// assert_eq!(err.message(), "Car not available");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "car_unavailable")]
    code: ErrorCode,
    #[schema(example = "Car not available")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier, when the error was raised inside a request.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary structured details.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details.
    ///
    /// # Examples
    /// ```
    /// use car_rental::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad date").with_details(json!({ "field": "endDate" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::AuthFailed`].
    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::DuplicateUser`].
    pub fn duplicate_user(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateUser, message)
    }

    /// Convenience constructor for [`ErrorCode::PasswordMismatch`].
    pub fn password_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PasswordMismatch, message)
    }

    /// Convenience constructor for [`ErrorCode::CarUnavailable`].
    pub fn car_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CarUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::SelfRentalForbidden`].
    pub fn self_rental_forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SelfRentalForbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
