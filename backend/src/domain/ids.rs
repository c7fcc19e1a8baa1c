//! UUID-backed identifiers for users, cars, and rentals.
//!
//! Each identifier is a distinct type so a `CarId` can never be passed where a
//! `RentalId` is expected. All of them serialise as plain UUID strings.

use std::fmt;

/// Validation error returned when an identifier string is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The input was empty.
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },
    /// The input was not a valid UUID.
    #[error("{kind} must be a valid UUID")]
    Invalid { kind: &'static str },
}

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Parse an identifier from its textual UUID form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdValidationError> {
                let raw = id.as_ref();
                if raw.is_empty() {
                    return Err(IdValidationError::Empty { kind: $kind });
                }
                uuid::Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| IdValidationError::Invalid { kind: $kind })
            }

            /// Generate a fresh random identifier.
            #[must_use]
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(id: uuid::Uuid) -> Self {
                Self(id)
            }

            /// Access the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_uuid_id!(
    /// Stable user identifier.
    UserId,
    "user id"
);

define_uuid_id!(
    /// Stable car identifier.
    CarId,
    "car id"
);

define_uuid_id!(
    /// Stable rental identifier.
    RentalId,
    "rental id"
);
