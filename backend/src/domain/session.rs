//! Identity of the user bound to a session cookie.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{User, UserId, Username};

/// Which user a client is authenticated as.
///
/// Stored in the encrypted session cookie at login and passed explicitly to
/// every service call that needs an authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    user_id: UserId,
    #[schema(value_type = String, example = "alice")]
    username: Username,
}

impl SessionIdentity {
    /// Bind an identity to the given user.
    #[must_use]
    pub fn new(user_id: UserId, username: Username) -> Self {
        Self { user_id, username }
    }

    /// Authenticated user id.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Username at the time the identity was issued or last refreshed.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }
}

impl From<&User> for SessionIdentity {
    fn from(user: &User) -> Self {
        Self::new(*user.id(), user.username().clone())
    }
}
