//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{ProfileUpdate, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds the username.
        DuplicateUsername { username: String } => "username {username} is already taken",
    }
}

/// Driven port for the user record store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// Returns [`UserPersistenceError::DuplicateUsername`] when the username
    /// is taken, even if a prior existence check passed.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact, case-sensitive username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite the editable profile fields and return the updated user.
    ///
    /// Returns `Ok(None)` when no user has the given id.
    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError>;
}
