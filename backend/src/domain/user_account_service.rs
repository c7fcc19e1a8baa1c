//! Account domain service.
//!
//! Implements registration, login, and profile management on top of the user
//! repository and the password hasher.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AuthService, PasswordHashError, PasswordHasher, ProfileService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, ProfileUpdate, Registration, SessionIdentity, User, UserId,
};

pub(crate) const USERNAME_TAKEN: &str = "Username already taken";
pub(crate) const PASSWORD_MISMATCH: &str = "password and confirm password must match";
pub(crate) const LOGIN_FAILED: &str = "Login failed try again";
pub(crate) const USER_NOT_FOUND: &str = "User not found";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => Error::duplicate_user(USERNAME_TAKEN),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// Account service implementing [`AuthService`] and [`ProfileService`].
#[derive(Clone)]
pub struct UserAccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserAccountService<U, H> {
    /// Create a new service over the user store and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> AuthService for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_username(registration.username())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            return Err(Error::duplicate_user(USERNAME_TAKEN));
        }
        if !registration.confirmation_matches() {
            return Err(Error::password_mismatch(PASSWORD_MISMATCH));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            password_hash,
            registration.contact().clone(),
        );
        self.users.create(&user).await.map_err(map_user_error)?;

        info!(user_id = %user.id(), username = %user.username(), "registered user");
        Ok(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionIdentity, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            info!(username = %credentials.username(), reason = "unknown username", "login rejected");
            return Err(Error::auth_failed(LOGIN_FAILED));
        };

        let verified = match self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
        {
            Ok(verified) => verified,
            Err(PasswordHashError::MalformedHash { message }) => {
                warn!(user_id = %user.id(), %message, "stored password hash unreadable");
                false
            }
            Err(error) => return Err(map_hash_error(error)),
        };
        if !verified {
            info!(user_id = %user.id(), reason = "password mismatch", "login rejected");
            return Err(Error::auth_failed(LOGIN_FAILED));
        }

        debug!(user_id = %user.id(), "login accepted");
        Ok(SessionIdentity::from(&user))
    }
}

#[async_trait]
impl<U, H> ProfileService for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn fetch_profile(&self, identity: &SessionIdentity) -> Result<User, Error> {
        self.users
            .find_by_id(identity.user_id())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn update_profile(
        &self,
        identity: &SessionIdentity,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        let holder = self
            .users
            .find_by_username(&update.username)
            .await
            .map_err(map_user_error)?;
        if holder.is_some_and(|other| other.id() != identity.user_id()) {
            return Err(Error::duplicate_user(USERNAME_TAKEN));
        }

        let user = self
            .users
            .update_profile(identity.user_id(), &update)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;

        debug!(user_id = %user.id(), "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "user_account_service_tests.rs"]
mod tests;
