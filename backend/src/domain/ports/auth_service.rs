//! Driving port for registration and login.
//!
//! Inbound adapters call this port to create accounts and authenticate
//! credentials without knowing how users or hashes are stored.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, SessionIdentity, User};

/// Domain use-case port for account creation and authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account.
    ///
    /// Fails with `duplicate_user` when the username is taken and with
    /// `password_mismatch` when the confirmation differs, in that order.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Validate credentials and return the identity to store in the session.
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// `auth_failed`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<SessionIdentity, Error>;
}
