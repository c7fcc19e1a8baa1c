//! Driving port for the signed-in user's profile.

use async_trait::async_trait;

use crate::domain::{Error, ProfileUpdate, SessionIdentity, User};

/// Domain use-case port for reading and editing one's own profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Fetch the session user's record.
    async fn fetch_profile(&self, identity: &SessionIdentity) -> Result<User, Error>;

    /// Replace the session user's username, email, and phone.
    async fn update_profile(
        &self,
        identity: &SessionIdentity,
        update: ProfileUpdate,
    ) -> Result<User, Error>;
}
