//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Maximum length of a username, in characters.
pub const USERNAME_MAX: usize = 64;

/// Validation errors for user fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeds [`USERNAME_MAX`] characters.
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
}

/// Login name chosen at sign-up.
///
/// Surrounding whitespace is trimmed; case is preserved, so `Alice` and
/// `alice` are different users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Salted password hash as produced by a `PasswordHasher`.
///
/// Deliberately not serialisable so it can never leak into a response body.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash, suitable for storage.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Contact details a user may change from their profile page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactDetails {
    /// Email address, stored as given.
    pub email: Option<String>,
    /// Phone number, stored as given.
    pub phone: Option<String>,
}

impl ContactDetails {
    /// Build contact details, treating blank strings as absent.
    #[must_use]
    pub fn new(email: Option<String>, phone: Option<String>) -> Self {
        Self {
            email: non_blank(email),
            phone: non_blank(phone),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Registered user.
///
/// ## Invariants
/// - `username` is unique across all users.
/// - `password_hash` is never exposed outside the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
    contact: ContactDetails,
}

impl User {
    /// Assemble a user from validated parts.
    #[must_use]
    pub fn new(
        id: UserId,
        username: Username,
        password_hash: PasswordHash,
        contact: ContactDetails,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            contact,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Email and phone.
    #[must_use]
    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    /// Return a copy with the profile fields replaced.
    #[must_use]
    pub fn with_profile(mut self, update: ProfileUpdate) -> Self {
        self.username = update.username;
        self.contact = update.contact;
        self
    }
}

/// Replacement values for the editable profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New login name.
    pub username: Username,
    /// New email and phone.
    pub contact: ContactDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyUsername)]
    #[case("   ", UserValidationError::EmptyUsername)]
    fn blank_usernames_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Username::new(raw).expect_err("blank"), expected);
    }

    #[test]
    fn overlong_username_is_rejected() {
        let raw = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(raw).expect_err("too long"),
            UserValidationError::UsernameTooLong { max: USERNAME_MAX }
        );
    }

    #[test]
    fn username_is_trimmed_but_keeps_case() {
        let name = Username::new("  Alice ").expect("valid");
        assert_eq!(name.as_ref(), "Alice");
        assert_ne!(name, Username::new("alice").expect("valid"));
    }

    #[test]
    fn blank_contact_fields_become_none() {
        let contact = ContactDetails::new(Some("  ".into()), Some(" 555-0100 ".into()));
        assert_eq!(contact.email, None);
        assert_eq!(contact.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$2b$10$secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }

    #[test]
    fn with_profile_replaces_editable_fields_only() {
        let user = User::new(
            UserId::random(),
            Username::new("alice").expect("valid"),
            PasswordHash::new("hash"),
            ContactDetails::default(),
        );
        let id = *user.id();
        let updated = user.with_profile(ProfileUpdate {
            username: Username::new("alice2").expect("valid"),
            contact: ContactDetails::new(Some("a@example.com".into()), None),
        });
        assert_eq!(updated.id(), &id);
        assert_eq!(updated.username().as_ref(), "alice2");
        assert_eq!(updated.contact().email.as_deref(), Some("a@example.com"));
        assert_eq!(updated.password_hash().as_str(), "hash");
    }
}
