//! Authentication primitives: login credentials and registration requests.
//!
//! Handlers hand raw strings to these constructors so the services only ever
//! see validated input.

use zeroize::Zeroizing;

use super::{ContactDetails, UserValidationError, Username};

/// Domain error returned when login or registration values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Username failed validation.
    #[error(transparent)]
    Username(#[from] UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use car_rental::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "hunter2").unwrap();
/// assert_eq!(creds.username().as_ref(), "alice");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        Ok(Self {
            username,
            password: non_empty_password(password)?,
        })
    }

    /// Username used for the lookup.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up request.
///
/// The confirmation is carried rather than checked here: a taken username is
/// reported before a mismatched confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
    confirm_password: Zeroizing<String>,
    contact: ContactDetails,
}

impl Registration {
    /// Validate raw sign-up fields.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        confirm_password: &str,
        contact: ContactDetails,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        Ok(Self {
            username,
            password: non_empty_password(password)?,
            confirm_password: Zeroizing::new(confirm_password.to_owned()),
            contact,
        })
    }

    /// Requested login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plain-text password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Whether the confirmation repeats the password exactly.
    #[must_use]
    pub fn confirmation_matches(&self) -> bool {
        self.password == self.confirm_password
    }

    /// Optional email and phone.
    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }
}

fn non_empty_password(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsValidationError::Username(UserValidationError::EmptyUsername))]
    #[case("   ", "pw", CredentialsValidationError::Username(UserValidationError::EmptyUsername))]
    #[case("user", "", CredentialsValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialsValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  admin  ", "secret")]
    #[case("alice", " correct horse battery staple ")]
    fn valid_credentials_trim_username_only(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username().as_ref(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("pw", "pw", true)]
    #[case("pw", "pw ", false)]
    #[case("pw", "", false)]
    fn registration_reports_confirmation_match(
        #[case] password: &str,
        #[case] confirm: &str,
        #[case] expected: bool,
    ) {
        let reg = Registration::try_from_parts("bob", password, confirm, ContactDetails::default())
            .expect("shape is valid");
        assert_eq!(reg.confirmation_matches(), expected);
    }

    #[test]
    fn registration_checks_blank_password_before_confirmation() {
        let err = Registration::try_from_parts("bob", "", "x", ContactDetails::default())
            .expect_err("blank password must fail");
        assert_eq!(err, CredentialsValidationError::EmptyPassword);
    }

    #[test]
    fn registration_keeps_contact_details() {
        let contact = ContactDetails::new(Some("bob@example.com".into()), None);
        let reg = Registration::try_from_parts("bob", "pw", "pw", contact.clone())
            .expect("valid registration");
        assert_eq!(reg.username().as_ref(), "bob");
        assert_eq!(reg.password(), "pw");
        assert_eq!(reg.contact(), &contact);
    }
}
