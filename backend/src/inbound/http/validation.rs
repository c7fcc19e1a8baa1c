//! Shared validation helpers for inbound HTTP adapters.
//!
//! Failures become `invalid_request` errors whose `details` name the
//! offending field and a machine-readable reason.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{
    CarId, CredentialsValidationError, Error, RentalId, RentalPeriod, UserValidationError,
};

/// Calendar date format accepted for rental periods.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation reason codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidDate,
    EndBeforeStart,
    EmptyUsername,
    UsernameTooLong,
    EmptyPassword,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidDate => "invalid_date",
            Self::EndBeforeStart => "end_not_after_start",
            Self::EmptyUsername => "empty_username",
            Self::UsernameTooLong => "username_too_long",
            Self::EmptyPassword => "empty_password",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const START_DATE: FieldName = FieldName::new("startDate");
pub(crate) const END_DATE: FieldName = FieldName::new("endDate");
pub(crate) const USERNAME: FieldName = FieldName::new("username");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");

fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_value_error(
    field: FieldName,
    code: ValidationCode,
    value: &str,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {name}"),
    )
}

pub(crate) fn parse_car_id(value: &str) -> Result<CarId, Error> {
    let field = FieldName::new("carId");
    CarId::new(value).map_err(|_| {
        field_value_error(
            field,
            ValidationCode::InvalidUuid,
            value,
            "carId must be a valid UUID",
        )
    })
}

pub(crate) fn parse_rental_id(value: &str) -> Result<RentalId, Error> {
    let field = FieldName::new("id");
    RentalId::new(value).map_err(|_| {
        field_value_error(
            field,
            ValidationCode::InvalidUuid,
            value,
            "id must be a valid UUID",
        )
    })
}

/// Parse a required `YYYY-MM-DD` date.
pub(crate) fn parse_date(value: Option<&str>, field: FieldName) -> Result<NaiveDate, Error> {
    let raw = value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| missing_field_error(field))?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        let name = field.as_str();
        field_value_error(
            field,
            ValidationCode::InvalidDate,
            raw,
            format!("{name} must be a date in YYYY-MM-DD format"),
        )
    })
}

/// Validate the rental request dates: both present, both parseable, end
/// strictly after start.
pub(crate) fn parse_rental_period(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<RentalPeriod, Error> {
    let start = parse_date(start, START_DATE)?;
    let end = parse_date(end, END_DATE)?;
    RentalPeriod::new(start, end).map_err(|err| {
        field_error(END_DATE, ValidationCode::EndBeforeStart, err.to_string())
    })
}

/// Map credential shape failures onto field-level `invalid_request` errors.
pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let message = err.to_string();
    match err {
        CredentialsValidationError::Username(UserValidationError::EmptyUsername) => {
            field_error(USERNAME, ValidationCode::EmptyUsername, message)
        }
        CredentialsValidationError::Username(UserValidationError::UsernameTooLong { .. }) => {
            field_error(USERNAME, ValidationCode::UsernameTooLong, message)
        }
        CredentialsValidationError::EmptyPassword => {
            field_error(PASSWORD, ValidationCode::EmptyPassword, message)
        }
    }
}

/// Map username failures from a profile update.
pub(crate) fn map_username_error(err: UserValidationError) -> Error {
    map_credentials_error(CredentialsValidationError::Username(err))
}
