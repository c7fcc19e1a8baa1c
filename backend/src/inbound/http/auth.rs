//! Account API handlers.
//!
//! ```text
//! POST /auth/sign-up {"username":"alice","password":"pw","confirmPassword":"pw"}
//! POST /auth/sign-in {"username":"alice","password":"pw"}
//! GET  /auth/sign-out
//! GET  /auth/profile
//! POST /auth/profile {"username":"alice","email":"a@example.com"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ContactDetails, Error, LoginCredentials, ProfileUpdate, Registration, SessionIdentity, User,
    Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_credentials_error, map_username_error};

/// Sign-up request body for `POST /auth/sign-up`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl TryFrom<SignUpRequest> for Registration {
    type Error = Error;

    fn try_from(value: SignUpRequest) -> Result<Self, Self::Error> {
        let contact = ContactDetails::new(value.email, value.phone);
        Self::try_from_parts(
            &value.username,
            &value.password,
            &value.confirm_password,
            contact,
        )
        .map_err(map_credentials_error)
    }
}

/// Sign-in request body for `POST /auth/sign-in`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<SignInRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: SignInRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password).map_err(map_credentials_error)
    }
}

/// Editable profile fields for `POST /auth/profile`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRequest {
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl TryFrom<ProfileRequest> for ProfileUpdate {
    type Error = Error;

    fn try_from(value: ProfileRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: Username::new(&value.username).map_err(map_username_error)?,
            contact: ContactDetails::new(value.email, value.phone),
        })
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "alice")]
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        let contact = user.contact();
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = ProfileResponse),
        (status = 400, description = "Invalid request or password mismatch", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<SignUpRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    let user = state.auth.register(registration).await?;
    Ok(HttpResponse::Created().json(ProfileResponse::from(&user)))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Login success", body = SessionIdentity,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login failed", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignInRequest>,
) -> ApiResult<web::Json<SessionIdentity>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let identity = state.auth.login(&credentials).await?;
    session.persist_identity(&identity)?;
    Ok(web::Json(identity))
}

/// Destroy the session. Succeeds whether or not a session exists.
#[utoipa::path(
    get,
    path = "/auth/sign-out",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "signOut",
    security([])
)]
#[get("/sign-out")]
pub async fn sign_out(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Fetch the signed-in user's profile.
#[utoipa::path(
    get,
    path = "/auth/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["auth"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let identity = session.require_identity()?;
    let user = state.profile.fetch_profile(&identity).await?;
    Ok(web::Json(ProfileResponse::from(&user)))
}

/// Overwrite the signed-in user's username and contact details.
///
/// The session identity is refreshed so later requests see the new username.
#[utoipa::path(
    post,
    path = "/auth/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 409, description = "Username already taken", body = Error)
    ),
    tags = ["auth"],
    operation_id = "updateProfile"
)]
#[post("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let identity = session.require_identity()?;
    let update = ProfileUpdate::try_from(payload.into_inner())?;
    let user = state.profile.update_profile(&identity, update).await?;
    session.persist_identity(&SessionIdentity::from(&user))?;
    Ok(web::Json(ProfileResponse::from(&user)))
}

/// Register the account handlers on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(sign_up)
        .service(sign_in)
        .service(sign_out)
        .service(get_profile)
        .service(update_profile);
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
