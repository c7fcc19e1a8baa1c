//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler, the request and response
//! schemas, and the session cookie security scheme. Swagger UI serves it in
//! debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Car, Error, ErrorCode, Rental, RentalWithCar, SessionIdentity};
use crate::inbound::http::auth::{ProfileRequest, ProfileResponse, SignInRequest, SignUpRequest};
use crate::inbound::http::rentals::CreateRentalRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /auth/sign-in.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Car rental API",
        description = "Accounts, car bookings, and health probes. Authenticated routes use the session cookie."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::sign_up,
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::auth::get_profile,
        crate::inbound::http::auth::update_profile,
        crate::inbound::http::rentals::rent_form,
        crate::inbound::http::rentals::create_rental,
        crate::inbound::http::rentals::list_rentals,
        crate::inbound::http::rentals::cancel_rental,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Car,
        Rental,
        RentalWithCar,
        SessionIdentity,
        SignUpRequest,
        SignInRequest,
        ProfileRequest,
        ProfileResponse,
        CreateRentalRequest,
    )),
    tags(
        (name = "auth", description = "Registration, sessions, and profiles"),
        (name = "rentals", description = "Booking and cancelling cars"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
