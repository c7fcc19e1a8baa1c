//! Rental API handlers.
//!
//! ```text
//! GET    /rentals/rent/{carId}
//! POST   /rentals/rent/{carId} {"startDate":"2024-01-01","endDate":"2024-01-03"}
//! GET    /rentals
//! DELETE /rentals/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Car, Error, Rental, RentalWithCar};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_car_id, parse_rental_id, parse_rental_period};

/// Booking request body for `POST /rentals/rent/{carId}`.
///
/// Dates are `YYYY-MM-DD`; the end date must fall after the start date.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    #[schema(example = "2024-01-01")]
    pub start_date: Option<String>,
    #[schema(example = "2024-01-03")]
    pub end_date: Option<String>,
}

/// Car shown on the rent form.
#[utoipa::path(
    get,
    path = "/rentals/rent/{carId}",
    params(("carId" = String, Path, description = "Car identifier")),
    responses(
        (status = 200, description = "Bookable car", body = Car),
        (status = 400, description = "Invalid id or car unavailable", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["rentals"],
    operation_id = "viewRentForm"
)]
#[get("/rent/{car_id}")]
pub async fn rent_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Car>> {
    session.require_identity()?;
    let car_id = parse_car_id(&path)?;
    let car = state.rentals.rent_form(&car_id).await?;
    Ok(web::Json(car))
}

/// Book a car for the session user.
#[utoipa::path(
    post,
    path = "/rentals/rent/{carId}",
    params(("carId" = String, Path, description = "Car identifier")),
    request_body = CreateRentalRequest,
    responses(
        (status = 201, description = "Rental created", body = Rental),
        (status = 400, description = "Invalid dates, car unavailable, or own car", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["rentals"],
    operation_id = "createRental"
)]
#[post("/rent/{car_id}")]
pub async fn create_rental(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateRentalRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let car_id = parse_car_id(&path)?;
    let CreateRentalRequest {
        start_date,
        end_date,
    } = payload.into_inner();
    let period = parse_rental_period(start_date.as_deref(), end_date.as_deref())?;
    let rental = state
        .rentals
        .create_rental(&identity, &car_id, period)
        .await?;
    Ok(HttpResponse::Created().json(rental))
}

/// Rentals held by the session user, each with its car.
#[utoipa::path(
    get,
    path = "/rentals",
    responses(
        (status = 200, description = "Rentals ordered by start date", body = [RentalWithCar]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["rentals"],
    operation_id = "listRentals"
)]
#[get("")]
pub async fn list_rentals(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<RentalWithCar>>> {
    let identity = session.require_identity()?;
    let rentals = state.rentals.list_rentals(&identity).await?;
    Ok(web::Json(rentals))
}

/// Cancel one of the session user's rentals and release the car.
#[utoipa::path(
    delete,
    path = "/rentals/{id}",
    params(("id" = String, Path, description = "Rental identifier")),
    responses(
        (status = 204, description = "Rental cancelled"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the renter", body = Error),
        (status = 404, description = "Rental not found", body = Error)
    ),
    tags = ["rentals"],
    operation_id = "cancelRental"
)]
#[delete("/{id}")]
pub async fn cancel_rental(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let rental_id = parse_rental_id(&path)?;
    state.rentals.cancel_rental(&identity, &rental_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the rental handlers on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(rent_form)
        .service(create_rental)
        .service(list_rentals)
        .service(cancel_rental);
}

#[cfg(test)]
#[path = "rentals_tests.rs"]
mod tests;
