//! Tests for the booking service.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockCarRepository, MockRentalRepository};
use crate::domain::{ErrorCode, UserId, Username};

type Service = RentalBookingService<MockCarRepository, MockRentalRepository>;

fn make_service(cars: MockCarRepository, rentals: MockRentalRepository) -> Service {
    RentalBookingService::new(Arc::new(cars), Arc::new(rentals))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[fixture]
fn renter() -> SessionIdentity {
    SessionIdentity::new(UserId::random(), Username::new("renter").expect("username"))
}

#[fixture]
fn period() -> RentalPeriod {
    RentalPeriod::new(date(2024, 1, 1), date(2024, 1, 3)).expect("period")
}

fn car_for(owner: UserId, price: u32, available: bool) -> Car {
    Car::new(CarId::random(), owner, "Toyota", "Corolla", price, available)
}

fn cars_returning(car: Option<Car>) -> MockCarRepository {
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(car));
    cars
}

#[rstest]
#[tokio::test]
async fn create_rental_prices_period_and_books(renter: SessionIdentity, period: RentalPeriod) {
    let car = car_for(UserId::random(), 50, true);
    let car_id = *car.id();
    let renter_id = *renter.user_id();
    let mut rentals = MockRentalRepository::new();
    rentals
        .expect_book()
        .withf(move |rental: &Rental| {
            rental.car_id() == &car_id
                && rental.renter_id() == &renter_id
                && rental.total_cost() == 100
        })
        .times(1)
        .return_once(|_| Ok(()));

    let rental = make_service(cars_returning(Some(car)), rentals)
        .create_rental(&renter, &car_id, period)
        .await
        .expect("booking succeeds");

    assert_eq!(rental.total_cost(), 100);
    assert_eq!(rental.start_date(), date(2024, 1, 1));
    assert_eq!(rental.end_date(), date(2024, 1, 3));
}

#[rstest]
#[case::missing(None)]
#[case::rented(Some(false))]
#[tokio::test]
async fn create_rental_rejects_unbookable_car(
    renter: SessionIdentity,
    period: RentalPeriod,
    #[case] availability: Option<bool>,
) {
    let car = availability.map(|available| car_for(UserId::random(), 50, available));
    let car_id = CarId::random();
    let mut rentals = MockRentalRepository::new();
    rentals.expect_book().times(0);

    let error = make_service(cars_returning(car), rentals)
        .create_rental(&renter, &car_id, period)
        .await
        .expect_err("car unavailable");

    assert_eq!(error.code(), ErrorCode::CarUnavailable);
    assert_eq!(error.message(), CAR_NOT_AVAILABLE);
}

#[rstest]
#[tokio::test]
async fn create_rental_rejects_own_car(renter: SessionIdentity, period: RentalPeriod) {
    let car = car_for(*renter.user_id(), 50, true);
    let car_id = *car.id();
    let mut rentals = MockRentalRepository::new();
    rentals.expect_book().times(0);

    let error = make_service(cars_returning(Some(car)), rentals)
        .create_rental(&renter, &car_id, period)
        .await
        .expect_err("own car");

    assert_eq!(error.code(), ErrorCode::SelfRentalForbidden);
}

#[rstest]
#[tokio::test]
async fn create_rental_maps_lost_race_to_car_unavailable(
    renter: SessionIdentity,
    period: RentalPeriod,
) {
    let car = car_for(UserId::random(), 50, true);
    let car_id = *car.id();
    let mut rentals = MockRentalRepository::new();
    rentals
        .expect_book()
        .times(1)
        .return_once(move |_| Err(RentalRepositoryError::car_unavailable(car_id.to_string())));

    let error = make_service(cars_returning(Some(car)), rentals)
        .create_rental(&renter, &car_id, period)
        .await
        .expect_err("lost race");

    assert_eq!(error.code(), ErrorCode::CarUnavailable);
}

#[rstest]
#[tokio::test]
async fn rent_form_returns_available_car(renter: SessionIdentity) {
    let car = car_for(*renter.user_id(), 30, true);
    let car_id = *car.id();

    let shown = make_service(cars_returning(Some(car.clone())), MockRentalRepository::new())
        .rent_form(&car_id)
        .await
        .expect("form data");

    assert_eq!(shown, car);
}

#[tokio::test]
async fn rent_form_surfaces_store_outage() {
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_id()
        .return_once(|_| Err(CarRepositoryError::connection("refused")));

    let error = make_service(cars, MockRentalRepository::new())
        .rent_form(&CarId::random())
        .await
        .expect_err("outage");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn list_rentals_queries_by_session_user(renter: SessionIdentity, period: RentalPeriod) {
    let renter_id = *renter.user_id();
    let car = car_for(UserId::random(), 20, false);
    let rental = Rental::book(renter_id, &car, period);
    let joined = vec![RentalWithCar { rental, car }];
    let expected = joined.clone();
    let mut rentals = MockRentalRepository::new();
    rentals
        .expect_list_for_renter()
        .withf(move |id: &UserId| id == &renter_id)
        .times(1)
        .return_once(move |_| Ok(joined));

    let listed = make_service(MockCarRepository::new(), rentals)
        .list_rentals(&renter)
        .await
        .expect("listing");

    assert_eq!(listed, expected);
}

#[rstest]
#[tokio::test]
async fn cancel_rental_releases_own_booking(renter: SessionIdentity, period: RentalPeriod) {
    let car = car_for(UserId::random(), 20, false);
    let rental = Rental::book(*renter.user_id(), &car, period);
    let rental_id = *rental.id();
    let mut rentals = MockRentalRepository::new();
    rentals
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(rental)));
    rentals
        .expect_cancel()
        .withf(move |r: &Rental| r.id() == &rental_id)
        .times(1)
        .return_once(|_| Ok(()));

    make_service(MockCarRepository::new(), rentals)
        .cancel_rental(&renter, &rental_id)
        .await
        .expect("cancel succeeds");
}

#[rstest]
#[tokio::test]
async fn cancel_rental_forbids_other_users(renter: SessionIdentity, period: RentalPeriod) {
    let car = car_for(UserId::random(), 20, false);
    let rental = Rental::book(UserId::random(), &car, period);
    let rental_id = *rental.id();
    let mut rentals = MockRentalRepository::new();
    rentals
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(rental)));
    rentals.expect_cancel().times(0);

    let error = make_service(MockCarRepository::new(), rentals)
        .cancel_rental(&renter, &rental_id)
        .await
        .expect_err("forbidden");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn cancel_rental_reports_missing_rental(renter: SessionIdentity) {
    let mut rentals = MockRentalRepository::new();
    rentals.expect_find_by_id().return_once(|_| Ok(None));

    let error = make_service(MockCarRepository::new(), rentals)
        .cancel_rental(&renter, &RentalId::random())
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), RENTAL_NOT_FOUND);
}
