//! Tests for account HTTP handlers.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ErrorCode;
use crate::inbound::http::error::json_config;
use crate::inbound::http::test_utils::{memory_state, session_cookie, test_session_middleware};

async fn test_app() -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let (state, _store) = memory_state();
    actix_test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .service(web::scope("/auth").configure(configure)),
    )
    .await
}

async fn post_json<S>(app: &S, uri: &str, body: Value, cookie: Option<Cookie<'static>>) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = actix_test::TestRequest::post().uri(uri).set_json(body);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie);
    }
    actix_test::call_service(app, request.to_request()).await
}

async fn get<S>(app: &S, uri: &str, cookie: Option<Cookie<'static>>) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = actix_test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie);
    }
    actix_test::call_service(app, request.to_request()).await
}

fn sign_up_body(username: &str, password: &str, confirm: &str) -> Value {
    json!({
        "username": username,
        "password": password,
        "confirmPassword": confirm,
        "email": "someone@example.com",
    })
}

async fn signed_in<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = post_json(app, "/auth/sign-up", sign_up_body(username, "pw", "pw"), None).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let res = post_json(
        app,
        "/auth/sign-in",
        json!({"username": username, "password": "pw"}),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    session_cookie(&res)
}

async fn error_body(res: ServiceResponse) -> Error {
    actix_test::read_body_json(res).await
}

#[actix_web::test]
async fn sign_up_returns_profile_without_password() {
    let app = test_app().await;

    let res = post_json(&app, "/auth/sign-up", sign_up_body("alice", "pw", "pw"), None).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body.get("username").and_then(Value::as_str), Some("alice"));
    assert_eq!(
        body.get("email").and_then(Value::as_str),
        Some("someone@example.com")
    );
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[actix_web::test]
async fn second_sign_up_with_same_username_conflicts() {
    let app = test_app().await;
    let first = post_json(&app, "/auth/sign-up", sign_up_body("alice", "pw", "pw"), None).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(&app, "/auth/sign-up", sign_up_body("alice", "x", "y"), None).await;

    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(error_body(second).await.code(), ErrorCode::DuplicateUser);
}

#[actix_web::test]
async fn usernames_are_case_sensitive() {
    let app = test_app().await;
    let first = post_json(&app, "/auth/sign-up", sign_up_body("alice", "pw", "pw"), None).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(&app, "/auth/sign-up", sign_up_body("Alice", "pw", "pw"), None).await;

    assert_eq!(second.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn mismatched_confirmation_is_rejected() {
    let app = test_app().await;

    let res = post_json(&app, "/auth/sign-up", sign_up_body("bob", "pw", "pw2"), None).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_body(res).await.code(), ErrorCode::PasswordMismatch);
}

#[rstest]
#[case("   ", "pw", "username", "empty_username")]
#[case("bob", "", "password", "empty_password")]
#[actix_web::test]
async fn blank_sign_up_fields_are_invalid(
    #[case] username: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = test_app().await;

    let res = post_json(
        &app,
        "/auth/sign-up",
        sign_up_body(username, password, password),
        None,
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error = error_body(res).await;
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details present");
    assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
    assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
}

#[actix_web::test]
async fn sign_in_returns_identity_and_sets_cookie() {
    let app = test_app().await;
    post_json(&app, "/auth/sign-up", sign_up_body("alice", "pw", "pw"), None).await;

    let res = post_json(
        &app,
        "/auth/sign-in",
        json!({"username": "alice", "password": "pw"}),
        None,
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);
    assert!(cookie.http_only().unwrap_or(false));
    let identity: SessionIdentity = actix_test::read_body_json(res).await;
    assert_eq!(identity.username().as_ref(), "alice");
}

#[actix_web::test]
async fn unknown_user_and_wrong_password_look_the_same() {
    let app = test_app().await;
    post_json(&app, "/auth/sign-up", sign_up_body("alice", "pw", "pw"), None).await;

    let wrong_password = post_json(
        &app,
        "/auth/sign-in",
        json!({"username": "alice", "password": "nope"}),
        None,
    )
    .await;
    let unknown_user = post_json(
        &app,
        "/auth/sign-in",
        json!({"username": "mallory", "password": "pw"}),
        None,
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = error_body(wrong_password).await;
    let unknown_user = error_body(unknown_user).await;
    assert_eq!(wrong_password.code(), ErrorCode::AuthFailed);
    assert_eq!(wrong_password.message(), unknown_user.message());
}

#[actix_web::test]
async fn profile_requires_session() {
    let app = test_app().await;

    let res = get(&app, "/auth/profile", None).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_body(res).await.code(), ErrorCode::Unauthorized);
}

#[actix_web::test]
async fn profile_returns_session_user() {
    let app = test_app().await;
    let cookie = signed_in(&app, "alice").await;

    let res = get(&app, "/auth/profile", Some(cookie)).await;

    assert_eq!(res.status(), StatusCode::OK);
    let profile: ProfileResponse = actix_test::read_body_json(res).await;
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.phone, None);
}

#[actix_web::test]
async fn profile_update_refreshes_session_identity() {
    let app = test_app().await;
    let cookie = signed_in(&app, "alice").await;

    let res = post_json(
        &app,
        "/auth/profile",
        json!({"username": "alicia", "phone": "555-0100"}),
        Some(cookie),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let refreshed = session_cookie(&res);
    let updated: ProfileResponse = actix_test::read_body_json(res).await;
    assert_eq!(updated.username, "alicia");
    assert_eq!(updated.email, None);
    assert_eq!(updated.phone.as_deref(), Some("555-0100"));

    let res = get(&app, "/auth/profile", Some(refreshed)).await;
    let profile: ProfileResponse = actix_test::read_body_json(res).await;
    assert_eq!(profile, updated);

    let res = post_json(
        &app,
        "/auth/sign-in",
        json!({"username": "alicia", "password": "pw"}),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn profile_update_rejects_username_of_another_user() {
    let app = test_app().await;
    signed_in(&app, "bob").await;
    let cookie = signed_in(&app, "alice").await;

    let res = post_json(
        &app,
        "/auth/profile",
        json!({"username": "bob"}),
        Some(cookie),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn sign_out_clears_session() {
    let app = test_app().await;
    let cookie = signed_in(&app, "alice").await;

    let res = get(&app, "/auth/sign-out", Some(cookie)).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = session_cookie(&res);

    let res = get(&app, "/auth/profile", Some(cleared)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn sign_out_without_session_still_succeeds() {
    let app = test_app().await;

    let res = get(&app, "/auth/sign-out", None).await;

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}
