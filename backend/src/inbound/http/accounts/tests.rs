//! Handler tests for sign-up, sign-in and sign-out.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    MockLoginService, MockPostsCommand, MockPostsQuery, MockRegistrationService,
};
use crate::domain::{EmailAddress, User, UserId, Username};
use crate::inbound::http::routes::configure;
use crate::inbound::http::test_utils::{Visitor, body_text, location, test_session_middleware};

fn alice() -> User {
    User::new(
        UserId::random(),
        Username::new("alice").expect("valid username"),
        EmailAddress::new("alice@x.com").expect("valid email"),
    )
}

fn state(login: MockLoginService, registration: MockRegistrationService) -> HttpState {
    HttpState::new(
        Arc::new(login),
        Arc::new(registration),
        Arc::new(MockPostsCommand::new()),
        Arc::new(MockPostsQuery::new()),
    )
}

macro_rules! app {
    ($state:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .wrap(test_session_middleware())
                .configure(configure),
        )
        .await
    };
}

const ALICE_FORM: &[(&str, &str)] = &[
    ("email", "alice@x.com"),
    ("username", "alice"),
    ("password", "pw123"),
];

#[actix_web::test]
async fn registration_signs_the_new_user_in() {
    let mut registration = MockRegistrationService::new();
    registration
        .expect_register()
        .withf(|reg| reg.username().as_str() == "alice" && reg.password() == "pw123")
        .times(1)
        .return_once(|_| Ok(alice()));
    let app = app!(state(MockLoginService::new(), registration));
    let mut visitor = Visitor::default();

    let res = actix_test::call_service(
        &app,
        visitor
            .prepare(actix_test::TestRequest::post().uri("/register").set_form(ALICE_FORM))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/home"));
    visitor.remember(&res);

    let res = actix_test::call_service(
        &app,
        visitor
            .prepare(actix_test::TestRequest::get().uri("/about"))
            .to_request(),
    )
    .await;
    let body = body_text(res).await;
    assert!(body.contains(WELCOME_MESSAGE));
    assert!(body.contains("Signed in as alice"));
}

#[rstest]
#[case("", "alice", "pw123")]
#[case("alice@x.com", "", "pw123")]
#[case("alice@x.com", "alice", "")]
#[case("not-an-email", "alice", "pw123")]
#[actix_web::test]
async fn invalid_registration_never_reaches_the_service(
    #[case] email: &str,
    #[case] username: &str,
    #[case] password: &str,
) {
    let mut registration = MockRegistrationService::new();
    registration.expect_register().never();
    let app = app!(state(MockLoginService::new(), registration));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/register")
            .set_form([("email", email), ("username", username), ("password", password)])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res).as_deref(), Some("/register"));
}

#[actix_web::test]
async fn duplicate_registration_is_flashed_without_signing_in() {
    let mut registration = MockRegistrationService::new();
    registration.expect_register().return_once(|_| {
        Err(Error::conflict(
            "A user with the given username is already registered",
        ))
    });
    let app = app!(state(MockLoginService::new(), registration));
    let mut visitor = Visitor::default();

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/register")
            .set_form(ALICE_FORM)
            .to_request(),
    )
    .await;
    assert_eq!(location(&res).as_deref(), Some("/register"));
    visitor.remember(&res);

    let res = actix_test::call_service(
        &app,
        visitor
            .prepare(actix_test::TestRequest::get().uri("/register"))
            .to_request(),
    )
    .await;
    let body = body_text(res).await;
    assert!(body.contains("already registered"));
    assert!(!body.contains("Signed in as"));
}

#[actix_web::test]
async fn store_outage_during_registration_renders_the_error_page() {
    let mut registration = MockRegistrationService::new();
    registration
        .expect_register()
        .return_once(|_| Err(Error::service_unavailable("pool exhausted")));
    let app = app!(state(MockLoginService::new(), registration));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/register")
            .set_form(ALICE_FORM)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_text(res).await;
    assert!(!body.contains("pool exhausted"));
}

#[actix_web::test]
async fn wrong_password_flashes_a_generic_failure() {
    let mut login = MockLoginService::new();
    login
        .expect_authenticate()
        .return_once(|_| Err(Error::unauthorized(LOGIN_FAILED_MESSAGE)));
    let app = app!(state(login, MockRegistrationService::new()));
    let mut visitor = Visitor::default();

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "alice"), ("password", "wrong")])
            .to_request(),
    )
    .await;
    assert_eq!(location(&res).as_deref(), Some("/login"));
    visitor.remember(&res);

    let res = actix_test::call_service(
        &app,
        visitor
            .prepare(actix_test::TestRequest::get().uri("/home"))
            .to_request(),
    )
    .await;
    assert_eq!(location(&res).as_deref(), Some("/login"));
}

#[actix_web::test]
async fn login_returns_to_the_page_that_required_it() {
    let mut login = MockLoginService::new();
    login
        .expect_authenticate()
        .withf(|creds| creds.username() == "alice" && creds.password() == "pw123")
        .return_once(|_| Ok(alice()));
    let app = app!(state(login, MockRegistrationService::new()));
    let mut visitor = Visitor::default();

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/compose").to_request(),
    )
    .await;
    assert_eq!(location(&res).as_deref(), Some("/login"));
    visitor.remember(&res);

    let res = actix_test::call_service(
        &app,
        visitor
            .prepare(
                actix_test::TestRequest::post()
                    .uri("/login")
                    .set_form([("username", "alice"), ("password", "pw123")]),
            )
            .to_request(),
    )
    .await;
    assert_eq!(location(&res).as_deref(), Some("/compose"));
    visitor.remember(&res);

    let res = actix_test::call_service(
        &app,
        visitor
            .prepare(actix_test::TestRequest::get().uri("/compose"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("welcome back alice!"));
}

#[actix_web::test]
async fn login_without_a_remembered_page_goes_home() {
    let mut login = MockLoginService::new();
    login.expect_authenticate().return_once(|_| Ok(alice()));
    let app = app!(state(login, MockRegistrationService::new()));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "alice"), ("password", "pw123")])
            .to_request(),
    )
    .await;
    assert_eq!(location(&res).as_deref(), Some("/home"));
}

#[actix_web::test]
async fn logout_says_goodbye_even_without_a_session() {
    let app = app!(state(MockLoginService::new(), MockRegistrationService::new()));
    let mut visitor = Visitor::default();

    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/logout").to_request()).await;
    assert_eq!(location(&res).as_deref(), Some("/"));
    visitor.remember(&res);

    let res = actix_test::call_service(
        &app,
        visitor.prepare(actix_test::TestRequest::get().uri("/")).to_request(),
    )
    .await;
    assert!(body_text(res).await.contains(GOODBYE_MESSAGE));
}

#[actix_web::test]
async fn malformed_form_is_a_bad_request_page() {
    let app = app!(state(MockLoginService::new(), MockRegistrationService::new()));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "alice")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(res).await.contains("could not be read"));
}
