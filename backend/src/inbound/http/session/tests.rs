//! Tests for session identity, return paths and flash storage.

use super::*;
use crate::domain::{EmailAddress, Username};
use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test as actix_test, web};
use rstest::rstest;

fn alice() -> User {
    User::new(
        UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
        Username::new("alice").expect("valid username"),
        EmailAddress::new("alice@x.com").expect("valid email"),
    )
}

#[rstest]
#[case("/home", true)]
#[case("/posts/1?x=y", true)]
#[case("//evil.example", false)]
#[case("/\\evil.example", false)]
#[case("https://evil.example", false)]
#[case("", false)]
fn only_local_paths_are_accepted(#[case] path: &str, #[case] expected: bool) {
    assert_eq!(is_local_path(path), expected);
}

#[actix_web::test]
async fn round_trips_user_and_forgets_it() {
    let app = actix_test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/set",
                web::get().to(|session: SessionContext| async move {
                    session.persist_user(&alice())?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/get",
                web::get().to(|session: SessionContext| async move {
                    let name = session.user().map(|user| user.username).unwrap_or_default();
                    HttpResponse::Ok().body(name)
                }),
            )
            .route(
                "/forget",
                web::get().to(|session: SessionContext| async move {
                    session.forget_user();
                    HttpResponse::Ok()
                }),
            ),
    )
    .await;

    let set_res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
    let cookie = session_cookie(&set_res).expect("session cookie set");

    let get_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/get")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(actix_test::read_body(get_res).await, "alice");

    let forget_res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/forget")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let cleared = session_cookie(&forget_res).expect("session cookie rewritten");
    let after = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/get")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(actix_test::read_body(after).await, "");
}

#[actix_web::test]
async fn flashes_are_read_once() {
    let app = actix_test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/flash",
                web::get().to(|session: SessionContext| async move {
                    session.flash(FlashLevel::Success, "first")?;
                    session.flash(FlashLevel::Error, "second")?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/read",
                web::get().to(|session: SessionContext| async move {
                    let joined: Vec<String> = session
                        .take_flashes()
                        .into_iter()
                        .map(|flash| flash.message)
                        .collect();
                    HttpResponse::Ok().body(joined.join(","))
                }),
            ),
    )
    .await;

    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/flash").to_request()).await;
    let cookie = session_cookie(&res).expect("session cookie set");

    let first = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/read")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let after_read = session_cookie(&first).expect("session cookie rewritten");
    assert_eq!(actix_test::read_body(first).await, "first,second");

    let second = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/read")
            .cookie(after_read)
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(actix_test::read_body(second).await, "");
}

#[actix_web::test]
async fn tampered_identity_reads_as_signed_out() {
    let app = actix_test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/tamper",
                web::get().to(|session: Session| async move {
                    session
                        .insert(USER_KEY, "not-a-user")
                        .expect("insert raw string");
                    HttpResponse::Ok()
                }),
            )
            .route(
                "/get",
                web::get().to(|session: SessionContext| async move {
                    HttpResponse::Ok().body(session.user().is_some().to_string())
                }),
            ),
    )
    .await;

    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/tamper").to_request()).await;
    let cookie = session_cookie(&res).expect("session cookie set");
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/get")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(actix_test::read_body(res).await, "false");
}

#[actix_web::test]
async fn foreign_return_paths_are_ignored() {
    let app = actix_test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .route(
                "/set",
                web::get().to(|session: SessionContext| async move {
                    session.set_return_to("//evil.example")?;
                    session.set_return_to("https://evil.example")?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/take",
                web::get().to(|session: SessionContext| async move {
                    HttpResponse::Ok().body(session.take_return_to().unwrap_or_default())
                }),
            ),
    )
    .await;

    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
    let mut req = actix_test::TestRequest::get().uri("/take");
    if let Some(cookie) = session_cookie(&res) {
        req = req.cookie(cookie);
    }
    let res = actix_test::call_service(&app, req.to_request()).await;
    assert_eq!(actix_test::read_body(res).await, "");
}
