//! Registration, login and logout handlers.
//!
//! ```text
//! GET  /register    POST /register  email, username, password
//! GET  /login       POST /login     username, password
//! GET  /logout
//! ```
//!
//! Expected failures (bad input, duplicate accounts, wrong credentials) are
//! flashed and redirected back to the form. Store faults go to the error
//! boundary.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::{Error, LOGIN_FAILED_MESSAGE, LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::flash::FlashLevel;
use crate::inbound::http::redirect::found;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::Page;

/// Flash shown after a successful sign-up.
pub const WELCOME_MESSAGE: &str = "Welcome to Blog Journal!";
/// Flash shown after signing out.
pub const GOODBYE_MESSAGE: &str = "Goodbye!";

const REGISTER_PATH: &str = "/register";
const LOGIN_PATH: &str = "/login";
const HOME_PATH: &str = "/home";

/// Sign-up form body.
#[derive(Deserialize)]
pub struct RegisterForm {
    email: String,
    username: String,
    password: Zeroizing<String>,
}

/// Sign-in form body.
#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: Zeroizing<String>,
}

/// `GET /register`
pub async fn register_form(session: SessionContext) -> HttpResponse {
    Page::Register.respond(StatusCode::OK, &session.page_context())
}

/// `POST /register`: create the account, then sign the new user in.
///
/// The session identity is written only after the user exists, so a failed
/// registration never leaves a half-signed-in visitor.
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let registration =
        match Registration::try_from_parts(&form.email, &form.username, &form.password) {
            Ok(registration) => registration,
            Err(reason) => return bounce(&session, &reason.to_string(), REGISTER_PATH),
        };

    let user = match state.registration.register(&registration).await {
        Ok(user) => user,
        Err(error) if is_expected(&error) => {
            return bounce(&session, error.message(), REGISTER_PATH);
        }
        Err(error) => return Err(error),
    };

    session.persist_user(&user)?;
    session.flash(FlashLevel::Success, WELCOME_MESSAGE)?;
    Ok(found(HOME_PATH))
}

/// `GET /login`
pub async fn login_form(session: SessionContext) -> HttpResponse {
    Page::Login.respond(StatusCode::OK, &session.page_context())
}

/// `POST /login`: verify credentials and continue to the remembered page.
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let Ok(credentials) = LoginCredentials::try_from_parts(&form.username, &form.password) else {
        return bounce(&session, LOGIN_FAILED_MESSAGE, LOGIN_PATH);
    };

    let user = match state.login.authenticate(&credentials).await {
        Ok(user) => user,
        Err(error) if is_expected(&error) => {
            return bounce(&session, LOGIN_FAILED_MESSAGE, LOGIN_PATH);
        }
        Err(error) => return Err(error),
    };

    let target = session
        .take_return_to()
        .unwrap_or_else(|| HOME_PATH.to_owned());
    session.persist_user(&user)?;
    session.flash(
        FlashLevel::Success,
        format!("welcome back {}!", user.username()),
    )?;
    Ok(found(&target))
}

/// `GET /logout`: drop the identity whether or not one was present.
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    if let Some(user) = session.user() {
        info!(user_id = %user.id, "signed out");
    }
    session.forget_user();
    session.flash(FlashLevel::Success, GOODBYE_MESSAGE)?;
    Ok(found("/"))
}

/// Client-side failures are shown on the form; server faults are not.
fn is_expected(error: &Error) -> bool {
    !error.code().is_server_fault()
}

fn bounce(session: &SessionContext, message: &str, location: &str) -> ApiResult<HttpResponse> {
    session.flash(FlashLevel::Error, message)?;
    Ok(found(location))
}

#[cfg(test)]
mod tests;
