//! The route table.
//!
//! ```text
//! GET  /                     public    landing page
//! GET  /about                public    static information
//! GET  /register             public    sign-up form
//! POST /register             public    create account and sign in
//! GET  /login                public    sign-in form
//! POST /login                public    authenticate
//! GET  /logout               public    drop the session identity
//! GET  /home                 signed in list own posts
//! GET  /compose              signed in new post form
//! POST /compose              signed in create post
//! GET  /posts/{id}           signed in view own post
//! GET  /posts/{id}/edit      signed in edit form
//! PUT  /posts/{id}           signed in update own post
//! DELETE /posts/{id}         signed in delete own post
//! ```
//!
//! The table is plain data built once per worker. [`configure`] turns each
//! [`Endpoint`] into a resource and wraps signed-in ones in [`RequireLogin`].

use actix_web::http::Method;
use actix_web::{FromRequest, Handler, HttpResponse, Responder, Route, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth_guard::RequireLogin;
use crate::inbound::http::{accounts, pages, posts};

/// Who may reach an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone.
    Public,
    /// Only visitors with a session identity; others are sent to log in.
    SignedIn,
}

/// One path, its access rule, and the methods it answers.
pub struct Endpoint {
    /// Actix resource pattern.
    pub path: &'static str,
    /// Whether the login gate wraps the resource.
    pub access: Access,
    routes: Vec<(Method, Route)>,
}

impl Endpoint {
    fn new(path: &'static str, access: Access) -> Self {
        Self {
            path,
            access,
            routes: Vec::new(),
        }
    }

    fn on<F, Args>(mut self, method: Method, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        self.routes
            .push((method.clone(), web::method(method).to(handler)));
        self
    }

    /// Methods this endpoint answers, in registration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.routes.iter().map(|(method, _)| method)
    }
}

/// Every endpoint of the application.
#[must_use]
pub fn endpoints() -> Vec<Endpoint> {
    use Access::{Public, SignedIn};

    vec![
        Endpoint::new("/", Public).on(Method::GET, pages::start),
        Endpoint::new("/about", Public).on(Method::GET, pages::about),
        Endpoint::new("/register", Public)
            .on(Method::GET, accounts::register_form)
            .on(Method::POST, accounts::register),
        Endpoint::new("/login", Public)
            .on(Method::GET, accounts::login_form)
            .on(Method::POST, accounts::login),
        Endpoint::new("/logout", Public).on(Method::GET, accounts::logout),
        Endpoint::new("/home", SignedIn).on(Method::GET, posts::home),
        Endpoint::new("/compose", SignedIn)
            .on(Method::GET, posts::compose_form)
            .on(Method::POST, posts::compose),
        Endpoint::new("/posts/{post_id}", SignedIn)
            .on(Method::GET, posts::show)
            .on(Method::PUT, posts::update)
            .on(Method::DELETE, posts::delete),
        Endpoint::new("/posts/{post_id}/edit", SignedIn).on(Method::GET, posts::edit_form),
    ]
}

async fn method_not_allowed() -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed("That action is not available here"))
}

async fn not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("Page not found"))
}

fn form_error(
    err: actix_web::error::UrlencodedError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    Error::invalid_request(format!("The submitted form could not be read: {err}")).into()
}

/// Register every endpoint, the form error mapping and the 404 fallback.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_error));
    for endpoint in endpoints() {
        let mut resource = web::resource(endpoint.path);
        for (_, route) in endpoint.routes {
            resource = resource.route(route);
        }
        let resource = resource.default_service(web::to(method_not_allowed));
        match endpoint.access {
            Access::Public => cfg.service(resource),
            Access::SignedIn => cfg.service(resource.wrap(RequireLogin)),
        };
    }
    cfg.default_service(web::to(not_found));
}
