//! Public static pages.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::inbound::http::session::SessionContext;
use crate::inbound::http::views::Page;

/// `GET /`
pub async fn start(session: SessionContext) -> HttpResponse {
    Page::Start.respond(StatusCode::OK, &session.page_context())
}

/// `GET /about`
pub async fn about(session: SessionContext) -> HttpResponse {
    Page::About.respond(StatusCode::OK, &session.page_context())
}
