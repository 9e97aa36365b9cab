//! Redirect responses shared by the form handlers.

use actix_web::HttpResponse;
use actix_web::http::header::LOCATION;

/// `302 Found` pointing at `location`.
pub(crate) fn found(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}
