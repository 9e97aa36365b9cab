//! HTTP inbound adapter serving the server-rendered pages.

pub mod accounts;
pub mod auth_guard;
pub mod error;
pub mod error_pages;
pub mod flash;
pub mod method_override;
pub mod pages;
pub mod posts;
mod redirect;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::ApiResult;
