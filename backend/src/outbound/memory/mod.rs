//! In-memory repositories.
//!
//! These honour the same uniqueness and ownership rules as the Diesel
//! adapters so the HTTP flows behave identically without a database.

mod post_repository;
mod user_repository;

pub use post_repository::InMemoryPostRepository;
pub use user_repository::InMemoryUserRepository;
