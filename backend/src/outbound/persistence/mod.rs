//! PostgreSQL persistence adapters built on Diesel.
//!
//! - [`DbPool`] / [`PoolConfig`]: bb8-backed async connection pool.
//! - [`DieselUserRepository`]: credential store.
//! - [`DieselPostRepository`]: author-scoped post store.
//! - [`run_pending_migrations`]: embedded schema migrations.

mod diesel_error_mapping;
mod diesel_post_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
