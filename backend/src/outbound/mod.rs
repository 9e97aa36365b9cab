//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local repositories for tests and database-less dev runs
//! - **security**: bcrypt password hashing
//!
//! Adapters translate between domain types and infrastructure types and
//! contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
