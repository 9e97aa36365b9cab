//! Blog Journal: a server-rendered, ownership-scoped personal journal.
//!
//! - [`domain`]: types, ports and services.
//! - [`inbound`]: the Actix HTTP adapter.
//! - [`outbound`]: PostgreSQL, in-memory and bcrypt adapters.
//! - [`server`]: configuration and wiring.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::Trace;
