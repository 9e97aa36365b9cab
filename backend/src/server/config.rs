//! Process configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `JOURNAL_*` environment variables and an
//! optional config file, in that order of precedence.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Top-level settings for the journal server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOURNAL")]
pub struct JournalSettings {
    /// Interface to bind, `0.0.0.0` when unset.
    pub host: Option<IpAddr>,
    /// Port to bind.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// PostgreSQL connection string. Without one, debug builds keep data in memory.
    pub database_url: Option<String>,
    /// Redis connection string for the session store. Without one, debug
    /// builds keep sessions in the encrypted cookie.
    pub redis_url: Option<String>,
    /// bcrypt work factor for new password hashes.
    #[ortho_config(default = 12)]
    pub bcrypt_cost: u32,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

impl JournalSettings {
    /// Socket address to listen on.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port,
        )
    }
}
