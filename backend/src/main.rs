//! Journal entry-point: loads configuration, prepares stores and serves.

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use journal::inbound::http::session_config::{BuildMode, session_settings_from_env};
use journal::server::{JournalSettings, ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = JournalSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let mode = BuildMode::current();
    let session = session_settings_from_env(&DefaultEnv::new(), mode)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let config = ServerConfig::resolve(&settings, session, mode).await?;
    create_server(config).await?.await
}
