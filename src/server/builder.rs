//! Configuration loading and the run_server entry point

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use std::path::Path;
use tracing::info;

/// Config file picked up when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "config/uploader.yaml";

/// Load the configuration and apply environment overrides
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`] is used
/// when present and the built-in defaults otherwise.
pub async fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path).await?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            Config::from_file(DEFAULT_CONFIG_PATH).await?
        }
        None => {
            info!(
                "No configuration file at {}, using defaults and environment",
                DEFAULT_CONFIG_PATH
            );
            Config::default()
        }
    };

    config.with_env_overrides(|key| std::env::var(key).ok())
}

/// Validate the configuration and serve until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting item uploader");
    config.validate()?;

    let server = HttpServer::new(&config)?;
    info!("Server starting at: http://{}", config.server().address());
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /insert_items - Upsert a batch of items");
    info!("   POST /delete_items - Delete a batch of items");
    info!("   POST /prevent_expiring_items - Refresh a batch of items");

    server.start().await
}
