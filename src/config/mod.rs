//! Configuration management for the uploader
//!
//! This module handles loading, environment overrides and validation of the
//! uploader configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, UploaderError};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the uploader
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Uploader configuration
    pub uploader: UploaderConfig,
}

impl Config {
    /// Load configuration from file
    ///
    /// Environment overrides are not applied here; see [`Config::with_env_overrides`].
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| UploaderError::Config(format!("Failed to read config file: {}", e)))?;

        let uploader: UploaderConfig = serde_yaml::from_str(&content)
            .map_err(|e| UploaderError::Config(format!("Failed to parse config: {}", e)))?;

        debug!("Configuration file parsed");
        Ok(Self { uploader })
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides using the given variable lookup
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = &mut self.uploader;

        if let Some(host) = lookup("UPLOADER_HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("UPLOADER_PORT") {
            config.server.port = parse_var("UPLOADER_PORT", &port)?;
        }
        if let Some(attempts) = lookup("UPLOADER_MAX_RETRY_ATTEMPTS") {
            config.batch.max_retry_attempts = parse_var("UPLOADER_MAX_RETRY_ATTEMPTS", &attempts)?;
        }
        if let Some(url) = lookup("WAREHOUSE_URL") {
            config.warehouse.url = url;
        }
        if let Some(url) = lookup("CONTENT_API_URL") {
            config.content_api.url = url;
        }
        if let Some(url) = lookup("OPTIMIZER_URL") {
            config.optimizer.endpoint.url = url;
        }
        if let Some(url) = lookup("RESULT_STORE_URL") {
            config.result_store.url = url;
        }
        if let Some(enabled) = lookup("OPTIMIZER_ENABLED") {
            config.optimizer.enabled = parse_flag("OPTIMIZER_ENABLED", &enabled)?;
        }

        Ok(self)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.uploader.server
    }

    /// Get batch configuration
    pub fn batch(&self) -> &BatchConfig {
        &self.uploader.batch
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        let config = &self.uploader;
        let sections: [(&str, &dyn Validate); 6] = [
            ("Server", &config.server),
            ("Batch", &config.batch),
            ("Warehouse", &config.warehouse),
            ("Content API", &config.content_api),
            ("Optimizer", &config.optimizer),
            ("Result store", &config.result_store),
        ];

        for (name, section) in sections {
            section
                .validate()
                .map_err(|e| UploaderError::Config(format!("{} config error: {}", name, e)))?;
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.uploader).map_err(|e| {
            UploaderError::Config(format!("Failed to serialize config to YAML: {}", e))
        })
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| UploaderError::Config(format!("Invalid value for {}: {}", key, e)))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(UploaderError::Config(format!(
            "Invalid value for {}: {}",
            key, other
        ))),
    }
}
