//! Collaborator endpoint configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Connection settings for one remote collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL
    #[serde(default)]
    pub url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Extra headers sent with every request (e.g. authorization)
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl EndpointConfig {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            timeout: default_timeout(),
            headers: HashMap::new(),
        }
    }
}

/// Optimization service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Whether upsert batches go through the optimizer
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(flatten)]
    pub endpoint: EndpointConfig,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: EndpointConfig::default(),
        }
    }
}
