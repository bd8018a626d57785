//! Top-level uploader configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Uploader configuration as laid out in the YAML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploaderConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    /// Row source
    #[serde(default)]
    pub warehouse: EndpointConfig,
    /// Remote item-management API
    #[serde(default)]
    pub content_api: EndpointConfig,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    /// Per-batch result persistence
    #[serde(default)]
    pub result_store: EndpointConfig,
}
