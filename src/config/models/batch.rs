//! Batch execution settings

use super::*;
use serde::{Deserialize, Serialize};

/// Batch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Attempt count at which a retry-eligible failure becomes terminal
    #[serde(default = "default_max_retry_attempts")]
    pub max_retry_attempts: u32,
    /// Request header the scheduler uses for its execution count
    #[serde(default = "default_execution_count_header")]
    pub execution_count_header: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_retry_attempts: default_max_retry_attempts(),
            execution_count_header: default_execution_count_header(),
        }
    }
}
