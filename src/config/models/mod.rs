//! Configuration data models
//!
//! This module defines all configuration structures used by the uploader.

pub mod batch;
pub mod endpoint;
pub mod server;
pub mod uploader;

// Re-export all configuration types
pub use batch::*;
pub use endpoint::*;
pub use server::*;
pub use uploader::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

/// Default number of attempts after which a failing batch is given up on
pub fn default_max_retry_attempts() -> u32 {
    5
}

/// Header carrying the scheduler's execution count
pub fn default_execution_count_header() -> String {
    "X-AppEngine-TaskExecutionCount".to_string()
}

pub fn default_true() -> bool {
    true
}
