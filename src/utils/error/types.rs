//! Core error types

use crate::core::clients::{LoadError, RemoteError, StoreError};
use thiserror::Error;

/// Result type alias for the uploader
pub type Result<T> = std::result::Result<T, UploaderError>;

/// Main error type for the uploader
#[derive(Error, Debug)]
pub enum UploaderError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Warehouse load errors
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Remote API errors surfacing outside the batch state machine
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Result persistence errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
