//! `reqwest` implementations of the batch collaborators

mod content_api;
mod optimizer;
mod result_store;
mod warehouse;

#[cfg(test)]
mod tests;

pub use content_api::HttpContentApiClient;
pub use optimizer::HttpOptimizerClient;
pub use result_store::HttpResultRecorder;
pub use warehouse::HttpWarehouseClient;

use crate::config::EndpointConfig;
use crate::utils::error::{Result, UploaderError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Build an HTTP client for one endpoint
pub(crate) fn create_http_client(config: &EndpointConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    for (key, value) in &config.headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            UploaderError::Config(format!("Invalid header name '{}': {}", key, e))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            UploaderError::Config(format!("Invalid header value for '{}': {}", key, e))
        })?;
        headers.insert(name, value);
    }

    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(concat!("item-uploader/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .build()
        .map_err(UploaderError::from)
}

/// Join a base URL and a path without doubling slashes
pub(crate) fn endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
