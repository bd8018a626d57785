//! Warehouse client

use super::{create_http_client, endpoint_url};
use crate::config::EndpointConfig;
use crate::core::batch::Row;
use crate::core::clients::{LoadError, WarehouseClient};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct QueryRequest<'a> {
    source: &'a str,
    start_index: u64,
    batch_size: u64,
}

/// Loads row windows through the warehouse query endpoint
#[derive(Debug, Clone)]
pub struct HttpWarehouseClient {
    client: Client,
    base_url: String,
}

impl HttpWarehouseClient {
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client(config)?,
            base_url: config.url.clone(),
        })
    }
}

#[async_trait]
impl WarehouseClient for HttpWarehouseClient {
    async fn load_items(
        &self,
        source: &str,
        start_index: u64,
        batch_size: u64,
    ) -> std::result::Result<Vec<Row>, LoadError> {
        debug!(
            "Loading {} rows from {} starting at {}",
            batch_size, source, start_index
        );

        let response = self
            .client
            .post(endpoint_url(&self.base_url, "query"))
            .json(&QueryRequest {
                source,
                start_index,
                batch_size,
            })
            .send()
            .await
            .map_err(|e| LoadError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LoadError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<Row>>()
            .await
            .map_err(|e| LoadError::Parsing(e.to_string()))
    }
}
