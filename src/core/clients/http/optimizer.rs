//! Optimizer client

use super::{create_http_client, endpoint_url};
use crate::config::EndpointConfig;
use crate::core::batch::{BatchContext, BatchEntry};
use crate::core::clients::{OptimizerClient, OptimizerError};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct OptimizeRequest<'a> {
    entries: &'a [BatchEntry],
}

#[derive(Deserialize)]
struct OptimizeResponse {
    entries: Vec<BatchEntry>,
}

/// Sends batches through the item optimizer service
#[derive(Debug, Clone)]
pub struct HttpOptimizerClient {
    client: Client,
    base_url: String,
}

impl HttpOptimizerClient {
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client(config)?,
            base_url: config.url.clone(),
        })
    }
}

#[async_trait]
impl OptimizerClient for HttpOptimizerClient {
    async fn optimize(
        &self,
        entries: &[BatchEntry],
        _context: &BatchContext,
    ) -> std::result::Result<Vec<BatchEntry>, OptimizerError> {
        let response = self
            .client
            .post(endpoint_url(&self.base_url, "batch/optimize"))
            .json(&OptimizeRequest { entries })
            .send()
            .await
            .map_err(|e| OptimizerError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OptimizerError::Status(response.status().as_u16()));
        }

        let body: OptimizeResponse = response
            .json()
            .await
            .map_err(|e| OptimizerError::Parsing(e.to_string()))?;

        // The optimizer may rewrite payloads but must not add or drop entries
        if body.entries.len() != entries.len() {
            return Err(OptimizerError::Parsing(format!(
                "expected {} entries, got {}",
                entries.len(),
                body.entries.len()
            )));
        }

        Ok(body.entries)
    }
}
