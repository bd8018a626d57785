//! Result store client

use super::{create_http_client, endpoint_url};
use crate::config::EndpointConfig;
use crate::core::batch::{Failure, ProcessResult};
use crate::core::clients::{ResultRecorder, StoreError};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

/// Record persisted for every finished batch
#[derive(Debug, Serialize)]
struct ResultRecord<'a> {
    operation: &'a str,
    timestamp: &'a str,
    batch_id: u64,
    successful_item_ids: &'a [String],
    failures: &'a [Failure],
    skipped_item_ids: &'a [String],
}

/// Persists batch outcomes through the result store endpoint
#[derive(Debug, Clone)]
pub struct HttpResultRecorder {
    client: Client,
    base_url: String,
}

impl HttpResultRecorder {
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client(config)?,
            base_url: config.url.clone(),
        })
    }
}

#[async_trait]
impl ResultRecorder for HttpResultRecorder {
    async fn insert_result(
        &self,
        operation: &str,
        result: &ProcessResult,
        timestamp: &str,
        batch_id: u64,
    ) -> std::result::Result<(), StoreError> {
        let record = ResultRecord {
            operation,
            timestamp,
            batch_id,
            successful_item_ids: &result.successful_item_ids,
            failures: &result.failures,
            skipped_item_ids: &result.skipped_item_ids,
        };

        let response = self
            .client
            .post(endpoint_url(&self.base_url, "results"))
            .json(&record)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Recorded result for batch #{} ({})", batch_id, operation);
        Ok(())
    }
}
