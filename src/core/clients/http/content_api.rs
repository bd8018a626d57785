//! Content API batch client

use super::{create_http_client, endpoint_url};
use crate::config::EndpointConfig;
use crate::core::batch::{BatchContext, BatchEntry, Failure, Method};
use crate::core::clients::{ContentApiClient, RemoteError};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Serialize)]
struct BatchRequestBody<'a> {
    entries: &'a [BatchEntry],
}

#[derive(Debug, Deserialize)]
struct BatchResponseBody {
    #[serde(default)]
    entries: Vec<BatchResponseEntry>,
}

#[derive(Debug, Deserialize)]
struct BatchResponseEntry {
    batch_id: u32,
    #[serde(default)]
    errors: Option<EntryErrors>,
}

#[derive(Debug, Deserialize)]
struct EntryErrors {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Submits batches to the remote item-management API
#[derive(Debug, Clone)]
pub struct HttpContentApiClient {
    client: Client,
    base_url: String,
}

impl HttpContentApiClient {
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client(config)?,
            base_url: config.url.clone(),
        })
    }
}

/// Split per-entry responses into succeeded ids and failures
fn partition_entries(
    entries: &[BatchEntry],
    responses: Vec<BatchResponseEntry>,
) -> (Vec<String>, Vec<Failure>) {
    let item_ids: HashMap<u32, &str> = entries
        .iter()
        .map(|entry| (entry.batch_id, entry.item_id.as_str()))
        .collect();

    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for response in responses {
        let Some(item_id) = item_ids.get(&response.batch_id) else {
            debug!("Ignoring response for unknown batch entry {}", response.batch_id);
            continue;
        };
        match response.errors {
            Some(errors) => failures.push(Failure::new(*item_id, errors.message)),
            None => successes.push(item_id.to_string()),
        }
    }

    (successes, failures)
}

#[async_trait]
impl ContentApiClient for HttpContentApiClient {
    async fn process_items(
        &self,
        entries: &[BatchEntry],
        context: &BatchContext,
        method: Method,
    ) -> std::result::Result<(Vec<String>, Vec<Failure>), RemoteError> {
        info!(
            "Sending batch #{} with {} entries ({:?}) to Content API",
            context.batch_number,
            entries.len(),
            method
        );

        let response = self
            .client
            .post(endpoint_url(&self.base_url, "products/batch"))
            .json(&BatchRequestBody { entries })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("Unknown error");
            let reason = response
                .json::<ApiErrorBody>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| fallback.to_string());
            return Err(RemoteError::api(status.as_u16(), reason));
        }

        let body: BatchResponseBody = response.json().await?;
        Ok(partition_entries(entries, body.entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(batch_id: u32, item_id: &str) -> BatchEntry {
        BatchEntry {
            batch_id,
            method: Method::Insert,
            item_id: item_id.to_string(),
            product: None,
        }
    }

    #[test]
    fn test_partition_entries_maps_batch_ids_to_items() {
        let entries = vec![entry(0, "0001"), entry(1, "0002"), entry(2, "0003")];
        let responses = vec![
            BatchResponseEntry {
                batch_id: 0,
                errors: None,
            },
            BatchResponseEntry {
                batch_id: 2,
                errors: Some(EntryErrors {
                    message: "Invalid price".to_string(),
                }),
            },
            BatchResponseEntry {
                batch_id: 1,
                errors: None,
            },
        ];

        let (successes, failures) = partition_entries(&entries, responses);

        assert_eq!(successes, vec!["0001", "0002"]);
        assert_eq!(failures, vec![Failure::new("0003", "Invalid price")]);
    }

    #[test]
    fn test_partition_entries_ignores_unknown_ids() {
        let entries = vec![entry(0, "0001")];
        let responses = vec![BatchResponseEntry {
            batch_id: 7,
            errors: None,
        }];

        let (successes, failures) = partition_entries(&entries, responses);
        assert!(successes.is_empty());
        assert!(failures.is_empty());
    }
}
