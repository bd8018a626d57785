//! Batch processor
//!
//! Turns a row window into a [`ProcessResult`] by running the optional
//! optimization pass and a single remote submission. Remote errors are
//! returned untouched so the orchestrator can classify them.

use super::creator::create_batch;
use super::types::{BatchContext, BatchEntry, BatchPlan, Failure, ProcessResult, Row};
use crate::core::clients::{ContentApiClient, OptimizerClient, RemoteError};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reason recorded for submitted items the remote API did not report on
pub const NO_RESPONSE_REASON: &str = "No response for item";

/// Batch processor for one row window
#[derive(Clone)]
pub struct BatchProcessor {
    content_api: Arc<dyn ContentApiClient>,
    /// `None` when optimization is switched off
    optimizer: Option<Arc<dyn OptimizerClient>>,
}

impl BatchProcessor {
    /// Create a new batch processor
    pub fn new(
        content_api: Arc<dyn ContentApiClient>,
        optimizer: Option<Arc<dyn OptimizerClient>>,
    ) -> Self {
        Self {
            content_api,
            optimizer,
        }
    }

    /// Process a batch
    pub async fn process(
        &self,
        rows: &[Row],
        plan: BatchPlan,
        context: &BatchContext,
    ) -> Result<ProcessResult, RemoteError> {
        let method = plan.operation.method();
        let created = create_batch(context.batch_number, rows, method);

        if created.entries.is_empty() {
            info!(
                "Batch #{}: nothing to submit, {} items skipped",
                context.batch_number,
                created.skipped_item_ids.len()
            );
            return Ok(ProcessResult::new(
                Vec::new(),
                Vec::new(),
                created.skipped_item_ids,
            ));
        }

        let entries = match (&self.optimizer, plan.optimize) {
            (Some(optimizer), true) => {
                self.optimize_entries(&**optimizer, created.entries, context)
                    .await
            }
            _ => created.entries,
        };

        let (successes, failures) = self
            .content_api
            .process_items(&entries, context, method)
            .await?;

        Ok(reconcile(
            &entries,
            successes,
            failures,
            created.skipped_item_ids,
        ))
    }

    /// Run the optimizer, falling back to the original entries on any failure
    async fn optimize_entries(
        &self,
        optimizer: &dyn OptimizerClient,
        entries: Vec<BatchEntry>,
        context: &BatchContext,
    ) -> Vec<BatchEntry> {
        match optimizer.optimize(&entries, context).await {
            Ok(optimized) if same_items(&entries, &optimized) => {
                debug!(
                    "Batch #{}: {} entries optimized",
                    context.batch_number,
                    optimized.len()
                );
                optimized
            }
            Ok(_) => {
                warn!(
                    "Batch #{}: optimizer changed the item set, sending original batch",
                    context.batch_number
                );
                entries
            }
            Err(e) => {
                warn!(
                    "Batch #{}: optimization failed, sending original batch: {}",
                    context.batch_number, e
                );
                entries
            }
        }
    }
}

fn same_items(original: &[BatchEntry], optimized: &[BatchEntry]) -> bool {
    original.len() == optimized.len()
        && original
            .iter()
            .zip(optimized)
            .all(|(a, b)| a.batch_id == b.batch_id && a.item_id == b.item_id)
}

/// Keep each submitted item in exactly one list
fn reconcile(
    entries: &[BatchEntry],
    successes: Vec<String>,
    failures: Vec<Failure>,
    skipped_item_ids: Vec<String>,
) -> ProcessResult {
    let submitted: HashSet<&str> = entries.iter().map(|e| e.item_id.as_str()).collect();
    let mut accounted: HashSet<String> = HashSet::with_capacity(entries.len());

    let successful_item_ids: Vec<String> = successes
        .into_iter()
        .filter(|id| submitted.contains(id.as_str()) && accounted.insert(id.clone()))
        .collect();

    let mut failures: Vec<Failure> = failures
        .into_iter()
        .filter(|f| {
            submitted.contains(f.item_id.as_str()) && accounted.insert(f.item_id.clone())
        })
        .collect();

    for entry in entries {
        if !accounted.contains(&entry.item_id) {
            failures.push(Failure::new(entry.item_id.clone(), NO_RESPONSE_REASON));
        }
    }

    ProcessResult::new(successful_item_ids, failures, skipped_item_ids)
}
