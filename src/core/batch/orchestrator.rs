//! Per-request batch controller
//!
//! Loads the row window for an upload task, runs the [`BatchProcessor`],
//! persists the outcome and decides what the task scheduler sees. Retrying
//! is left to the scheduler: a retry is requested purely through the
//! returned status.

use super::processor::BatchProcessor;
use super::types::{BatchContext, Intent, ProcessResult, UploadTask};
use crate::core::clients::{RemoteError, ResultRecorder, WarehouseClient};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Final state of one upload request
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// `batch_size` was zero, nothing was touched
    Skipped,
    /// The warehouse window was empty
    NoItems,
    /// Remote processing finished and the result was recorded
    Completed(ProcessResult),
    /// Retry-eligible failure with attempts left; nothing recorded
    RetryRequested(RemoteError),
    /// Definitive rejection by the remote API; nothing recorded
    Rejected(RemoteError),
    /// Retry budget spent; every item recorded as failed
    Exhausted {
        error: RemoteError,
        result: ProcessResult,
    },
}

impl BatchOutcome {
    /// HTTP status returned to the scheduler
    pub fn status(&self) -> u16 {
        match self {
            Self::RetryRequested(err) | Self::Rejected(err) => err.status(),
            _ => 200,
        }
    }

    /// Plain-text response body
    pub fn body(&self) -> &str {
        match self {
            Self::NoItems => "No items to process",
            Self::RetryRequested(err) | Self::Rejected(err) => err.reason(),
            _ => "OK",
        }
    }
}

/// Log line written when a batch is given up on
pub fn terminal_failure_message(context: &BatchContext, error: &RemoteError) -> String {
    format!(
        "Batch #{} with operation {} and initiation timestamp {} failed and will not be retried. Error: {}",
        context.batch_number, context.operation, context.timestamp, error
    )
}

/// Batch orchestrator
#[derive(Clone)]
pub struct BatchOrchestrator {
    warehouse: Arc<dyn WarehouseClient>,
    processor: BatchProcessor,
    recorder: Arc<dyn ResultRecorder>,
    max_retry_attempts: u32,
}

impl BatchOrchestrator {
    pub fn new(
        warehouse: Arc<dyn WarehouseClient>,
        processor: BatchProcessor,
        recorder: Arc<dyn ResultRecorder>,
        max_retry_attempts: u32,
    ) -> Self {
        Self {
            warehouse,
            processor,
            recorder,
            max_retry_attempts,
        }
    }

    /// Run one upload task
    ///
    /// `attempt` is the scheduler's execution count, zero on the first try.
    /// Warehouse and result-store failures are returned as errors.
    pub async fn run(
        &self,
        intent: Intent,
        task: &UploadTask,
        attempt: u32,
    ) -> Result<BatchOutcome> {
        let Some(batch_number) = task.batch_number() else {
            info!("{} request with batch size 0, nothing to do", intent.as_str());
            return Ok(BatchOutcome::Skipped);
        };

        let plan = intent.plan();
        let context = BatchContext {
            batch_number,
            operation: plan.operation,
            timestamp: task.timestamp.clone(),
        };

        info!(
            "{} started. Batch #{} info: start_index: {}, batch_size: {}, initiation timestamp: {}, attempt: {}",
            intent.as_str(),
            batch_number,
            task.start_index,
            task.batch_size,
            task.timestamp,
            attempt
        );

        let rows = self
            .warehouse
            .load_items(plan.source, task.start_index, task.batch_size)
            .await
            .inspect_err(|e| {
                error!(
                    "Batch #{}: failed to load items from {}: {}",
                    batch_number, plan.source, e
                )
            })?;

        if rows.is_empty() {
            error!(
                "Batch #{}, operation {}: 0 items loaded from the warehouse so batch not sent. Initiation timestamp: {}",
                batch_number, plan.operation, task.timestamp
            );
            return Ok(BatchOutcome::NoItems);
        }

        match self.processor.process(&rows, plan, &context).await {
            Ok(result) => {
                info!(
                    "Batch #{} with operation {} and initiation timestamp {} successfully processed {} items, failed to process {} items and skipped {} items",
                    batch_number,
                    plan.operation,
                    task.timestamp,
                    result.successful_item_ids.len(),
                    result.failures.len(),
                    result.skipped_item_ids.len()
                );
                self.record(&context, &result).await?;
                Ok(BatchOutcome::Completed(result))
            }
            Err(err) if !err.is_retryable() => {
                warn!(
                    "Batch #{} with operation {} and initiation timestamp {} was rejected. HTTP status: {}. Error: {}",
                    batch_number,
                    plan.operation,
                    task.timestamp,
                    err.status(),
                    err
                );
                Ok(BatchOutcome::Rejected(err))
            }
            Err(err) if attempt < self.max_retry_attempts => {
                warn!(
                    "Batch #{} with operation {} and initiation timestamp {} failed (HTTP status: {}) and will be requeued for retry. Error: {}",
                    batch_number,
                    plan.operation,
                    task.timestamp,
                    err.status(),
                    err
                );
                Ok(BatchOutcome::RetryRequested(err))
            }
            Err(err) => {
                error!("{}", terminal_failure_message(&context, &err));
                let result = ProcessResult::all_failed(&rows, err.reason());
                self.record(&context, &result).await?;
                Ok(BatchOutcome::Exhausted { error: err, result })
            }
        }
    }

    async fn record(&self, context: &BatchContext, result: &ProcessResult) -> Result<()> {
        self.recorder
            .insert_result(
                context.operation.as_str(),
                result,
                &context.timestamp,
                context.batch_number,
            )
            .await
            .inspect_err(|e| {
                error!(
                    "Batch #{}: failed to record result: {}",
                    context.batch_number, e
                )
            })?;
        Ok(())
    }
}
