//! Collaborators of the batch pipeline
//!
//! The orchestrator only talks to these traits; HTTP implementations live in
//! the `http` submodule and tests substitute mocks.

pub mod errors;
pub mod http;

use crate::core::batch::{BatchContext, BatchEntry, Failure, Method, ProcessResult, Row};
use async_trait::async_trait;

pub use errors::{LoadError, OptimizerError, RemoteError, StoreError, suggest_retry};
pub use http::{HttpContentApiClient, HttpOptimizerClient, HttpResultRecorder, HttpWarehouseClient};

/// Source of row windows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarehouseClient: Send + Sync {
    /// Load exactly `batch_size` rows starting at `start_index`
    async fn load_items(
        &self,
        source: &str,
        start_index: u64,
        batch_size: u64,
    ) -> Result<Vec<Row>, LoadError>;
}

/// Remote item-management API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentApiClient: Send + Sync {
    /// Submit every entry in one call, returning succeeded ids and failures
    async fn process_items(
        &self,
        entries: &[BatchEntry],
        context: &BatchContext,
        method: Method,
    ) -> Result<(Vec<String>, Vec<Failure>), RemoteError>;
}

/// Best-effort item optimizer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OptimizerClient: Send + Sync {
    async fn optimize(
        &self,
        entries: &[BatchEntry],
        context: &BatchContext,
    ) -> Result<Vec<BatchEntry>, OptimizerError>;
}

/// Durable store for batch outcomes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultRecorder: Send + Sync {
    async fn insert_result(
        &self,
        operation: &str,
        result: &ProcessResult,
        timestamp: &str,
        batch_id: u64,
    ) -> Result<(), StoreError>;
}
