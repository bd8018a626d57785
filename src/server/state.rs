//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use crate::config::Config;
use crate::core::batch::{BatchOrchestrator, BatchProcessor};
use crate::core::clients::{
    HttpContentApiClient, HttpOptimizerClient, HttpResultRecorder, HttpWarehouseClient,
    OptimizerClient,
};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// HTTP server state shared across handlers
///
/// The orchestrator holds no per-request state, so one instance serves
/// every worker.
#[derive(Clone)]
pub struct AppState {
    /// Uploader configuration (shared read-only)
    pub config: Arc<Config>,
    /// Batch orchestrator
    pub orchestrator: Arc<BatchOrchestrator>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, orchestrator: BatchOrchestrator) -> Self {
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Wire the HTTP collaborators described by the configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let uploader = &config.uploader;

        let warehouse = Arc::new(HttpWarehouseClient::new(&uploader.warehouse)?);
        let content_api = Arc::new(HttpContentApiClient::new(&uploader.content_api)?);
        let recorder = Arc::new(HttpResultRecorder::new(&uploader.result_store)?);

        let optimizer: Option<Arc<dyn OptimizerClient>> = if uploader.optimizer.enabled {
            Some(Arc::new(HttpOptimizerClient::new(
                &uploader.optimizer.endpoint,
            )?))
        } else {
            info!("Batch optimization is disabled");
            None
        };

        let orchestrator = BatchOrchestrator::new(
            warehouse,
            BatchProcessor::new(content_api, optimizer),
            recorder,
            uploader.batch.max_retry_attempts,
        );

        Ok(Self::new(config, orchestrator))
    }

    /// Get uploader configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
