//! Batch execution pipeline
//!
//! This module turns a warehouse row window into remote API calls and a
//! recorded per-item outcome.

mod creator;
mod orchestrator;
mod processor;
mod types;


// Re-export all public types
pub use creator::{CreatedBatch, create_batch};
pub use orchestrator::{BatchOrchestrator, BatchOutcome, terminal_failure_message};
pub use processor::{BatchProcessor, NO_RESPONSE_REASON};
pub use types::{
    BatchContext, BatchEntry, BatchPlan, Failure, Intent, MISSING_ITEM_ID, Method, Operation,
    ProcessResult, Row, UploadTask, batch_number,
};
