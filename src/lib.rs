//! # item-uploader
//!
//! HTTP service that pushes batches of items from a warehouse table to a
//! remote item-management API.
//!
//! A task scheduler posts `{start_index, batch_size, timestamp}` to one of
//! the upload routes. The service loads that window of rows, optionally runs
//! upserts through an optimization service, submits the batch and records a
//! per-item result. Retrying is left to the scheduler: any non-2xx status
//! makes it re-deliver the task.
//!
//! ## Running the service
//!
//! ```rust,no_run
//! use item_uploader::server::builder::{load_config, run_server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config(None).await?;
//!     run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{Result, UploaderError};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
