//! Error handling for the uploader
//!
//! This module defines the crate-wide error type and its HTTP mapping.

mod helpers;
mod response;
#[cfg(test)]
mod tests;
mod types;

pub use types::{Result, UploaderError};
