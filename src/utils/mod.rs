//! Utility modules for the uploader

pub mod error;
pub mod logging;
