//! Core functionality for the uploader
//!
//! This module contains the batch pipeline and the collaborators it talks to.

pub mod batch;
pub mod clients;
