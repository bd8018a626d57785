//! Configuration validation

use super::models::*;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            return Err("Max body size cannot be 0".to_string());
        }

        if self.workers == Some(0) {
            return Err("Worker count cannot be 0".to_string());
        }

        Ok(())
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.execution_count_header.is_empty() {
            return Err("Execution count header cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for EndpointConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("URL is required".to_string());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(format!("URL must start with http:// or https://: {}", self.url));
        }

        if self.timeout == 0 {
            return Err("Timeout cannot be 0".to_string());
        }

        Ok(())
    }
}

impl Validate for OptimizerConfig {
    fn validate(&self) -> Result<(), String> {
        // The endpoint is only used when the optimizer is switched on
        if self.enabled {
            self.endpoint.validate()?;
        }

        Ok(())
    }
}
