//! Error types reported by the batch collaborators

use thiserror::Error;

/// Status codes for which the remote API suggests retrying the whole batch
const RETRYABLE_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

/// Whether a remote API status suggests the batch should be retried later
pub fn suggest_retry(status: u16) -> bool {
    RETRYABLE_STATUS_CODES.contains(&status)
}

/// Failure to load a row window from the warehouse
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Warehouse request failed: {0}")]
    Request(String),

    #[error("Warehouse returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid warehouse response: {0}")]
    Parsing(String),
}

/// Failure reported by the remote item-management API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Network-level timeout, distinct from an API error
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// The API answered with an error status
    #[error("<HttpError {status} \"{reason}\">")]
    Api {
        status: u16,
        reason: String,
        retryable: bool,
    },
}

impl RemoteError {
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Build an API error, deriving retryability from the status
    pub fn api<S: Into<String>>(status: u16, reason: S) -> Self {
        Self::Api {
            status,
            reason: reason.into(),
            retryable: suggest_retry(status),
        }
    }

    /// Whether a later attempt of the whole batch may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Api { retryable, .. } => *retryable,
        }
    }

    /// HTTP status surfaced to the caller
    pub fn status(&self) -> u16 {
        match self {
            Self::Timeout(_) => 408,
            Self::Api { status, .. } => *status,
        }
    }

    /// Reason text surfaced to the caller and recorded per item
    pub fn reason(&self) -> &str {
        match self {
            Self::Timeout(_) => "Request timeout",
            Self::Api { reason, .. } => reason,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::timeout(err.to_string());
        }
        if err.is_decode() {
            return Self::api(502, format!("Invalid response from remote API: {}", err));
        }
        match err.status() {
            Some(status) => Self::api(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error"),
            ),
            // Connection-level failures are treated as a transient upstream outage
            None => Self::Api {
                status: 503,
                reason: format!("Service unavailable: {}", err),
                retryable: true,
            },
        }
    }
}

/// Failure of the best-effort optimization pass
#[derive(Error, Debug)]
pub enum OptimizerError {
    #[error("Optimizer request failed: {0}")]
    Request(String),

    #[error("Optimizer returned status {0}")]
    Status(u16),

    #[error("Optimizer response invalid: {0}")]
    Parsing(String),
}

/// Failure to persist a batch result
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Result store request failed: {0}")]
    Request(String),

    #[error("Result store returned status {status}: {message}")]
    Status { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_retry_statuses() {
        for status in [429, 500, 502, 503, 504] {
            assert!(suggest_retry(status), "{} should be retryable", status);
        }
        for status in [400, 401, 402, 403, 404, 409, 501] {
            assert!(!suggest_retry(status), "{} should not be retryable", status);
        }
    }

    #[test]
    fn test_api_error_derives_retryability() {
        let err = RemoteError::api(500, "Server got itself in trouble");
        assert!(err.is_retryable());
        assert_eq!(err.status(), 500);
        assert_eq!(err.reason(), "Server got itself in trouble");

        let err = RemoteError::api(402, "Payment Required");
        assert!(!err.is_retryable());
        assert_eq!(err.status(), 402);
    }

    #[test]
    fn test_timeout_error() {
        let err = RemoteError::timeout("read timed out");
        assert!(err.is_retryable());
        assert_eq!(err.status(), 408);
        assert_eq!(err.reason(), "Request timeout");
    }

    #[test]
    fn test_api_error_display() {
        let err = RemoteError::api(400, "Bad Request");
        assert_eq!(err.to_string(), "<HttpError 400 \"Bad Request\">");
    }
}
