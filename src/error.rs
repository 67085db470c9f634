//! Provider error taxonomy
//!
//! Configuration errors are reported before any remote call is made; API
//! errors carry the HTTP status so callers can distinguish not-found and
//! conflict conditions; operation failures carry the backend message.

use thiserror::Error;

/// Error message substring returned by the backend when a version delete is
/// rejected because it is the last version under its module.
pub const FINAL_VERSION_MESSAGE: &str = "Cannot delete the final version of a service (module)";

#[derive(Error, Debug)]
pub enum ProviderError {
    /// Invalid declarative configuration (wrong scaling block count,
    /// unknown runtime, missing handler attributes, bad endpoint URL)
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pending latency string outside the accepted "<1-15>s" pattern
    #[error("invalid pending latency {value:?}: expected \"Automatic\" or \"<1-15>s\"")]
    InvalidLatency { value: String },

    /// Non-success response from a GCP API
    #[error("API request failed: {status} - {message}")]
    Api { status: u16, message: String },

    /// Request never produced a response
    #[error("failed to send request: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the JSON we expected
    #[error("failed to parse response JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Credential initialization or token fetch failed
    #[error("authentication failed: {0}")]
    Auth(#[from] gcp_auth::Error),

    /// Backend reported the asynchronous operation completed with an error
    #[error("operation {name} failed: {message}")]
    OperationFailed { name: String, message: String },
}

impl ProviderError {
    /// The remote resource does not exist (HTTP 404 on a read)
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::Api { status: 404, .. })
    }

    /// Version delete rejected because it is the last version of its module
    pub fn is_final_version_conflict(&self) -> bool {
        matches!(self, ProviderError::Api { message, .. } if message.contains(FINAL_VERSION_MESSAGE))
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_matches_only_404() {
        let err = ProviderError::Api {
            status: 404,
            message: "Resource not found".to_string(),
        };
        assert!(err.is_not_found());

        let err = ProviderError::Api {
            status: 403,
            message: "Permission denied".to_string(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn final_version_conflict_matches_on_message() {
        let err = ProviderError::Api {
            status: 400,
            message: format!("{}.", FINAL_VERSION_MESSAGE),
        };
        assert!(err.is_final_version_conflict());

        let err = ProviderError::Api {
            status: 400,
            message: "Version is receiving traffic".to_string(),
        };
        assert!(!err.is_final_version_conflict());
    }
}
