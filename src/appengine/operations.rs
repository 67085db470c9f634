//! Asynchronous operation polling
//!
//! Submitting or deleting a version returns a long-running operation handle;
//! the caller blocks on [`wait_for_operation`] until the backend reports the
//! operation done, then inspects it for an attached error record.

use super::api;
use crate::error::{ProviderError, Result};
use crate::gcp::client::GcpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed interval between operation status fetches. No backoff, no jitter,
/// no retry cap: an operation that never completes parks the caller until
/// the backend itself gives up.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Backend handle for an in-flight asynchronous action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Operation {
    /// Fully-qualified name, e.g. `apps/my-project/operations/abc123`
    pub name: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
}

/// Error record attached to a completed-but-failed operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationError {
    pub code: Option<i64>,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<serde_json::Value>,
}

/// Block until `operation` completes, fetching its status every
/// [`POLL_INTERVAL`]
///
/// A status fetch failure aborts immediately; completion with an error
/// record becomes [`ProviderError::OperationFailed`] carrying the backend
/// message, with the detail list logged for diagnostics.
pub async fn wait_for_operation(client: &GcpClient, operation: &Operation) -> Result<Operation> {
    wait_with_interval(client, operation, POLL_INTERVAL).await
}

/// Same contract as [`wait_for_operation`] with a caller-chosen cadence
pub async fn wait_with_interval(
    client: &GcpClient,
    operation: &Operation,
    interval: Duration,
) -> Result<Operation> {
    loop {
        let current = api::get_operation(client, &operation.name).await?;

        if current.done {
            if let Some(error) = &current.error {
                tracing::error!(
                    details = ?error.details,
                    "Operation {} failed: {}",
                    current.name,
                    error.message
                );
                return Err(ProviderError::OperationFailed {
                    name: current.name,
                    message: error.message.clone(),
                });
            }

            tracing::debug!("Operation {} completed", current.name);
            return Ok(current);
        }

        tracing::debug!("Operation {} still running, next poll in {:?}", current.name, interval);
        tokio::time::sleep(interval).await;
    }
}
