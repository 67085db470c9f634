//! App Engine Admin API bindings
//!
//! Typed wrappers over the module/version/operation endpoints the provider
//! needs. Mutating calls return the backend's asynchronous [`Operation`]
//! handle; see [`super::operations`] for polling it to completion.

use super::operations::Operation;
use super::version::Version;
use crate::error::Result;
use crate::gcp::client::GcpClient;

/// Submit a new version under `module`
///
/// The backend starts provisioning immediately; the returned operation
/// resolves once the version is deployed or the deployment failed.
pub async fn create_version(
    client: &GcpClient,
    module: &str,
    version: &Version,
) -> Result<Operation> {
    tracing::info!(
        "Creating version {} of module {}",
        version.id.as_deref().unwrap_or("<unnamed>"),
        module
    );

    let url = client.versions_url(module);
    let body = serde_json::to_value(version)?;
    let response = client.post(&url, Some(&body)).await?;

    Ok(serde_json::from_value(response)?)
}

/// Fetch a deployed version by module and version identifier
///
/// Fails with a 404 API error when the version no longer exists; callers
/// distinguish that through [`crate::ProviderError::is_not_found`].
pub async fn get_version(client: &GcpClient, module: &str, version: &str) -> Result<Version> {
    let url = client.version_url(module, version);
    let response = client.get(&url).await?;

    Ok(serde_json::from_value(response)?)
}

/// Delete a single version under `module`
///
/// Rejected by the backend when the version is the last one of its module;
/// see [`crate::ProviderError::is_final_version_conflict`].
pub async fn delete_version(client: &GcpClient, module: &str, version: &str) -> Result<Operation> {
    tracing::info!("Deleting version {} of module {}", version, module);

    let url = client.version_url(module, version);
    let response = client.delete(&url).await?;

    Ok(serde_json::from_value(response)?)
}

/// Delete a whole module, all versions included
pub async fn delete_module(client: &GcpClient, module: &str) -> Result<Operation> {
    tracing::info!("Deleting module {}", module);

    let url = client.module_url(module);
    let response = client.delete(&url).await?;

    Ok(serde_json::from_value(response)?)
}

/// Fetch the current status of an operation by its fully-qualified name
pub async fn get_operation(client: &GcpClient, name: &str) -> Result<Operation> {
    let url = client.operation_url(name);
    let response = client.get(&url).await?;

    Ok(serde_json::from_value(response)?)
}
