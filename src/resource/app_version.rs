//! Resource Lifecycle Controller
//!
//! The create/read/delete entry points the provider host invokes for one
//! version resource. Each call runs to completion on the invoking task;
//! the only suspension point is the operation poll loop.

use super::deployment;
use super::schema::{ResourceConfig, ResourceState};
use crate::appengine::{api, operations};
use crate::error::Result;
use crate::gcp::client::GcpClient;

/// Create the declared version: assemble the descriptor, submit it, block
/// until the deployment operation completes, then read the remote state
/// back into `state`
///
/// No rollback is attempted on failure; a submission that fails mid-flight
/// may leave a partially created remote version behind.
pub async fn create(
    client: &GcpClient,
    config: &ResourceConfig,
    state: &mut ResourceState,
) -> Result<()> {
    let version = deployment::build_version(client, config).await?;

    let operation = api::create_version(client, &config.module_name, &version).await?;
    operations::wait_for_operation(client, &operation).await?;

    tracing::info!(
        "Version {} of module {} deployed",
        config.version,
        config.module_name
    );

    read(client, config, state).await
}

/// Refresh `state` from the backend
///
/// A not-found response clears the resource identifier and reports success:
/// the resource no longer exists remotely. Any other error propagates with
/// the state untouched.
pub async fn read(
    client: &GcpClient,
    config: &ResourceConfig,
    state: &mut ResourceState,
) -> Result<()> {
    match api::get_version(client, &config.module_name, &config.version).await {
        Ok(version) => {
            state.id = version.name;
            state.serving_status = version.serving_status;
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            tracing::info!(
                "Version {} of module {} no longer exists, clearing state",
                config.version,
                config.module_name
            );
            state.id = None;
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Delete the version, falling back to deleting the whole module when the
/// backend rejects the narrow delete because this is its last version
///
/// The identifier is cleared only after the delete operation completes
/// successfully. Every other delete error surfaces unmodified.
pub async fn delete(
    client: &GcpClient,
    config: &ResourceConfig,
    state: &mut ResourceState,
) -> Result<()> {
    let operation = match api::delete_version(client, &config.module_name, &config.version).await {
        Ok(operation) => operation,
        Err(err) if err.is_final_version_conflict() => {
            tracing::info!(
                "Version {} is the final version of module {}, deleting the module",
                config.version,
                config.module_name
            );
            api::delete_module(client, &config.module_name).await?
        }
        Err(err) => return Err(err),
    };

    operations::wait_for_operation(client, &operation).await?;

    state.id = None;
    Ok(())
}
