//! Infrastructure-as-code resource provider for Google App Engine module
//! versions.
//!
//! A version resource declares a module name, a version identifier, a Cloud
//! Storage location holding the build artifacts, a runtime and a scaling
//! policy. Creating the resource lists the artifacts into a file manifest,
//! assembles a deployment descriptor, submits it and blocks until the
//! backend's asynchronous operation resolves; reading reconciles local state
//! with the remote version; deleting removes the version, falling back to
//! removing the whole module when the version is its last.
//!
//! The plugin host drives the lifecycle; this crate provides everything
//! between the declared configuration and the two GCP APIs.
//!
//! # Example
//!
//! ```ignore
//! use appengine_provider::{config::ProviderConfig, gcp::client::GcpClient, resource};
//!
//! async fn deploy(config: &resource::ResourceConfig) -> appengine_provider::Result<()> {
//!     let provider = ProviderConfig::default();
//!     let client = GcpClient::new(&provider).await?;
//!     let mut state = resource::ResourceState::default();
//!     resource::create(&client, config, &mut state).await?;
//!     Ok(())
//! }
//! ```

pub mod appengine;
pub mod config;
pub mod error;
pub mod gcp;
pub mod logging;
pub mod resource;
pub mod storage;

pub use error::{ProviderError, Result};

/// Version injected at compile time via PROVIDER_VERSION env var (set by
/// CI/CD), or "dev" for local builds.
pub const VERSION: &str = match option_env!("PROVIDER_VERSION") {
    Some(v) => v,
    None => "dev",
};
