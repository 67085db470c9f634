//! Provider Configuration
//!
//! Process-level settings handed to the provider by its host: the target
//! GCP project and optional API endpoint overrides (emulators, mocks).

use crate::error::{ProviderError, Result};
use crate::gcp::client::{APPENGINE_API_BASE, STORAGE_API_BASE};
use serde::{Deserialize, Serialize};
use url::Url;

/// Provider-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    /// GCP project hosting the App Engine application; falls back to the
    /// environment and gcloud CLI configuration when unset
    #[serde(default)]
    pub project: Option<String>,
    /// App Engine Admin API endpoint override
    #[serde(default)]
    pub appengine_endpoint: Option<String>,
    /// Cloud Storage JSON API endpoint override (listing only; deployment
    /// source URLs always point at the public storage host)
    #[serde(default)]
    pub storage_endpoint: Option<String>,
}

impl ProviderConfig {
    /// Resolve the effective project (config > environment > gcloud config)
    pub fn effective_project(&self) -> Result<String> {
        self.project
            .clone()
            .or_else(crate::gcp::auth::get_default_project)
            .ok_or_else(|| {
                ProviderError::InvalidConfig(
                    "no GCP project configured; set `project` or GOOGLE_CLOUD_PROJECT".to_string(),
                )
            })
    }

    /// App Engine Admin API base, trailing slash trimmed
    pub fn appengine_endpoint(&self) -> String {
        normalize_endpoint(self.appengine_endpoint.as_deref(), APPENGINE_API_BASE)
    }

    /// Cloud Storage JSON API base, trailing slash trimmed
    pub fn storage_endpoint(&self) -> String {
        normalize_endpoint(self.storage_endpoint.as_deref(), STORAGE_API_BASE)
    }

    /// Reject malformed endpoint overrides before any request is built
    pub fn validate(&self) -> Result<()> {
        for endpoint in [&self.appengine_endpoint, &self.storage_endpoint]
            .into_iter()
            .flatten()
        {
            Url::parse(endpoint).map_err(|e| {
                ProviderError::InvalidConfig(format!("invalid endpoint {:?}: {}", endpoint, e))
            })?;
        }
        Ok(())
    }
}

fn normalize_endpoint(configured: Option<&str>, default: &str) -> String {
    configured
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}
