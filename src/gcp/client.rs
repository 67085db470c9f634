//! GCP Client
//!
//! Main client for interacting with GCP APIs, combining authentication
//! and HTTP functionality.

use super::auth::GcpCredentials;
use super::http::GcpHttpClient;
use crate::config::ProviderConfig;
use crate::error::Result;
use serde_json::Value;

/// App Engine Admin API endpoint
pub const APPENGINE_API_BASE: &str = "https://appengine.googleapis.com";

/// Cloud Storage JSON API endpoint
pub const STORAGE_API_BASE: &str = "https://storage.googleapis.com";

/// Fixed public base for deployment source URLs; never reconfigured - the
/// backend fetches manifest entries from the public storage host regardless
/// of which endpoint this process lists objects against
pub const STORAGE_SOURCE_BASE: &str = "https://storage.googleapis.com/";

/// Main GCP client
///
/// Cheap to clone and safe to share across independent resource instances;
/// it holds no per-resource state.
#[derive(Clone)]
pub struct GcpClient {
    pub credentials: GcpCredentials,
    pub http: GcpHttpClient,
    pub project_id: String,
    appengine_base: String,
    storage_base: String,
}

impl GcpClient {
    /// Create a new GCP client using Application Default Credentials
    pub async fn new(config: &ProviderConfig) -> Result<Self> {
        let credentials = GcpCredentials::new().await?;
        Self::with_credentials(credentials, config)
    }

    /// Create a client around existing credentials (static tokens, emulators)
    pub fn with_credentials(credentials: GcpCredentials, config: &ProviderConfig) -> Result<Self> {
        let http = GcpHttpClient::new()?;
        let project_id = config.effective_project()?;

        Ok(Self {
            credentials,
            http,
            project_id,
            appengine_base: config.appengine_endpoint(),
            storage_base: config.storage_endpoint(),
        })
    }

    /// Get the current access token
    pub async fn get_token(&self) -> Result<String> {
        self.credentials.get_token().await
    }

    /// Make a GET request to a GCP API
    pub async fn get(&self, url: &str) -> Result<Value> {
        let token = self.get_token().await?;
        self.http.get(url, &token).await
    }

    /// Make a POST request to a GCP API
    pub async fn post(&self, url: &str, body: Option<&Value>) -> Result<Value> {
        let token = self.get_token().await?;
        self.http.post(url, &token, body).await
    }

    /// Make a DELETE request to a GCP API
    pub async fn delete(&self, url: &str) -> Result<Value> {
        let token = self.get_token().await?;
        self.http.delete(url, &token).await
    }

    // =========================================================================
    // App Engine Admin API helpers
    // =========================================================================

    /// Build an App Engine Admin API URL under this project's app
    pub fn apps_url(&self, path: &str) -> String {
        format!(
            "{}/v1beta4/apps/{}/{}",
            self.appengine_base, self.project_id, path
        )
    }

    /// Build a module URL
    pub fn module_url(&self, module: &str) -> String {
        self.apps_url(&format!("modules/{}", module))
    }

    /// Build a module's version collection URL
    pub fn versions_url(&self, module: &str) -> String {
        self.apps_url(&format!("modules/{}/versions", module))
    }

    /// Build a single version URL
    pub fn version_url(&self, module: &str, version: &str) -> String {
        self.apps_url(&format!("modules/{}/versions/{}", module, version))
    }

    /// Build an operation URL from its fully-qualified name
    /// (`apps/{app}/operations/{id}`)
    pub fn operation_url(&self, name: &str) -> String {
        format!("{}/v1beta4/{}", self.appengine_base, name)
    }

    // =========================================================================
    // Cloud Storage API helpers
    // =========================================================================

    /// Build the Cloud Storage object-listing URL for a bucket
    pub fn storage_objects_url(&self, bucket: &str) -> String {
        format!("{}/storage/v1/b/{}/o", self.storage_base, bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcp::auth::GcpCredentials;

    fn test_client() -> GcpClient {
        let config = ProviderConfig {
            project: Some("test-project".to_string()),
            ..Default::default()
        };
        GcpClient::with_credentials(GcpCredentials::from_static_token("t"), &config).unwrap()
    }

    #[test]
    fn test_appengine_urls() {
        let client = test_client();
        assert_eq!(
            client.version_url("default", "v1"),
            "https://appengine.googleapis.com/v1beta4/apps/test-project/modules/default/versions/v1"
        );
        assert_eq!(
            client.operation_url("apps/test-project/operations/abc123"),
            "https://appengine.googleapis.com/v1beta4/apps/test-project/operations/abc123"
        );
    }

    #[test]
    fn test_storage_objects_url() {
        let client = test_client();
        assert_eq!(
            client.storage_objects_url("build-artifacts"),
            "https://storage.googleapis.com/storage/v1/b/build-artifacts/o"
        );
    }
}
