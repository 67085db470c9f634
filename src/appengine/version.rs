//! App Engine Admin API wire types
//!
//! Serde structs for the version descriptor submitted on deploy and the
//! version resource returned on read. Field names follow the Admin API
//! JSON (camelCase); unset optionals are omitted from request bodies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serving status of a deployed version
pub const SERVING_STATUS_SERVING: &str = "SERVING";

/// Inbound service enabling warmup requests on every deployed version
pub const INBOUND_SERVICE_WARMUP: &str = "INBOUND_SERVICE_WARMUP";

/// A deployable snapshot of a module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Version {
    /// Version identifier within its module (request side)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Fully-qualified resource name, e.g.
    /// `apps/my-project/modules/default/versions/v1` (response side)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threadsafe: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automatic_scaling: Option<AutomaticScaling>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inbound_services: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub handlers: Vec<UrlMap>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub env_variables: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment: Option<Deployment>,
    /// Computed by the backend; `SERVING` once traffic can reach the version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_status: Option<String>,
}

/// Idle-instance scaling bounds and pending-latency thresholds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutomaticScaling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_idle_instances: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_idle_instances: Option<i64>,
    /// Omitted when the configuration holds the literal `Automatic`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_pending_latency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pending_latency: Option<String>,
}

/// One routing rule mapping a URL pattern to a script handler
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UrlMap {
    pub url_regex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<ScriptHandler>,
}

impl UrlMap {
    /// Rule pointing at a script, with no transport or login requirement
    pub fn script(url_regex: &str, script_path: &str) -> Self {
        Self {
            url_regex: url_regex.to_string(),
            script: Some(ScriptHandler {
                script_path: script_path.to_string(),
            }),
            ..Default::default()
        }
    }

    /// Rule with optional secure transport and optional login; the script
    /// path is a placeholder the runtime never executes
    pub fn optional_secure(url_regex: &str) -> Self {
        Self {
            url_regex: url_regex.to_string(),
            login: Some("LOGIN_OPTIONAL".to_string()),
            security_level: Some("SECURE_OPTIONAL".to_string()),
            script: Some(ScriptHandler {
                script_path: "unused".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptHandler {
    pub script_path: String,
}

/// Code and assets the version runs from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Deployment {
    /// Manifest: relative on-disk path to remote source
    pub files: HashMap<String, FileInfo>,
}

/// One manifest entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FileInfo {
    pub source_url: String,
}

impl FileInfo {
    pub fn new(source_url: String) -> Self {
        Self { source_url }
    }
}
