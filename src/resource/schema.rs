//! Declarative resource schema
//!
//! The attributes a user declares for one App Engine version resource, with
//! the defaults the provider applies, plus the validation helpers that run
//! before anything is submitted. Every attribute forces replacement on
//! change; there is no in-place update.

use crate::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Pending-latency value meaning "let the backend decide"
pub const LATENCY_AUTOMATIC: &str = "Automatic";

/// User-declared attributes of one version resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfig {
    /// Module (service) the version deploys under
    pub module_name: String,
    /// Version identifier within the module
    pub version: String,
    /// Cloud Storage bucket holding the build artifacts
    pub gstorage_bucket: String,
    /// Key prefix under which the artifacts live
    pub gstorage_key: String,
    /// Runtime identifier, see [`Runtime`]
    pub runtime: String,
    #[serde(default = "default_threadsafe")]
    pub threadsafe: bool,
    /// Exactly one scaling block must be supplied
    #[serde(default)]
    pub scaling: Vec<ScalingConfig>,
    /// Output topic exposed to the app through its environment
    #[serde(default)]
    pub topic_name: Option<String>,
    /// Script handlers requests are routed to (python runtimes)
    #[serde(default)]
    pub script_name: Option<String>,
    /// URL pattern routed to the script (python runtimes)
    #[serde(default)]
    pub python_url_regex: Option<String>,
    /// Free-form environment variables; reserved keys win on collision
    #[serde(default)]
    pub env_variables: HashMap<String, String>,
}

fn default_threadsafe() -> bool {
    true
}

/// Idle-instance scaling bounds and pending-latency thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingConfig {
    #[serde(default = "default_min_idle_instances")]
    pub min_idle_instances: i64,
    #[serde(default = "default_max_idle_instances")]
    pub max_idle_instances: i64,
    /// Either `Automatic` or `<1-15>s`
    #[serde(default = "default_pending_latency")]
    pub min_pending_latency: String,
    #[serde(default = "default_pending_latency")]
    pub max_pending_latency: String,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            min_idle_instances: default_min_idle_instances(),
            max_idle_instances: default_max_idle_instances(),
            min_pending_latency: default_pending_latency(),
            max_pending_latency: default_pending_latency(),
        }
    }
}

fn default_min_idle_instances() -> i64 {
    1
}

fn default_max_idle_instances() -> i64 {
    3
}

fn default_pending_latency() -> String {
    LATENCY_AUTOMATIC.to_string()
}

/// Supported runtime families
///
/// Closed set: an unknown runtime string is a configuration error, never a
/// silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runtime {
    Java7,
    Python27,
}

impl FromStr for Runtime {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "java7" => Ok(Runtime::Java7),
            "python27" => Ok(Runtime::Python27),
            other => Err(ProviderError::InvalidConfig(format!(
                "unsupported runtime {:?}: expected \"java7\" or \"python27\"",
                other
            ))),
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runtime::Java7 => write!(f, "java7"),
            Runtime::Python27 => write!(f, "python27"),
        }
    }
}

impl ResourceConfig {
    /// Parse the declared runtime into the closed [`Runtime`] set
    pub fn runtime(&self) -> Result<Runtime> {
        self.runtime.parse()
    }

    /// The single scaling block, or a configuration error when zero or
    /// multiple were supplied
    pub fn scaling_policy(&self) -> Result<&ScalingConfig> {
        match self.scaling.as_slice() {
            [scaling] => Ok(scaling),
            [] => Err(ProviderError::InvalidConfig(
                "a scaling block is required".to_string(),
            )),
            blocks => Err(ProviderError::InvalidConfig(format!(
                "exactly one scaling block may be supplied, got {}",
                blocks.len()
            ))),
        }
    }
}

/// Remote identity and computed attributes the provider reports back to
/// its host
///
/// The resource ID equals the remote version's fully-qualified name; a
/// cleared ID signals the resource no longer exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceState {
    pub id: Option<String>,
    pub serving_status: Option<String>,
}

/// Validate a pending-latency string against the accepted `<1-15>s` pattern
///
/// Returns the input unchanged on success. The literal `Automatic` is not
/// accepted here; callers skip validation for it.
pub fn validate_pending_latency(value: &str) -> Result<&str> {
    let invalid = || ProviderError::InvalidLatency {
        value: value.to_string(),
    };

    let seconds = value.strip_suffix('s').ok_or_else(invalid)?;
    let seconds: u32 = seconds.parse().map_err(|_| invalid())?;

    if (1..=15).contains(&seconds) {
        Ok(value)
    } else {
        Err(invalid())
    }
}
