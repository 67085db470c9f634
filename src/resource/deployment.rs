//! Deployment Version Assembler
//!
//! Turns a validated [`ResourceConfig`] into the complete version descriptor
//! submitted to the backend: scaling policy, runtime handlers, merged
//! environment and the Cloud Storage file manifest.

use super::schema::{validate_pending_latency, ResourceConfig, Runtime, ScalingConfig, LATENCY_AUTOMATIC};
use crate::appengine::version::{
    AutomaticScaling, Deployment, UrlMap, Version, INBOUND_SERVICE_WARMUP,
};
use crate::error::{ProviderError, Result};
use crate::gcp::client::GcpClient;
use crate::storage;
use std::collections::HashMap;

/// Reserved environment variable carrying the configured output topic
const ENV_TOPIC_NAME: &str = "TOPIC_NAME";

/// Reserved environment variable telling the app to report message ids
const ENV_RETURN_MESSAGE_IDS: &str = "RETURN_MESSAGE_IDS";

/// Assemble the deployment descriptor for `config`
///
/// Validation order is fixed: scaling-block cardinality, pending latencies,
/// then the file manifest listing; the first failure propagates and nothing
/// is submitted.
pub async fn build_version(client: &GcpClient, config: &ResourceConfig) -> Result<Version> {
    let scaling = config.scaling_policy()?;
    let automatic_scaling = automatic_scaling(scaling)?;

    let files =
        storage::build_file_manifest(client, &config.gstorage_bucket, &config.gstorage_key)
            .await?;

    Ok(Version {
        id: Some(config.version.clone()),
        runtime: Some(config.runtime.clone()),
        threadsafe: Some(config.threadsafe),
        automatic_scaling: Some(automatic_scaling),
        env_variables: merged_env(config),
        handlers: handler_set(config)?,
        // Warmup requests keep idle instances ready before traffic lands
        inbound_services: vec![INBOUND_SERVICE_WARMUP.to_string()],
        deployment: Some(Deployment { files }),
        ..Default::default()
    })
}

/// Map the scaling block onto the wire struct, validating explicit
/// pending latencies and omitting `Automatic` ones
fn automatic_scaling(scaling: &ScalingConfig) -> Result<AutomaticScaling> {
    Ok(AutomaticScaling {
        min_idle_instances: Some(scaling.min_idle_instances),
        max_idle_instances: Some(scaling.max_idle_instances),
        min_pending_latency: pending_latency(&scaling.min_pending_latency)?,
        max_pending_latency: pending_latency(&scaling.max_pending_latency)?,
    })
}

fn pending_latency(value: &str) -> Result<Option<String>> {
    if value == LATENCY_AUTOMATIC {
        return Ok(None);
    }
    validate_pending_latency(value).map(|v| Some(v.to_string()))
}

/// User environment merged with the reserved variables; reserved keys win
fn merged_env(config: &ResourceConfig) -> HashMap<String, String> {
    let mut env = config.env_variables.clone();

    if let Some(topic) = &config.topic_name {
        env.insert(ENV_TOPIC_NAME.to_string(), topic.clone());
    }
    env.insert(ENV_RETURN_MESSAGE_IDS.to_string(), "true".to_string());

    env
}

/// Routing rules for the configured runtime
fn handler_set(config: &ResourceConfig) -> Result<Vec<UrlMap>> {
    match config.runtime()? {
        Runtime::Java7 => Ok(java_handlers()),
        Runtime::Python27 => {
            let script = config.script_name.as_deref().ok_or_else(|| {
                ProviderError::InvalidConfig(
                    "scriptName is required for the python27 runtime".to_string(),
                )
            })?;
            let url_regex = config.python_url_regex.as_deref().ok_or_else(|| {
                ProviderError::InvalidConfig(
                    "pythonUrlRegex is required for the python27 runtime".to_string(),
                )
            })?;
            Ok(vec![UrlMap::script(url_regex, script)])
        }
    }
}

/// Fixed rule set for the java runtime family: root, wildcard, the reserved
/// internal prefix and the endpoint path
fn java_handlers() -> Vec<UrlMap> {
    ["/", "/.*", "/_ah/.*", "/endpoint"]
        .into_iter()
        .map(UrlMap::optional_secure)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn java_config() -> ResourceConfig {
        serde_json::from_value(json!({
            "moduleName": "foobar",
            "version": "foobaz",
            "gstorageBucket": "build-artifacts-public-eu",
            "gstorageKey": "hxtest-1.0-SNAPSHOT/",
            "runtime": "java7",
            "scaling": [{}],
            "topicName": "projects/hx-test/topics/notarealtopic"
        }))
        .unwrap()
    }

    fn python_config() -> ResourceConfig {
        serde_json::from_value(json!({
            "moduleName": "foobar",
            "version": "foobaz",
            "gstorageBucket": "build-artifacts-public-eu",
            "gstorageKey": "python-test-app/",
            "runtime": "python27",
            "scriptName": "guestbook.app",
            "pythonUrlRegex": "/.*",
            "scaling": [{}]
        }))
        .unwrap()
    }

    #[test]
    fn test_java_handler_set_is_fixed() {
        let handlers = handler_set(&java_config()).unwrap();
        let patterns: Vec<&str> = handlers.iter().map(|h| h.url_regex.as_str()).collect();
        assert_eq!(patterns, ["/", "/.*", "/_ah/.*", "/endpoint"]);

        for handler in &handlers {
            assert_eq!(handler.login.as_deref(), Some("LOGIN_OPTIONAL"));
            assert_eq!(handler.security_level.as_deref(), Some("SECURE_OPTIONAL"));
            assert_eq!(handler.script.as_ref().unwrap().script_path, "unused");
        }
    }

    #[test]
    fn test_python_handler_from_config_attributes() {
        let handlers = handler_set(&python_config()).unwrap();
        assert_eq!(handlers.len(), 1);
        assert_eq!(handlers[0].url_regex, "/.*");
        assert_eq!(handlers[0].script.as_ref().unwrap().script_path, "guestbook.app");
        assert!(handlers[0].login.is_none());
    }

    #[test]
    fn test_python_runtime_requires_script_attributes() {
        let mut config = python_config();
        config.script_name = None;
        assert!(matches!(
            handler_set(&config),
            Err(ProviderError::InvalidConfig(_))
        ));

        let mut config = python_config();
        config.python_url_regex = None;
        assert!(matches!(
            handler_set(&config),
            Err(ProviderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_reserved_env_keys_win_over_user_map() {
        let mut config = java_config();
        config
            .env_variables
            .insert(ENV_RETURN_MESSAGE_IDS.to_string(), "false".to_string());
        config
            .env_variables
            .insert("APP_MODE".to_string(), "staging".to_string());

        let env = merged_env(&config);
        assert_eq!(env[ENV_RETURN_MESSAGE_IDS], "true");
        assert_eq!(env[ENV_TOPIC_NAME], "projects/hx-test/topics/notarealtopic");
        assert_eq!(env["APP_MODE"], "staging");
    }

    #[test]
    fn test_topic_env_absent_without_topic() {
        let mut config = java_config();
        config.topic_name = None;

        let env = merged_env(&config);
        assert!(!env.contains_key(ENV_TOPIC_NAME));
        assert_eq!(env[ENV_RETURN_MESSAGE_IDS], "true");
    }

    #[test]
    fn test_automatic_latency_omitted_from_descriptor() {
        let scaling = ScalingConfig::default();
        let wire = automatic_scaling(&scaling).unwrap();
        assert_eq!(wire.min_idle_instances, Some(1));
        assert_eq!(wire.max_idle_instances, Some(3));
        assert!(wire.min_pending_latency.is_none());
        assert!(wire.max_pending_latency.is_none());
    }

    #[test]
    fn test_explicit_latency_validated_and_carried() {
        let scaling = ScalingConfig {
            min_pending_latency: "1s".to_string(),
            max_pending_latency: "10s".to_string(),
            ..Default::default()
        };
        let wire = automatic_scaling(&scaling).unwrap();
        assert_eq!(wire.min_pending_latency.as_deref(), Some("1s"));
        assert_eq!(wire.max_pending_latency.as_deref(), Some("10s"));

        let scaling = ScalingConfig {
            min_pending_latency: "16s".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            automatic_scaling(&scaling),
            Err(ProviderError::InvalidLatency { .. })
        ));
    }
}
