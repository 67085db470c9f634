//! Property-based tests using proptest
//!
//! These tests verify the pending-latency validator and the declarative
//! schema defaults against randomized inputs.

use appengine_provider::resource::schema::{validate_pending_latency, ScalingConfig};
use appengine_provider::resource::{ResourceConfig, Runtime};
use proptest::prelude::*;

proptest! {
    /// Every whole second in [1, 15] with the "s" suffix is accepted and
    /// returned unchanged
    #[test]
    fn accepted_range_returns_input(seconds in 1u32..=15) {
        let value = format!("{}s", seconds);
        prop_assert_eq!(validate_pending_latency(&value).unwrap(), value.as_str());
    }

    /// Whole seconds outside [1, 15] are rejected
    #[test]
    fn out_of_range_seconds_rejected(seconds in prop_oneof![Just(0u32), 16u32..10_000]) {
        let value = format!("{}s", seconds);
        prop_assert!(validate_pending_latency(&value).is_err());
    }

    /// Values without the trailing "s" are rejected regardless of digits
    #[test]
    fn missing_suffix_rejected(seconds in 1u32..=15) {
        let value = seconds.to_string();
        prop_assert!(validate_pending_latency(&value).is_err());
    }

    /// Arbitrary non-numeric prefixes are rejected
    #[test]
    fn non_numeric_prefix_rejected(prefix in "[a-z]{1,8}") {
        let value = format!("{}s", prefix);
        prop_assert!(validate_pending_latency(&value).is_err());
    }

    /// Runtime parsing accepts only the closed set
    #[test]
    fn unknown_runtimes_rejected(runtime in "[a-z][a-z0-9]{0,10}") {
        prop_assume!(runtime != "java7" && runtime != "python27");
        prop_assert!(runtime.parse::<Runtime>().is_err());
    }

    /// A scaling block deserialized from arbitrary idle-instance bounds
    /// keeps them and defaults both latencies to Automatic
    #[test]
    fn scaling_defaults_fill_missing_fields(min in 0i64..100, max in 0i64..100) {
        let scaling: ScalingConfig = serde_json::from_value(serde_json::json!({
            "minIdleInstances": min,
            "maxIdleInstances": max
        })).unwrap();

        prop_assert_eq!(scaling.min_idle_instances, min);
        prop_assert_eq!(scaling.max_idle_instances, max);
        prop_assert_eq!(scaling.min_pending_latency.as_str(), "Automatic");
        prop_assert_eq!(scaling.max_pending_latency.as_str(), "Automatic");
    }
}

/// Declared attributes survive a serialize/deserialize cycle with the
/// camelCase wire names
#[test]
fn config_roundtrips_camel_case_names() {
    let config: ResourceConfig = serde_json::from_value(serde_json::json!({
        "moduleName": "foobar",
        "version": "foobaz",
        "gstorageBucket": "build-artifacts-public-eu",
        "gstorageKey": "hxtest-1.0-SNAPSHOT/",
        "runtime": "java7",
        "scaling": [{}]
    }))
    .unwrap();

    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["moduleName"], "foobar");
    assert_eq!(value["gstorageBucket"], "build-artifacts-public-eu");
    assert_eq!(value["scaling"][0]["minPendingLatency"], "Automatic");
}
