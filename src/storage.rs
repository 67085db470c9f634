//! File Manifest Builder
//!
//! Lists Cloud Storage objects under a key prefix and turns them into the
//! file manifest submitted with a deployment: relative on-disk path mapped
//! to the object's public source URL.

use crate::appengine::version::FileInfo;
use crate::error::Result;
use crate::gcp::client::{GcpClient, STORAGE_SOURCE_BASE};
use std::collections::HashMap;

/// Characters the deployment manifest cannot carry in a file path; objects
/// whose names contain one are skipped
const DISALLOWED_CHARS: [char; 2] = ['(', '~'];

/// Build the deployment file manifest for every object under `key` in
/// `bucket`
///
/// The prefix is normalized to a trailing `/` before listing and stripped
/// from each object name to form the manifest key. Duplicate keys are
/// last-wins. Fails on the first listing error with no partial result.
pub async fn build_file_manifest(
    client: &GcpClient,
    bucket: &str,
    key: &str,
) -> Result<HashMap<String, FileInfo>> {
    let prefix = normalize_prefix(key);
    let base_url = client.storage_objects_url(bucket);

    let mut files = HashMap::new();
    let mut page_token: Option<String> = None;

    // Multi-page fetching relies on the backend signalling continuation via
    // nextPageToken; silently truncated pages are not recovered
    loop {
        let mut url = format!("{}?prefix={}", base_url, urlencoding::encode(&prefix));
        if let Some(token) = &page_token {
            url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
        }

        let response = client.get(&url).await?;

        let items = response
            .get("items")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        for item in &items {
            let Some(name) = item.get("name").and_then(|v| v.as_str()) else {
                continue;
            };

            if name.contains(DISALLOWED_CHARS) {
                tracing::debug!("Skipping object with disallowed characters: {}", name);
                continue;
            }

            let manifest_key = name.strip_prefix(&prefix).unwrap_or(name).to_string();
            files.insert(manifest_key, FileInfo::new(source_url(bucket, name)));
        }

        page_token = response
            .get("nextPageToken")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        if page_token.is_none() {
            break;
        }
    }

    tracing::debug!(
        "Built file manifest with {} entries from gs://{}/{}",
        files.len(),
        bucket,
        prefix
    );

    Ok(files)
}

/// Guarantee a trailing path separator on the key prefix
fn normalize_prefix(key: &str) -> String {
    if key.ends_with('/') {
        key.to_string()
    } else {
        format!("{}/", key)
    }
}

/// Public source URL the backend fetches the object from
fn source_url(bucket: &str, object_name: &str) -> String {
    format!("{}{}/{}", STORAGE_SOURCE_BASE, bucket, object_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefix_appends_separator() {
        assert_eq!(normalize_prefix("builds/app-1.0"), "builds/app-1.0/");
        assert_eq!(normalize_prefix("builds/app-1.0/"), "builds/app-1.0/");
    }

    #[test]
    fn test_source_url_concatenation() {
        assert_eq!(
            source_url("build-artifacts", "app-1.0/sub/file.txt"),
            "https://storage.googleapis.com/build-artifacts/app-1.0/sub/file.txt"
        );
    }
}
