//! Remote and local sources feeding the token registry
//!
//! - paginated Koios `asset_token_registry` listing (decimals)
//! - verified-token document (policy ids)
//! - fallback snapshot, bundled or from a configured file

use aggregator_config::endpoints::REGISTRY_ORDER;
use aggregator_config::RegistryConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::entry::RegistryEntry;
use crate::error::{AdapterError, Result};

/// Snapshot compiled into the binary, used when no snapshot file is configured
pub const BUNDLED_SNAPSHOT: &str = include_str!("../../data/token_registry.json");

/// Fetch every registry row, page by page
///
/// Stops at the first page holding fewer than `page_size` rows. Any failed
/// page fails the whole listing so a partial mapping is never published;
/// individual malformed rows are skipped.
pub(crate) async fn fetch_registry_entries(
    client: &Client,
    config: &RegistryConfig,
) -> Result<Vec<RegistryEntry>> {
    let page_size = config.page_size;
    let mut entries = Vec::new();

    for page in 0..config.max_pages {
        let offset = page * page_size;
        let request = client.get(&config.metadata_url).query(&[
            ("offset", offset.to_string()),
            ("limit", page_size.to_string()),
            ("order", REGISTRY_ORDER.to_string()),
        ]);

        let rows: Vec<Value> = get_json(&config.metadata_url, request).await?;
        let fetched = rows.len();
        let (valid, skipped) = parse_rows(rows);
        entries.extend(valid);

        if skipped > 0 {
            warn!(page, offset, skipped, "Skipped malformed token registry rows");
        }
        debug!(page, offset, fetched, total = entries.len(), "Fetched token registry page");

        if fetched < page_size {
            return Ok(entries);
        }
    }

    Err(AdapterError::PaginationOverflow {
        url: config.metadata_url.clone(),
        max_pages: config.max_pages,
    })
}

/// Decode registry rows one by one; returns the usable entries and the number skipped
fn parse_rows(rows: Vec<Value>) -> (Vec<RegistryEntry>, usize) {
    let mut entries = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;

    for row in rows {
        match serde_json::from_value::<RegistryEntry>(row) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                debug!("Skipping token registry row: {}", e);
                skipped += 1;
            }
        }
    }

    (entries, skipped)
}

/// Fetch the verified-token document and return its top-level keys
pub(crate) async fn fetch_verified_policies(client: &Client, url: &str) -> Result<HashSet<String>> {
    let document: Map<String, Value> = get_json(url, client.get(url)).await?;
    Ok(document.into_iter().map(|(policy_id, _)| policy_id).collect())
}

/// Load the fallback snapshot from `path`, or the bundled copy when `None`
pub fn load_snapshot(path: Option<&Path>) -> Result<Vec<RegistryEntry>> {
    let snapshot_error = |reason: String| AdapterError::Snapshot {
        path: path.map(Path::to_path_buf),
        reason,
    };

    let raw = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| snapshot_error(e.to_string()))?,
        None => BUNDLED_SNAPSHOT.to_string(),
    };

    serde_json::from_str(&raw).map_err(|e| snapshot_error(e.to_string()))
}

/// Key entries by unit; the first entry seen for a unit wins
pub fn index_by_unit(entries: Vec<RegistryEntry>) -> HashMap<String, RegistryEntry> {
    let mut by_unit = HashMap::with_capacity(entries.len());
    let mut duplicates = 0usize;

    for entry in entries {
        let unit = entry.unit();
        if by_unit.contains_key(&unit) {
            duplicates += 1;
            continue;
        }
        by_unit.insert(unit, entry);
    }

    if duplicates > 0 {
        warn!(duplicates, "Ignored duplicate token registry units");
    }

    by_unit
}

async fn get_json<T: DeserializeOwned>(url: &str, request: reqwest::RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(AdapterError::UnexpectedStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_snapshot_parses() {
        let entries = load_snapshot(None).unwrap();
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| !e.policy_id.is_empty()));
    }

    #[test]
    fn test_snapshot_file_errors_are_reported() {
        let missing = Path::new("/nonexistent/token_registry.json");
        assert!(matches!(
            load_snapshot(Some(missing)),
            Err(AdapterError::Snapshot { path: Some(_), .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            load_snapshot(Some(file.path())),
            Err(AdapterError::Snapshot { .. })
        ));
    }

    #[test]
    fn test_bad_rows_are_skipped_individually() {
        let rows = vec![
            serde_json::json!({"policy_id": "aa", "asset_name": "01", "decimals": 6}),
            serde_json::json!({"policy_id": "bb", "asset_name": "02", "decimals": 300}),
            serde_json::json!({"policy_id": "cc", "asset_name": "03", "decimals": -1}),
            serde_json::json!({"asset_name": "04", "decimals": 2}),
            serde_json::json!("not a row"),
            serde_json::json!({"policy_id": "dd", "decimals": null}),
        ];

        let (entries, skipped) = parse_rows(rows);
        assert_eq!(skipped, 4);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].unit(), "aa01");
        assert_eq!(entries[1].decimals, 0);
    }

    #[test]
    fn test_first_seen_unit_wins() {
        let entries = vec![
            RegistryEntry::new("aa", "01", 6),
            RegistryEntry::new("bb", "02", 8),
            RegistryEntry::new("aa", "01", 2),
        ];

        let by_unit = index_by_unit(entries);
        assert_eq!(by_unit.len(), 2);
        assert_eq!(by_unit["aa01"].decimals, 6);
        assert_eq!(by_unit["bb02"].decimals, 8);
    }
}
