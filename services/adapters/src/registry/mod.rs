//! Token Registry
//!
//! In-memory cache of asset decimals keyed by unit, plus the set of verified
//! policy ids. Both collections are immutable snapshots behind atomically
//! swappable pointers: lookups never lock, and a refresh publishes a fully
//! built replacement in one swap. A reader sees either the old or the new
//! snapshot, never a partially rebuilt one.
//!
//! Refresh policy:
//! - decimals come from the paginated Koios listing, falling back to the
//!   snapshot, falling back to whatever was loaded before
//! - verified policies come from the curated document; on failure the set is
//!   emptied rather than kept stale

pub mod entry;
pub mod sources;

use aggregator_config::RegistryConfig;
use arc_swap::ArcSwap;
use once_cell::sync::OnceCell;
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{error, info, warn};

pub use entry::RegistryEntry;
pub use sources::{index_by_unit, load_snapshot, BUNDLED_SNAPSHOT};

use crate::error::Result;
use crate::http::build_client;

static SHARED: OnceCell<Arc<TokenRegistry>> = OnceCell::new();

/// Where the decimals mapping came from after a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalsSource {
    /// Remote listing succeeded
    Remote { entries: usize },
    /// Remote listing failed, fallback snapshot loaded
    Snapshot { entries: usize },
    /// Both failed, previous mapping kept
    Retained { entries: usize },
}

/// State of the verified-policy set after a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifiedSource {
    Fetched { policies: usize },
    /// Document unavailable; nothing is considered verified
    Cleared,
}

/// Summary of one [`TokenRegistry::refresh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    pub decimals: DecimalsSource,
    pub verified: VerifiedSource,
}

/// Shared asset-metadata cache
pub struct TokenRegistry {
    config: RegistryConfig,
    client: Client,
    decimals_by_unit: ArcSwap<HashMap<String, RegistryEntry>>,
    verified_policies: ArcSwap<HashSet<String>>,
}

impl TokenRegistry {
    /// Create an empty registry; call [`refresh`](Self::refresh) to populate it
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let client = build_client(config.request_timeout())?;
        Ok(Self::with_client(config, client))
    }

    /// Create an empty registry using an existing HTTP client
    pub fn with_client(config: RegistryConfig, client: Client) -> Self {
        Self {
            config,
            client,
            decimals_by_unit: ArcSwap::from_pointee(HashMap::new()),
            verified_policies: ArcSwap::from_pointee(HashSet::new()),
        }
    }

    /// Process-wide registry, created with default settings on first use
    ///
    /// Concurrent first callers all receive the same instance.
    pub fn shared() -> Arc<TokenRegistry> {
        SHARED
            .get_or_init(|| {
                let config = RegistryConfig::default();
                let client = build_client(config.request_timeout()).unwrap_or_else(|e| {
                    warn!("{}; falling back to a default HTTP client", e);
                    Client::new()
                });
                Arc::new(Self::with_client(config, client))
            })
            .clone()
    }

    /// Install the process-wide registry with explicit settings
    ///
    /// Returns the already installed instance if one exists.
    pub fn init_shared(config: RegistryConfig) -> Result<Arc<TokenRegistry>> {
        SHARED
            .get_or_try_init(|| Self::new(config).map(Arc::new))
            .cloned()
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Refresh both collections; never fails, the outcome is reported
    pub async fn refresh(&self) -> RefreshReport {
        let decimals = self.refresh_decimals().await;
        let verified = self.refresh_verified().await;

        let report = RefreshReport { decimals, verified };
        info!(?report, "Token registry refreshed");
        report
    }

    async fn refresh_decimals(&self) -> DecimalsSource {
        info!(url = %self.config.metadata_url, "Fetching token registry list");

        match sources::fetch_registry_entries(&self.client, &self.config).await {
            Ok(entries) => {
                let by_unit = index_by_unit(entries);
                let count = by_unit.len();
                self.decimals_by_unit.store(Arc::new(by_unit));
                info!(entries = count, "Updated token registry list");
                DecimalsSource::Remote { entries: count }
            }
            Err(e) => {
                error!("Token registry fetch failed: {}", e);
                self.load_fallback()
            }
        }
    }

    fn load_fallback(&self) -> DecimalsSource {
        match load_snapshot(self.config.snapshot_path.as_deref()) {
            Ok(entries) => {
                let by_unit = index_by_unit(entries);
                let count = by_unit.len();
                self.decimals_by_unit.store(Arc::new(by_unit));
                warn!(entries = count, "Token registry loaded from fallback snapshot");
                DecimalsSource::Snapshot { entries: count }
            }
            Err(e) => {
                let retained = self.len();
                error!(retained, "Fallback snapshot unavailable, keeping previous registry: {}", e);
                DecimalsSource::Retained { entries: retained }
            }
        }
    }

    async fn refresh_verified(&self) -> VerifiedSource {
        info!(url = %self.config.verified_tokens_url, "Fetching verified tokens list");

        match sources::fetch_verified_policies(&self.client, &self.config.verified_tokens_url).await {
            Ok(policies) => {
                let count = policies.len();
                self.verified_policies.store(Arc::new(policies));
                info!(policies = count, "Updated verified tokens list");
                VerifiedSource::Fetched { policies: count }
            }
            Err(e) => {
                error!("Verified tokens fetch failed, clearing verified set: {}", e);
                self.verified_policies.store(Arc::new(HashSet::new()));
                VerifiedSource::Cleared
            }
        }
    }

    /// Registered decimals for a unit
    pub fn lookup(&self, unit: &str) -> Option<u8> {
        self.decimals_by_unit.load().get(unit).map(|entry| entry.decimals)
    }

    /// Registered decimals for a unit, or `default` when unknown
    pub fn decimals_or(&self, unit: &str, default: u8) -> u8 {
        self.lookup(unit).unwrap_or(default)
    }

    /// Configured fallback precision for unknown units
    pub fn default_decimals(&self) -> u8 {
        self.config.default_decimals
    }

    pub fn entry(&self, unit: &str) -> Option<RegistryEntry> {
        self.decimals_by_unit.load().get(unit).cloned()
    }

    pub fn is_verified(&self, policy_id: &str) -> bool {
        self.verified_policies.load().contains(policy_id)
    }

    /// Number of registered units
    pub fn len(&self) -> usize {
        self.decimals_by_unit.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn verified_count(&self) -> usize {
        self.verified_policies.load().len()
    }

    /// Current decimals mapping; stays valid across later refreshes
    pub fn entries_snapshot(&self) -> Arc<HashMap<String, RegistryEntry>> {
        self.decimals_by_unit.load_full()
    }

    /// Current verified-policy set; stays valid across later refreshes
    pub fn verified_snapshot(&self) -> Arc<HashSet<String>> {
        self.verified_policies.load_full()
    }

    /// Drop both collections
    pub fn clear(&self) {
        self.decimals_by_unit.store(Arc::new(HashMap::new()));
        self.verified_policies.store(Arc::new(HashSet::new()));
    }

    #[cfg(test)]
    pub(crate) fn seeded(entries: Vec<RegistryEntry>, verified: &[&str]) -> Self {
        let registry = Self::with_client(RegistryConfig::default(), Client::new());
        registry.decimals_by_unit.store(Arc::new(index_by_unit(entries)));
        registry
            .verified_policies
            .store(Arc::new(verified.iter().map(|p| p.to_string()).collect()));
        registry
    }
}

impl std::fmt::Debug for TokenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRegistry")
            .field("entries", &self.len())
            .field("verified", &self.verified_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN_UNIT: &str = "29d222ce763455e3d7a09a665ce554f00ac89d2e99a1a83d267170c64d494e";

    fn registry() -> TokenRegistry {
        TokenRegistry::seeded(
            vec![RegistryEntry::new(
                "29d222ce763455e3d7a09a665ce554f00ac89d2e99a1a83d267170c6",
                "4d494e",
                6,
            )],
            &["29d222ce763455e3d7a09a665ce554f00ac89d2e99a1a83d267170c6"],
        )
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let registry = registry();
        assert_eq!(registry.lookup(MIN_UNIT), Some(6));
        assert_eq!(registry.lookup("deadbeef"), None);
        assert_eq!(registry.decimals_or("deadbeef", 0), 0);
        assert_eq!(registry.decimals_or(MIN_UNIT, 0), 6);
    }

    #[test]
    fn test_verified_is_by_policy() {
        let registry = registry();
        assert!(registry.is_verified("29d222ce763455e3d7a09a665ce554f00ac89d2e99a1a83d267170c6"));
        assert!(!registry.is_verified(MIN_UNIT));
    }

    #[test]
    fn test_snapshot_survives_clear() {
        let registry = registry();
        let before = registry.entries_snapshot();
        registry.clear();

        assert!(registry.is_empty());
        assert_eq!(registry.verified_count(), 0);
        assert_eq!(before.len(), 1);
    }
}
