//! Service Configuration Module
//!
//! Provides configuration loading for the registry and venue adapters.
//! Values are layered: built-in defaults, an optional TOML file, then
//! `DEXAGG__`-prefixed environment variables
//! (e.g. `DEXAGG__REGISTRY__PAGE_SIZE=500`).

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::endpoints::{self, vyfinance};
use crate::service;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "DEXAGG";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Token registry sources
    pub registry: RegistryConfig,

    /// VyFinance venue settings
    pub vyfinance: VenueConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

/// Token registry settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct RegistryConfig {
    /// Paginated metadata listing (Koios `asset_token_registry`)
    pub metadata_url: String,

    /// Verified-token JSON document
    pub verified_tokens_url: String,

    /// Rows requested per page
    pub page_size: usize,

    /// Pagination safety cap
    pub max_pages: usize,

    /// Fallback snapshot file; the bundled snapshot is used when unset
    pub snapshot_path: Option<PathBuf>,

    /// Decimals reported for unknown units
    pub default_decimals: u8,

    /// HTTP timeout in milliseconds
    pub request_timeout_ms: u64,
}

/// Per-venue HTTP settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct VenueConfig {
    pub base_url: String,
    pub network_id: u8,
    /// Candle aggregation interval sent with OHLCV queries
    pub ohlcv_interval: String,
    /// Pause before retrying after an HTTP 502
    pub retry_delay_ms: u64,
    pub request_timeout_ms: u64,
}

/// Logging settings
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            metadata_url: endpoints::KOIOS_TOKEN_REGISTRY_URL.to_string(),
            verified_tokens_url: endpoints::VERIFIED_TOKENS_URL.to_string(),
            page_size: endpoints::REGISTRY_PAGE_SIZE,
            max_pages: service::registry::MAX_PAGES,
            snapshot_path: None,
            default_decimals: service::registry::DEFAULT_DECIMALS,
            request_timeout_ms: service::registry::REQUEST_TIMEOUT_MS,
        }
    }
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            base_url: vyfinance::BASE_URL.to_string(),
            network_id: vyfinance::MAINNET_NETWORK_ID,
            ohlcv_interval: vyfinance::DEFAULT_INTERVAL.to_string(),
            retry_delay_ms: service::adapters::RETRY_DELAY_MS,
            request_timeout_ms: service::adapters::REQUEST_TIMEOUT_MS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl RegistryConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl VenueConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl AggregatorConfig {
    /// Load configuration: defaults, then `path` (if given), then environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading configuration file: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: AggregatorConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Expand `$VAR` / `${VAR}` references in URLs and paths
    pub fn expand_env_vars(&mut self) -> Result<()> {
        self.registry.metadata_url = shellexpand::env(&self.registry.metadata_url)
            .context("Failed to expand metadata URL")?
            .into_owned();
        self.registry.verified_tokens_url = shellexpand::env(&self.registry.verified_tokens_url)
            .context("Failed to expand verified tokens URL")?
            .into_owned();
        self.vyfinance.base_url = shellexpand::env(&self.vyfinance.base_url)
            .context("Failed to expand VyFinance base URL")?
            .into_owned();

        if let Some(path) = &self.registry.snapshot_path {
            let raw = path.to_string_lossy();
            let expanded = shellexpand::full(&raw).context("Failed to expand snapshot path")?;
            self.registry.snapshot_path = Some(PathBuf::from(expanded.as_ref()));
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.registry.page_size == 0 {
            anyhow::bail!("registry.page_size must be greater than zero");
        }
        if self.registry.max_pages == 0 {
            anyhow::bail!("registry.max_pages must be greater than zero");
        }
        if self.vyfinance.base_url.trim().is_empty() {
            anyhow::bail!("vyfinance.base_url must not be empty");
        }
        Ok(())
    }
}

/// Convenience function to load configuration with env expansion applied
pub fn load_config(path: Option<&Path>) -> Result<AggregatorConfig> {
    let mut config = AggregatorConfig::load(path)?;
    config.expand_env_vars()?;
    Ok(config)
}
