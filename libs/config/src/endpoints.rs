//! Upstream endpoints and wire-level constants
//!
//! Everything here describes third-party services; nothing is tunable at
//! runtime except through [`crate::AggregatorConfig`].

/// Koios mainnet REST API root
pub const KOIOS_MAINNET_URL: &str = "https://api.koios.rest/api/v1";

/// Paginated token-registry listing on Koios
pub const KOIOS_TOKEN_REGISTRY_URL: &str = "https://api.koios.rest/api/v1/asset_token_registry";

/// Curated verified-token document; its top-level keys are policy ids
pub const VERIFIED_TOKENS_URL: &str =
    "https://raw.githubusercontent.com/minswap/verified-tokens/main/tokens.json";

/// Registry pagination page size (Koios caps responses at 1000 rows)
pub const REGISTRY_PAGE_SIZE: usize = 1000;

/// Explicit row order so pages stay stable between requests
pub const REGISTRY_ORDER: &str = "policy_id.asc,asset_name.asc";

/// VyFinance venue endpoints
pub mod vyfinance {
    /// REST API root
    pub const BASE_URL: &str = "https://api.vyfi.io";

    /// Pool listing path
    pub const POOLS_PATH: &str = "/lp";

    /// OHLCV history path
    pub const OHLCV_PATH: &str = "/lp/ohlcv";

    /// Cardano mainnet network id
    pub const MAINNET_NETWORK_ID: u8 = 1;

    /// Candle aggregation interval
    pub const DEFAULT_INTERVAL: &str = "1h";
}
