//! Service defaults
//!
//! Default values shared by the registry and the venue adapters.

/// Token registry defaults
pub mod registry {
    /// Safety cap on pagination (1000 pages = 1M registry rows)
    pub const MAX_PAGES: usize = 1_000;

    /// Decimals reported for units missing from the registry
    pub const DEFAULT_DECIMALS: u8 = 0;

    /// HTTP request timeout (milliseconds)
    pub const REQUEST_TIMEOUT_MS: u64 = 30_000;
}

/// Venue adapter defaults
pub mod adapters {
    /// Pause before the single retry after an HTTP 502 (milliseconds)
    pub const RETRY_DELAY_MS: u64 = 1_000;

    /// HTTP request timeout (milliseconds)
    pub const REQUEST_TIMEOUT_MS: u64 = 15_000;

    /// User agent sent to upstream APIs
    pub const USER_AGENT: &str = concat!("dextreme/", env!("CARGO_PKG_VERSION"));
}
