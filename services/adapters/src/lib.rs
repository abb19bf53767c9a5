//! # Dextreme Adapters - Cardano DEX Liquidity Normalization
//!
//! ## Purpose
//!
//! Turns heterogeneous DEX REST responses into one domain model
//! ([`types::LiquidityPool`], [`types::Asset`], [`types::Ohlcv`]) so that a
//! routing layer can compare liquidity across venues.
//!
//! ## Integration Points
//!
//! - **Token Registry**: process-wide decimals cache fed by Koios, a bundled
//!   snapshot and the curated verified-token document ([`TokenRegistry`])
//! - **Venue Adapters**: one [`VenueAdapter`] per DEX; VyFinance is
//!   implemented in [`vyfinance`]
//! - **Configuration**: [`aggregator_config::AggregatorConfig`]
//!
//! ## Failure Model
//!
//! Upstream failures never propagate out of the venue contract. They are
//! logged through `tracing` and surface as [`FetchOutcome::Unavailable`] or
//! in a registry [`RefreshReport`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use dex_adapters::{TokenRegistry, VenueAdapter, VyFinanceAdapter};
//! use aggregator_config::VenueConfig;
//!
//! # async fn run() -> dex_adapters::Result<()> {
//! let registry = TokenRegistry::shared();
//! registry.refresh().await;
//!
//! let vyfi = VyFinanceAdapter::new(VenueConfig::default(), registry)?;
//! for pool in vyfi.liquidity_pools(None, None).await.items() {
//!     println!("{} {} / {}", pool.identifier, pool.reserve_a, pool.reserve_b);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod outcome;
pub mod registry;
pub mod venue;
pub mod vyfinance;

pub use error::{AdapterError, Result};
pub use outcome::FetchOutcome;
pub use registry::{
    DecimalsSource, RefreshReport, RegistryEntry, TokenRegistry, VerifiedSource,
};
pub use venue::VenueAdapter;
pub use vyfinance::VyFinanceAdapter;
