//! # Dextreme Domain Types
//!
//! Normalized, venue-independent representation of Cardano DEX liquidity.
//!
//! ## Design Philosophy
//!
//! - **Units, not names**: assets are keyed by `policy id ++ hex asset name`
//! - **Decimal-correct**: every [`Asset`] carries its precision, fixed at construction
//! - **Raw reserves**: pool reserves stay arbitrary-precision integers in the smallest unit
//! - **Venue-blind**: adapters erase payload shape differences before values reach callers
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{decode_token_name, Asset};
//!
//! let name = decode_token_name("MIN");
//! let min = Asset::new("29d222ce763455e3d7a09a665ce554f00ac89d2e99a1a83d267170c6", name, 6);
//!
//! assert_eq!(min.asset_name(), "4d494e");
//! assert!(Asset::lovelace().is_lovelace());
//! ```

pub mod asset;
pub mod dex;
pub mod errors;
pub mod ohlcv;
pub mod pool;
pub mod token_name;

pub use asset::{is_native_unit, Asset, LOVELACE, LOVELACE_DECIMALS, POLICY_ID_HEX_LEN};
pub use dex::DexType;
pub use errors::TypesError;
pub use num_bigint::BigUint;
pub use ohlcv::{chart_from, Ohlcv};
pub use pool::LiquidityPool;
pub use token_name::{decode_token_name, HEX_MARKER};
