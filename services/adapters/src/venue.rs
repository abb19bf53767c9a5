//! Venue adapter contract
//!
//! One implementation per DEX. Every operation degrades to an empty result on
//! failure; [`FetchOutcome`] records whether upstream actually answered.

use async_trait::async_trait;
use std::collections::HashMap;
use types::{Asset, DexType, LiquidityPool, Ohlcv};

use crate::outcome::FetchOutcome;

#[async_trait]
pub trait VenueAdapter: Send + Sync {
    /// Venue this adapter talks to
    fn dex(&self) -> DexType;

    /// Pools for a pair, or the global listing when either asset is `None`
    ///
    /// Every returned pool has two strictly positive reserves.
    async fn liquidity_pools(
        &self,
        asset_a: Option<&Asset>,
        asset_b: Option<&Asset>,
    ) -> FetchOutcome<LiquidityPool>;

    /// Distinct non-native assets traded on the venue
    async fn tokens(&self, verified_only: bool) -> FetchOutcome<Asset>;

    /// Candles for a pair, ascending, none older than `time_from_ms`
    async fn price_chart(
        &self,
        asset_a: &Asset,
        asset_b: &Asset,
        time_from_ms: i64,
    ) -> FetchOutcome<Ohlcv>;

    /// Every pool of the global listing keyed by identifier
    async fn liquidity_pool_map(&self) -> HashMap<String, LiquidityPool> {
        self.liquidity_pools(None, None)
            .await
            .into_items()
            .into_iter()
            .map(|pool| (pool.identifier.clone(), pool))
            .collect()
    }
}
