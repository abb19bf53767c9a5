//! Normalized liquidity pools

use num_bigint::BigUint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::dex::DexType;

/// A constant-product pool as reported by a venue, with decimal-correct assets
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LiquidityPool {
    pub dex: DexType,
    pub asset_a: Asset,
    pub asset_b: Asset,
    /// Raw on-chain reserve of `asset_a` (smallest unit)
    #[cfg_attr(feature = "serde", serde(with = "decimal_string"))]
    pub reserve_a: BigUint,
    /// Raw on-chain reserve of `asset_b` (smallest unit)
    #[cfg_attr(feature = "serde", serde(with = "decimal_string"))]
    pub reserve_b: BigUint,
    pub pool_address: String,
    pub market_order_address: String,
    pub limit_order_address: String,
    pub lp_token: Asset,
    /// Total swap fee as a fraction (0.003 = 0.3%)
    pub fee_percent: f64,
    /// Public pool identifier, derived from the LP token unit
    pub identifier: String,
}

impl LiquidityPool {
    /// Build a pool; the identifier is taken from the LP token
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dex: DexType,
        asset_a: Asset,
        asset_b: Asset,
        reserve_a: BigUint,
        reserve_b: BigUint,
        pool_address: impl Into<String>,
        market_order_address: impl Into<String>,
        limit_order_address: impl Into<String>,
        lp_token: Asset,
        fee_percent: f64,
    ) -> Self {
        let identifier = lp_token.identifier();
        Self {
            dex,
            asset_a,
            asset_b,
            reserve_a,
            reserve_b,
            pool_address: pool_address.into(),
            market_order_address: market_order_address.into(),
            limit_order_address: limit_order_address.into(),
            lp_token,
            fee_percent,
            identifier,
        }
    }

    /// Both reserves are strictly positive
    pub fn has_liquidity(&self) -> bool {
        self.reserve_a.bits() > 0 && self.reserve_b.bits() > 0
    }

    /// `A/B` label of the pooled units
    pub fn pair(&self) -> String {
        format!("{}/{}", self.asset_a.identifier(), self.asset_b.identifier())
    }
}

/// Reserves travel as base-10 strings; JSON numbers cannot hold them losslessly
#[cfg(feature = "serde")]
mod decimal_string {
    use num_bigint::BigUint;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(reserve_a: u64, reserve_b: u64) -> LiquidityPool {
        LiquidityPool::new(
            DexType::VyFinance,
            Asset::lovelace(),
            Asset::new("aa".repeat(28), "4d494e", 6),
            BigUint::from(reserve_a),
            BigUint::from(reserve_b),
            "addr1pool",
            "addr1order",
            "addr1order",
            Asset::new("bb".repeat(28), "6c70", 0),
            0.003,
        )
    }

    #[test]
    fn test_identifier_follows_lp_token() {
        let pool = pool(10, 20);
        assert_eq!(pool.identifier, format!("{}6c70", "bb".repeat(28)));
        assert_eq!(pool.identifier, pool.lp_token.identifier());
    }

    #[test]
    fn test_has_liquidity_requires_both_reserves() {
        assert!(pool(1, 1).has_liquidity());
        assert!(!pool(0, 500).has_liquidity());
        assert!(!pool(500, 0).has_liquidity());
        assert!(!pool(0, 0).has_liquidity());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_reserves_serialize_as_decimal_strings() {
        let mut pool = pool(1_000_000, 7);
        pool.reserve_b = BigUint::from(1u8) << 100u32;

        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(json["reserve_a"], "1000000");
        assert_eq!(json["reserve_b"], "1267650600228229401496703205376");

        let back: LiquidityPool = serde_json::from_value(json).unwrap();
        assert_eq!(back, pool);
    }

    #[test]
    fn test_pair_label() {
        assert_eq!(pool(1, 1).pair(), format!("lovelace/{}4d494e", "aa".repeat(28)));
    }
}
