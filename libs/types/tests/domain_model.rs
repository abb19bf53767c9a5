//! Domain model behaviour across modules

use std::collections::HashMap;
use types::{chart_from, decode_token_name, Asset, BigUint, DexType, LiquidityPool, Ohlcv};

const HOSKY_POLICY: &str = "a0028f350aaabe0545fdcb56b039bfb08e4bb4d8c4d7c3c7d481c235";

fn hosky_pool(reserve_a: u64, reserve_b: u64) -> LiquidityPool {
    LiquidityPool::new(
        DexType::VyFinance,
        Asset::lovelace(),
        Asset::new(HOSKY_POLICY, decode_token_name("HOSKY"), 0),
        BigUint::from(reserve_a),
        BigUint::from(reserve_b),
        "addr1wpool",
        "addr1worder",
        "addr1worder",
        Asset::new("cc".repeat(28), "6c70", 0),
        0.0035,
    )
}

#[test]
fn test_unit_built_from_decoded_name_matches_parsed_unit() {
    let from_name = Asset::new(HOSKY_POLICY, decode_token_name("HOSKY"), 0);
    let parsed = Asset::from_unit(&format!("{}484f534b59", HOSKY_POLICY), 0).unwrap();
    assert_eq!(from_name, parsed);
    assert_eq!(parsed.asset_name_utf8(), "HOSKY");
}

#[test]
fn test_pools_keyed_by_identifier() {
    let pools = vec![hosky_pool(1_000, 2_000), hosky_pool(0, 0)];
    let map: HashMap<String, LiquidityPool> = pools
        .into_iter()
        .filter(LiquidityPool::has_liquidity)
        .map(|pool| (pool.identifier.clone(), pool))
        .collect();

    assert_eq!(map.len(), 1);
    let pool = map.values().next().unwrap();
    assert_eq!(pool.reserve_a, BigUint::from(1_000u32));
    assert_eq!(pool.dex.to_string(), "VyFinance");
}

#[test]
fn test_pool_serializes_reserves_and_assets() {
    let json = serde_json::to_value(hosky_pool(5, 7)).unwrap();
    assert_eq!(json["dex"], "VyFinance");
    assert_eq!(json["asset_a"]["asset_name"], "lovelace");
    assert_eq!(json["asset_b"]["decimals"], 0);
    assert_eq!(json["reserve_a"], "5");
    assert_eq!(json["reserve_b"], "7");
}

#[test]
fn test_chart_from_keeps_boundary_candle() {
    let candles = vec![
        Ohlcv::new(1.0, 1.0, 1.0, 1.0, 0.0, 7_200_000),
        Ohlcv::new(1.0, 1.0, 1.0, 1.0, 0.0, 3_600_000),
        Ohlcv::new(1.0, 1.0, 1.0, 1.0, 0.0, 0),
    ];
    let chart = chart_from(candles, 3_600_000);
    assert_eq!(chart.len(), 2);
    assert_eq!(chart[0].time, 3_600_000);
}
