//! VyFinance wire records and lenient field parsing

use num_bigint::BigUint;
use serde::Deserialize;
use serde_json::Value;
use types::decode_token_name;

/// One element of the `/lp` listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PoolRecord {
    /// Embedded JSON document, see [`PoolDetails`]
    pub json: String,
    #[serde(default)]
    pub token_a_quantity: Option<Value>,
    #[serde(default)]
    pub token_b_quantity: Option<Value>,
    #[serde(rename = "lpPolicyId-assetId", default)]
    pub lp_policy_asset: String,
    #[serde(default)]
    pub pool_validator_utxo_address: String,
    #[serde(default)]
    pub order_validator_utxo_address: String,
}

/// Content of [`PoolRecord::json`]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PoolDetails {
    pub a_asset: AssetRef,
    pub b_asset: AssetRef,
    #[serde(default)]
    pub fees_settings: FeesSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssetRef {
    #[serde(default)]
    pub currency_symbol: String,
    #[serde(default)]
    pub token_name: String,
}

impl AssetRef {
    /// Blank currency symbol marks the native currency
    pub fn is_native(&self) -> bool {
        self.currency_symbol.trim().is_empty()
    }

    /// Hex asset name after token-name decoding
    pub fn asset_name(&self) -> String {
        decode_token_name(&self.token_name)
    }
}

/// Fee components, in basis points
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeesSettings {
    #[serde(default)]
    pub bar_fee: Option<Value>,
    #[serde(default)]
    pub liq_fee: Option<Value>,
}

impl FeesSettings {
    /// Total fee as a percentage
    pub fn fee_percent(&self) -> f64 {
        let bar = self.bar_fee.as_ref().and_then(parse_f64).unwrap_or(0.0);
        let liq = self.liq_fee.as_ref().and_then(parse_f64).unwrap_or(0.0);
        (bar + liq) / 100.0
    }
}

/// One element of the `/lp/ohlcv` listing
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CandleRecord {
    #[serde(default)]
    pub open: Option<Value>,
    #[serde(default)]
    pub high: Option<Value>,
    #[serde(default)]
    pub low: Option<Value>,
    #[serde(default)]
    pub close: Option<Value>,
    #[serde(default)]
    pub volume: Option<Value>,
    /// Seconds since the Unix epoch
    #[serde(default)]
    pub time: Option<Value>,
}

/// Reserve pair as reported by a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Reserves {
    /// Both present and strictly positive
    Liquid(BigUint, BigUint),
    /// Both zero
    Empty,
    /// Blank or missing, or exactly one side zero
    Incomplete,
    /// Present but not a non-negative integer
    Malformed,
}

enum Quantity {
    Blank,
    Invalid,
    Amount(BigUint),
}

fn quantity(value: Option<&Value>) -> Quantity {
    match value {
        None | Some(Value::Null) => Quantity::Blank,
        Some(Value::String(s)) if s.trim().is_empty() => Quantity::Blank,
        Some(value) => parse_quantity(value).map_or(Quantity::Invalid, Quantity::Amount),
    }
}

impl Reserves {
    pub fn classify(a: Option<&Value>, b: Option<&Value>) -> Self {
        match (quantity(a), quantity(b)) {
            (Quantity::Invalid, _) | (_, Quantity::Invalid) => Reserves::Malformed,
            (Quantity::Amount(a), Quantity::Amount(b)) => match (a.bits() > 0, b.bits() > 0) {
                (true, true) => Reserves::Liquid(a, b),
                (false, false) => Reserves::Empty,
                _ => Reserves::Incomplete,
            },
            _ => Reserves::Incomplete,
        }
    }
}

/// Non-negative integer quantity from a JSON string or number
pub(crate) fn parse_quantity(value: &Value) -> Option<BigUint> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse().ok()
        }
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}

/// Float from a JSON number or numeric string
pub(crate) fn parse_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whole seconds from a JSON number or numeric string
pub(crate) fn parse_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}
