//! Token registry records

use serde::{de, Deserialize, Deserializer, Serialize};

/// One asset's registered metadata
///
/// Accepts the Koios wire shape (`policy_id`, `asset_name`, ...) as well as
/// camelCase snapshots (`policyId`, `assetName`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    #[serde(alias = "policyId")]
    pub policy_id: String,

    /// Hex-encoded on-chain asset name
    #[serde(alias = "assetName", default)]
    pub asset_name: String,

    /// Registered precision; absent or null means 0, numeric strings are accepted
    #[serde(default, deserialize_with = "decimals_or_zero")]
    pub decimals: u8,

    #[serde(default)]
    pub ticker: Option<String>,

    /// Human readable name
    #[serde(default, alias = "asset_name_ascii", alias = "assetNameAscii")]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    /// Base64-encoded PNG
    #[serde(default)]
    pub logo: Option<String>,
}

impl RegistryEntry {
    pub fn new(policy_id: impl Into<String>, asset_name: impl Into<String>, decimals: u8) -> Self {
        Self {
            policy_id: policy_id.into(),
            asset_name: asset_name.into(),
            decimals,
            ticker: None,
            name: None,
            description: None,
            url: None,
            logo: None,
        }
    }

    /// Registry key: policy id followed by asset name
    pub fn unit(&self) -> String {
        format!("{}{}", self.policy_id, self.asset_name)
    }
}

fn decimals_or_zero<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimals {
        Number(u8),
        Text(String),
    }

    match Option::<Decimals>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Decimals::Number(decimals)) => Ok(decimals),
        Some(Decimals::Text(raw)) => raw.trim().parse().map_err(de::Error::custom),
    }
}
