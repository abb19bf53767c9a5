//! Fungible on-chain asset units
//!
//! An [`Asset`] is identified by its *unit*: the minting policy id followed by
//! the hex-encoded on-chain asset name. The chain's native currency has an
//! empty policy id and the well-known name `lovelace`.

use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::TypesError;

/// Name of the native currency unit
pub const LOVELACE: &str = "lovelace";

/// Decimal precision of the native currency (1 ADA = 10^6 lovelace)
pub const LOVELACE_DECIMALS: u8 = 6;

/// Length of a hex-encoded minting policy id (28 bytes)
pub const POLICY_ID_HEX_LEN: usize = 56;

/// Maximum on-chain asset name length in bytes
pub const MAX_ASSET_NAME_BYTES: usize = 32;

/// A fungible asset with its decimal precision
///
/// Decimals are fixed at construction. Two assets compare equal when their
/// identifiers match, regardless of the decimals they were built with.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Asset {
    policy_id: String,
    asset_name: String,
    decimals: u8,
}

impl Asset {
    pub fn new(policy_id: impl Into<String>, asset_name: impl Into<String>, decimals: u8) -> Self {
        Self {
            policy_id: policy_id.into(),
            asset_name: asset_name.into(),
            decimals,
        }
    }

    /// The chain's native currency
    pub fn lovelace() -> Self {
        Self::new("", LOVELACE, LOVELACE_DECIMALS)
    }

    /// Parse a unit string (`lovelace`, or policy id followed by hex name)
    pub fn from_unit(unit: &str, decimals: u8) -> Result<Self, TypesError> {
        let unit = unit.trim();
        if unit.is_empty() || is_native_unit(unit) {
            return Ok(Self::lovelace());
        }

        if unit.len() < POLICY_ID_HEX_LEN {
            return Err(TypesError::InvalidUnit {
                unit: unit.to_string(),
                reason: format!("expected at least {} hex characters", POLICY_ID_HEX_LEN),
            });
        }

        let (policy_id, asset_name) = unit.split_at(POLICY_ID_HEX_LEN);
        if hex::decode(policy_id).is_err() {
            return Err(TypesError::InvalidHex {
                field: "policy_id",
                value: policy_id.to_string(),
            });
        }

        match hex::decode(asset_name) {
            Ok(bytes) if bytes.len() <= MAX_ASSET_NAME_BYTES => {}
            Ok(bytes) => {
                return Err(TypesError::InvalidUnit {
                    unit: unit.to_string(),
                    reason: format!("asset name is {} bytes", bytes.len()),
                })
            }
            Err(_) => {
                return Err(TypesError::InvalidHex {
                    field: "asset_name",
                    value: asset_name.to_string(),
                })
            }
        }

        Ok(Self::new(
            policy_id.to_ascii_lowercase(),
            asset_name.to_ascii_lowercase(),
            decimals,
        ))
    }

    pub fn policy_id(&self) -> &str {
        &self.policy_id
    }

    /// Hex-encoded on-chain asset name
    pub fn asset_name(&self) -> &str {
        &self.asset_name
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Canonical unit: policy id immediately followed by the asset name
    pub fn identifier(&self) -> String {
        self.identifier_with("")
    }

    /// Unit with a delimiter between policy id and asset name
    ///
    /// The native currency has no policy and yields its bare name.
    pub fn identifier_with(&self, delimiter: &str) -> String {
        if self.policy_id.is_empty() {
            return self.asset_name.clone();
        }
        format!("{}{}{}", self.policy_id, delimiter, self.asset_name)
    }

    pub fn is_lovelace(&self) -> bool {
        self.policy_id.is_empty() && is_native_unit(&self.asset_name)
    }

    /// Human readable asset name, lossy when the name is not UTF-8
    pub fn asset_name_utf8(&self) -> String {
        match hex::decode(&self.asset_name) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => self.asset_name.clone(),
        }
    }
}

/// Whether a unit names the native currency
pub fn is_native_unit(unit: &str) -> bool {
    unit.eq_ignore_ascii_case(LOVELACE)
        || unit.eq_ignore_ascii_case("ada")
        || unit.eq_ignore_ascii_case("cardano")
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.policy_id == other.policy_id && self.asset_name == other.asset_name
    }
}

impl Eq for Asset {}

impl Hash for Asset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.policy_id.hash(state);
        self.asset_name.hash(state);
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier_with("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const MIN_POLICY: &str = "29d222ce763455e3d7a09a665ce554f00ac89d2e99a1a83d267170c6";

    #[test]
    fn test_identifier_concatenates_policy_and_name() {
        let min = Asset::new(MIN_POLICY, "4d494e", 6);
        assert_eq!(min.identifier(), format!("{}4d494e", MIN_POLICY));
        assert_eq!(min.identifier_with("."), format!("{}.4d494e", MIN_POLICY));
    }

    #[test]
    fn test_lovelace_identity() {
        let ada = Asset::lovelace();
        assert!(ada.is_lovelace());
        assert_eq!(ada.identifier(), LOVELACE);
        assert_eq!(ada.decimals(), 6);
        assert!(!Asset::new(MIN_POLICY, "4d494e", 6).is_lovelace());
    }

    #[test]
    fn test_equality_ignores_decimals() {
        let a = Asset::new(MIN_POLICY, "4d494e", 6);
        let b = Asset::new(MIN_POLICY, "4d494e", 0);
        assert_eq!(a, b);

        let set: HashSet<Asset> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_unit() {
        let unit = format!("{}4d494e", MIN_POLICY);
        let asset = Asset::from_unit(&unit, 6).unwrap();
        assert_eq!(asset.policy_id(), MIN_POLICY);
        assert_eq!(asset.asset_name(), "4d494e");
        assert_eq!(asset.asset_name_utf8(), "MIN");

        assert!(Asset::from_unit("lovelace", 0).unwrap().is_lovelace());
        assert_eq!(Asset::from_unit("ADA", 0).unwrap().decimals(), 6);
    }

    #[test]
    fn test_from_unit_rejects_malformed() {
        assert!(matches!(
            Asset::from_unit("deadbeef", 0),
            Err(TypesError::InvalidUnit { .. })
        ));

        let bad_name = format!("{}4d4", MIN_POLICY);
        assert!(matches!(
            Asset::from_unit(&bad_name, 0),
            Err(TypesError::InvalidHex { field: "asset_name", .. })
        ));
    }
}
