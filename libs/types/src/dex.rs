//! Venue identifiers

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decentralized exchanges whose liquidity can be normalized into this model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DexType {
    Minswap,
    SundaeSwap,
    WingRiders,
    MuesliSwap,
    Spectrum,
    TeddySwap,
    VyFinance,
}

impl DexType {
    /// Venue name as reported in pool records and logs
    pub fn name(&self) -> &'static str {
        match self {
            DexType::Minswap => "Minswap",
            DexType::SundaeSwap => "SundaeSwap",
            DexType::WingRiders => "WingRiders",
            DexType::MuesliSwap => "MuesliSwap",
            DexType::Spectrum => "Spectrum",
            DexType::TeddySwap => "TeddySwap",
            DexType::VyFinance => "VyFinance",
        }
    }
}

impl fmt::Display for DexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
