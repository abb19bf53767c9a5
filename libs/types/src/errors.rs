//! Error types for asset identifier parsing

use thiserror::Error;

/// Errors raised while building domain values from untrusted identifiers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// Unit string is neither the native currency nor `policy ++ name`
    #[error("Invalid asset unit '{unit}': {reason}")]
    InvalidUnit {
        /// The offending unit
        unit: String,
        /// What was wrong with it
        reason: String,
    },

    /// Value that must be hex-encoded is not
    #[error("Invalid hex in {field}: '{value}'")]
    InvalidHex {
        /// Which component failed (policy id, asset name)
        field: &'static str,
        /// The raw value
        value: String,
    },
}
