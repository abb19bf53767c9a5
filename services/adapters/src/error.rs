//! Error types for the adapters module

use std::path::PathBuf;
use thiserror::Error;
use types::DexType;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Main error type for registry and venue operations
///
/// Never escapes the venue contract: adapters fold it into
/// [`crate::FetchOutcome::Unavailable`], the registry into its refresh report.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a status we do not handle
    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        /// Requested URL
        url: String,
        /// Status code returned
        status: u16,
    },

    /// Response body was not the JSON we expected
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error reading local files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A single venue record could not be normalized
    #[error("Invalid {venue} record: {reason}")]
    InvalidRecord {
        /// Venue that produced the record
        venue: DexType,
        /// What was wrong with it
        reason: String,
    },

    /// Fallback snapshot could not be loaded
    #[error("Failed to load registry snapshot {}: {reason}", path_label(.path))]
    Snapshot {
        /// File path, `None` for the bundled snapshot
        path: Option<PathBuf>,
        /// Underlying error message
        reason: String,
    },

    /// Pagination did not terminate within the configured page budget
    #[error("Pagination exceeded {max_pages} pages at {url}")]
    PaginationOverflow {
        /// Listing URL
        url: String,
        /// Configured cap
        max_pages: usize,
    },

    /// Configuration error in adapter settings
    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn path_label(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<bundled>".to_string(),
    }
}

impl AdapterError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            AdapterError::UnexpectedStatus { status, .. } => Some(*status),
            AdapterError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
