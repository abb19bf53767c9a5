//! Explicit outcome of a venue query
//!
//! Venue operations never fail from the caller's point of view, but "no
//! data" and "upstream unavailable" are different facts. [`FetchOutcome`]
//! keeps them apart so callers and tests do not need to read logs.

use crate::error::AdapterError;

/// Result of one venue query
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// Upstream answered; the list may legitimately be empty
    Fetched(Vec<T>),
    /// Upstream failed; callers should treat this as an empty result
    Unavailable(AdapterError),
}

impl<T> FetchOutcome<T> {
    /// Items returned by upstream, empty when unavailable
    pub fn items(&self) -> &[T] {
        match self {
            FetchOutcome::Fetched(items) => items,
            FetchOutcome::Unavailable(_) => &[],
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            FetchOutcome::Fetched(items) => items,
            FetchOutcome::Unavailable(_) => Vec::new(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, FetchOutcome::Unavailable(_))
    }

    /// Failure that made upstream unavailable
    pub fn error(&self) -> Option<&AdapterError> {
        match self {
            FetchOutcome::Fetched(_) => None,
            FetchOutcome::Unavailable(err) => Some(err),
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Transform the fetched list, preserving unavailability
    pub fn map_items<U, F>(self, f: F) -> FetchOutcome<U>
    where
        F: FnOnce(Vec<T>) -> Vec<U>,
    {
        match self {
            FetchOutcome::Fetched(items) => FetchOutcome::Fetched(f(items)),
            FetchOutcome::Unavailable(err) => FetchOutcome::Unavailable(err),
        }
    }
}

impl<T> From<crate::Result<Vec<T>>> for FetchOutcome<T> {
    fn from(result: crate::Result<Vec<T>>) -> Self {
        match result {
            Ok(items) => FetchOutcome::Fetched(items),
            Err(err) => FetchOutcome::Unavailable(err),
        }
    }
}
