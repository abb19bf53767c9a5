//! Shared HTTP client construction

use aggregator_config::service::adapters::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

use crate::error::{AdapterError, Result};

/// Build a JSON-speaking client with a request timeout
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| AdapterError::Configuration(format!("Failed to create HTTP client: {}", e)))
}
