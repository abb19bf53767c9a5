//! # Dextreme Centralized Configuration
//!
//! Endpoints, defaults and layered configuration loading shared by the
//! token registry and the venue adapters.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use aggregator_config::{endpoints, load_config};
//!
//! let config = load_config(None).unwrap();
//! assert_eq!(config.registry.page_size, endpoints::REGISTRY_PAGE_SIZE);
//! ```

pub mod endpoints;
pub mod service;
pub mod service_config;

// Re-export commonly used types
pub use service_config::{
    load_config, AggregatorConfig, LoggingConfig, RegistryConfig, VenueConfig, ENV_PREFIX,
};
