//! # QBase Infrastructure
//!
//! Infrastructure implementations of the `qbase-core` ports.
//!
//! This crate contains:
//! - The reqwest-based HTTP transport
//! - Configuration loading from environment variables and files
//! - Conversions from reqwest and I/O errors into `QuickBaseError`
//!
//! ## Architecture
//! - Implements traits defined in `qbase-core`
//! - Contains all "impure" code (network and file I/O)

pub mod config;
pub mod errors;
pub mod http;

use std::sync::Arc;

use qbase_core::QuickBaseClient;
use qbase_domain::{ClientConfig, Result};

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, HttpTransport};

/// Build a client over HTTP from an explicit configuration.
///
/// # Errors
///
/// Returns a transport error when the HTTP client cannot be built.
pub fn connect(config: &ClientConfig) -> Result<QuickBaseClient> {
    let transport = HttpTransport::from_config(&config.http)?;
    tracing::debug!(realm = %config.realm, dbid = %config.dbid, "QuickBase client ready");
    Ok(QuickBaseClient::from_config(Arc::new(transport), config))
}

/// Load configuration with [`config::load`] and build a client from it.
///
/// # Errors
///
/// Returns a config error when no configuration can be loaded, or a
/// transport error when the HTTP client cannot be built.
pub fn connect_from_env() -> Result<QuickBaseClient> {
    connect(&config::load()?)
}
