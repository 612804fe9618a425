//! Client configuration structures
//!
//! Loaded by `qbase_infra::config` from the environment or a TOML/JSON file.
//! Every field has a default, so a partial file is valid.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_REALM, DEFAULT_TIMEOUT_SECS, ROOT_DBID};

/// Session defaults plus transport settings for one client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Realm subdomain (`acme`) or absolute base URL
    pub realm: String,
    /// Default database id for calls that do not name one
    pub dbid: String,
    /// Application token, empty when the application does not require one
    pub apptoken: String,
    /// Pre-acquired ticket, usually empty until `authenticate` runs
    pub ticket: String,
    pub http: HttpConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            realm: DEFAULT_REALM.to_string(),
            dbid: ROOT_DBID.to_string(),
            apptoken: String::new(),
            ticket: String::new(),
            http: HttpConfig::default(),
        }
    }
}

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_TIMEOUT_SECS, user_agent: None }
    }
}
