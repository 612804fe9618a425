//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file from the working directory, if present
//! 2. Attempts to load from environment variables
//! 3. If `QUICKBASE_REALM` is missing, falls back to loading from file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `QUICKBASE_REALM`: Realm subdomain or base URL (required)
//! - `QUICKBASE_DBID`: Default database id
//! - `QUICKBASE_APPTOKEN`: Application token
//! - `QUICKBASE_TICKET`: Pre-acquired authentication ticket
//! - `QUICKBASE_TIMEOUT_SECS`: HTTP timeout in seconds
//! - `QUICKBASE_USER_AGENT`: HTTP user agent
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./quickbase.json` or `./quickbase.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. `../quickbase.json` or `../quickbase.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use qbase_domain::{ClientConfig, HttpConfig, QuickBaseError, Result};

use crate::errors::InfraError;

pub const ENV_REALM: &str = "QUICKBASE_REALM";
pub const ENV_DBID: &str = "QUICKBASE_DBID";
pub const ENV_APPTOKEN: &str = "QUICKBASE_APPTOKEN";
pub const ENV_TICKET: &str = "QUICKBASE_TICKET";
pub const ENV_TIMEOUT_SECS: &str = "QUICKBASE_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "QUICKBASE_USER_AGENT";

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables (after reading `.env`).
/// If the realm is not set there, falls back to a config file.
///
/// # Errors
/// Returns `QuickBaseError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<ClientConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `QUICKBASE_REALM` is required; every other value falls back to the
/// session defaults.
///
/// # Errors
/// Returns `QuickBaseError::Config` if the realm is missing or the timeout
/// is not a number.
pub fn load_from_env() -> Result<ClientConfig> {
    let realm = env_var(ENV_REALM)?;
    let defaults = ClientConfig::default();

    let timeout_secs = match env_opt(ENV_TIMEOUT_SECS) {
        Some(raw) => raw.parse::<u64>().map_err(|e| {
            QuickBaseError::Config(format!("Invalid {ENV_TIMEOUT_SECS} value '{raw}': {e}"))
        })?,
        None => defaults.http.timeout_secs,
    };

    Ok(ClientConfig {
        realm,
        dbid: env_opt(ENV_DBID).unwrap_or(defaults.dbid),
        apptoken: env_opt(ENV_APPTOKEN).unwrap_or(defaults.apptoken),
        ticket: env_opt(ENV_TICKET).unwrap_or(defaults.ticket),
        http: HttpConfig { timeout_secs, user_agent: env_opt(ENV_USER_AGENT) },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `QuickBaseError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(QuickBaseError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            QuickBaseError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| QuickBaseError::from(InfraError::from(e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| QuickBaseError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| QuickBaseError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(QuickBaseError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent, then the directory
/// of the running executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 6] = [
        "quickbase.json",
        "quickbase.toml",
        "config.json",
        "config.toml",
        "../quickbase.json",
        "../quickbase.toml",
    ];

    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `QuickBaseError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        QuickBaseError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Optional environment variable, `None` when unset or blank.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
