//! Error types used throughout the client

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::parse_leading_int;

/// Main error type for QBase
///
/// Every public call resolves to exactly one of these on failure. None of
/// them is retried by the client.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum QuickBaseError {
    /// A request parameter could not be encoded. Raised before any network
    /// activity.
    #[error("Unknown data type for [{param}]: {found}")]
    InvalidParameterType { param: String, found: String },

    /// The transport failed or answered with a non-success HTTP status.
    #[error("Transport error: {message}")]
    Transport { status: Option<u16>, message: String },

    /// A structured action received a body that is not well-formed XML.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The API reported a non-zero `errcode` inside a successful response.
    #[error("QuickBase Error {code}: {message}")]
    Api { code: ErrorCode, message: String, detail: Option<String> },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of [`QuickBaseError`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request could not be built
    Construction,
    /// Network, DNS, HTTP status or unreadable body
    Transport,
    /// Error code embedded in the API response
    Api,
    /// Client configuration could not be loaded
    Config,
}

impl QuickBaseError {
    /// Build an API error from the raw `errcode` / `errtext` values.
    pub fn api(code: &str, message: impl Into<String>) -> Self {
        Self::Api { code: ErrorCode::parse(code), message: message.into(), detail: None }
    }

    /// Build a transport error, optionally tagged with the HTTP status.
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport { status, message: message.into() }
    }

    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameterType { .. } => ErrorKind::Construction,
            Self::Transport { .. } | Self::MalformedResponse(_) => ErrorKind::Transport,
            Self::Api { .. } => ErrorKind::Api,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// API error code, when this is an API error.
    pub fn api_code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Construction => "construction",
            ErrorKind::Transport => "transport",
            ErrorKind::Api => "api",
            ErrorKind::Config => "config",
        }
    }
}

/// Error code carried by an API error
///
/// QuickBase codes are integers, but the raw text is kept when the response
/// carries something that does not start with one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Numeric(i64),
    Raw(String),
}

impl ErrorCode {
    /// Parse an `errcode` value.
    ///
    /// Leading whitespace and an optional sign are accepted, then the longest
    /// run of ASCII digits is read as a base-10 integer. Trailing text is
    /// ignored. Without any digits the raw text is kept.
    pub fn parse(text: &str) -> Self {
        parse_leading_int(text).map_or_else(|| Self::Raw(text.to_string()), Self::Numeric)
    }

    /// Numeric value of the code, if it has one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Numeric(value) => Some(*value),
            Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

/// Terminal handler that turns API errors into a panic.
///
/// Install it with `QuickBaseClient::with_error_handler` in scripts that want
/// fail-fast behaviour instead of handling every rejection. Errors of other
/// kinds are left to the caller.
#[allow(clippy::panic)]
pub fn generic_error_handler(err: &QuickBaseError) {
    if let QuickBaseError::Api { code, message, .. } = err {
        panic!("QuickBase Error {code}: {message}");
    }
}

/// Result type alias for QBase operations
pub type Result<T> = std::result::Result<T, QuickBaseError>;
