//! Transport port
//!
//! The engine never opens sockets itself. Infrastructure adapters implement
//! [`Transport`]; `qbase-infra` provides the reqwest-based one.

use async_trait::async_trait;
use qbase_domain::Result;

use crate::registry::HttpMethod;
use crate::wire::WirePayload;

/// Encoded request handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    /// `{realm}/db/{dbid}`
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub payload: WirePayload,
}

impl TransportRequest {
    /// Value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// XML body of a POST request.
    pub fn body(&self) -> Option<&str> {
        match &self.payload {
            WirePayload::Xml(body) => Some(body),
            WirePayload::Query(_) => None,
        }
    }

    /// Query pairs of a GET request.
    pub fn query(&self) -> &[(String, String)] {
        match &self.payload {
            WirePayload::Query(pairs) => pairs,
            WirePayload::Xml(_) => &[],
        }
    }
}

/// Raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues one HTTP request per call
///
/// Implementations must not retry. Network and protocol failures map to
/// `QuickBaseError::Transport`; any HTTP status is returned as a response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}
