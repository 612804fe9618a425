//! reqwest adapter for the core [`Transport`] port

use async_trait::async_trait;
use qbase_core::{HttpMethod, Transport, TransportRequest, TransportResponse, WirePayload};
use qbase_domain::{HttpConfig, QuickBaseError, Result};
use reqwest::Method;

use super::client::HttpClient;
use crate::errors::InfraError;

/// Sends encoded QuickBase requests over HTTP
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Build a transport from the `http` section of the client configuration.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the underlying client cannot be built.
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        HttpClient::from_config(config).map(Self::new)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut builder = self.http.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.payload {
            WirePayload::Xml(body) => builder.body(body),
            WirePayload::Query(pairs) => builder.query(&pairs),
        };

        let response = self.http.send(builder).await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| QuickBaseError::from(InfraError::from(err)))?;

        Ok(TransportResponse { status, body })
    }
}
