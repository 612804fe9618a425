use std::time::Duration;

use qbase_domain::constants::{CLIENT_VERSION, DEFAULT_TIMEOUT_SECS};
use qbase_domain::{HttpConfig, QuickBaseError};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with timeout support.
///
/// Sends each request exactly once. Failed requests are reported to the
/// caller and never retried.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, QuickBaseError> {
        Self::builder().build()
    }

    /// Build a client from the `http` section of the client configuration.
    pub fn from_config(config: &HttpConfig) -> Result<Self, QuickBaseError> {
        let mut builder = Self::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder once.
    ///
    /// Any HTTP status is returned as a response; only failures to produce
    /// one become errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, QuickBaseError> {
        let request = builder.build().map_err(|err| QuickBaseError::from(InfraError::from(err)))?;

        // The query string carries the ticket, so only host and path are logged.
        let method = request.method().clone();
        let host = request.url().host_str().unwrap_or_default().to_string();
        let path = request.url().path().to_string();
        debug!(%method, %host, %path, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %host, %path, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %host, %path, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, QuickBaseError> {
        let agent = self.user_agent.unwrap_or_else(|| format!("qbase/{CLIENT_VERSION}"));
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(agent)
            .no_proxy()
            .build()
            .map_err(|err| QuickBaseError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
