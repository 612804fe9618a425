//! In-memory transport for tests
//!
//! [`MockTransport`] records every request it receives and replays queued
//! responses in order. With nothing queued it answers with an empty success
//! envelope.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use qbase_domain::Result;

use crate::ports::{Transport, TransportRequest, TransportResponse};

const EMPTY_SUCCESS: &str = "<qdbapi><errcode>0</errcode><errtext>No error</errtext></qdbapi>";

/// Recording transport with scripted responses
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<TransportResponse>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: TransportResponse) {
        self.responses.lock().push_back(Ok(response));
    }

    /// Queue a 200 response with `body`.
    pub fn push_body(&self, body: &str) {
        self.push_response(TransportResponse::ok(body));
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: qbase_domain::QuickBaseError) {
        self.responses.lock().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<TransportRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().push(request);
        self.responses.lock().pop_front().unwrap_or_else(|| Ok(TransportResponse::ok(EMPTY_SUCCESS)))
    }
}
