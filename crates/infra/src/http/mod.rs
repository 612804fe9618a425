//! HTTP transport for the QuickBase API

pub mod client;
pub mod transport;

pub use client::{HttpClient, HttpClientBuilder};
pub use transport::HttpTransport;
