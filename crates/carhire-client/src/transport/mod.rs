//! HTTP transport layer
//!
//! The executor hands fully built requests to an [`HttpTransport`] and
//! gets raw bytes back. Two adapters are provided:
//! - [`ReqwestTransport`] for real network access
//! - [`MockTransport`] with canned responses for testing
//!
//! # Example
//!
//! ```ignore
//! use carhire_client::transport::create_transport;
//! use carhire_client::ClientConfig;
//!
//! let config = ClientConfig::builder().request_timeout_ms(5_000).build();
//! let transport = create_transport(&config)?;
//! let response = transport.send(request).await?;
//! ```

mod http;
pub mod mock;

pub use http::ReqwestTransport;
pub use mock::MockTransport;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;
use crate::encoding::Headers;
use crate::request::HttpMethod;

/// A request ready to go on the wire
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Headers,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Header value by name, ignoring case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Decoded query parameters in order
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url.query_pairs().into_owned().collect()
    }

    /// First decoded query parameter with this name
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Body parsed as JSON
    pub fn body_json(&self) -> Option<Value> {
        self.body
            .as_ref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }
}

/// What came back from the server
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network level failures
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("The request timed out")]
    Timeout,

    #[error("Could not connect to the server: {0}")]
    Connection(String),

    #[error("{0}")]
    Other(String),
}

/// Sends one HTTP request and returns the raw response
///
/// Implementations must not retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Create the network transport described by the configuration
pub fn create_transport(config: &ClientConfig) -> Result<Arc<dyn HttpTransport>, reqwest::Error> {
    let transport =
        ReqwestTransport::with_timeouts(config.request_timeout(), config.connect_timeout())?;
    Ok(Arc::new(transport))
}
