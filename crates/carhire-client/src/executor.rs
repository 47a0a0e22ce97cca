//! Request executor
//!
//! Turns a [`RequestDescriptor`] into exactly one HTTP call:
//! 1. readiness gate (only the bootstrap request may run before Ready)
//! 2. endpoint URL plus suffix, made URL safe
//! 3. parameters encoded into the query or body
//! 4. Authorization header from the session
//! 5. one transport call, never retried
//! 6. JSON parse and the descriptor's decoder

use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::encoding::{encode_url, has_header, ParameterEncoder};
use crate::error::{CarHireError, Result, REQUEST_FAILED};
use crate::request::RequestDescriptor;
use crate::session::{ClientStatus, SessionSnapshot, SessionState};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

const AUTHORIZATION: &str = "Authorization";

/// Runs request descriptors against a transport
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionState>,
}

impl RequestExecutor {
    pub(crate) fn new(transport: Arc<dyn HttpTransport>, session: Arc<SessionState>) -> Self {
        Self { transport, session }
    }

    /// Perform the request and decode its response
    #[instrument(skip(self, descriptor), fields(endpoint = ?descriptor.endpoint()))]
    pub async fn execute<T>(&self, descriptor: RequestDescriptor<T>) -> Result<T> {
        let session = self.session.snapshot();

        if session.status != ClientStatus::Ready && !descriptor.endpoint().is_bootstrap() {
            debug!(status = ?session.status, "Client not ready, request not sent");
            return Err(CarHireError::NotReady);
        }

        let request = build_request(&descriptor, &session)?;
        debug!(method = %request.method, url = %request.url, "Sending request");

        let body = parse_body(self.transport.send(request).await)?;
        descriptor.decode(body)
    }
}

/// Build the wire request for a descriptor
pub fn build_request<T>(
    descriptor: &RequestDescriptor<T>,
    session: &SessionSnapshot,
) -> Result<HttpRequest> {
    let base = descriptor.endpoint().resolve(session.domain.as_deref())?;
    let url = encode_url(&format!("{}{}", base, descriptor.suffix()));

    let mut headers = descriptor.headers().clone();
    if let Some(token) = &session.auth_token {
        if !has_header(&headers, AUTHORIZATION) {
            headers.insert(AUTHORIZATION.to_string(), token.clone());
        }
    }

    let (url, body) = ParameterEncoder::apply(
        &url,
        &mut headers,
        descriptor.parameters(),
        descriptor.parameter_encoding(),
    )?;
    let url = Url::parse(&url)
        .map_err(|e| CarHireError::configuration(format!("Invalid URL {}: {}", url, e)))?;

    Ok(HttpRequest {
        method: descriptor.http_method(),
        url,
        headers,
        body: body.map(Bytes::from),
    })
}

fn parse_body(response: std::result::Result<HttpResponse, TransportError>) -> Result<Value> {
    let response = response.map_err(|e| CarHireError::Transport(e.to_string()))?;
    serde_json::from_slice(&response.body).map_err(|e| {
        debug!(status = response.status, error = %e, "Response body is not JSON");
        CarHireError::decode(REQUEST_FAILED)
    })
}
