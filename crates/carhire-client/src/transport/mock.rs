//! Mock transport for testing
//!
//! Routes are matched on method, URL path and optionally query parameters.
//! The most recently added matching route answers, so tests can override
//! earlier setup. Every request is recorded.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use serde_json::{json, Value};

use super::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::request::HttpMethod;

#[derive(Debug, Clone)]
enum MockReply {
    Response(HttpResponse),
    Error(TransportError),
}

#[derive(Debug, Clone)]
struct MockRoute {
    method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    delay: Duration,
    reply: MockReply,
}

impl MockRoute {
    fn matches(&self, request: &HttpRequest) -> bool {
        if self.method != request.method || self.path != request.url.path() {
            return false;
        }
        let pairs = request.query_pairs();
        self.query.iter().all(|wanted| pairs.contains(wanted))
    }
}

/// Transport answering from canned routes
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: RwLock<Vec<MockRoute>>,
    requests: RwLock<Vec<HttpRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start describing a route
    pub fn on(&self, method: HttpMethod, path: impl Into<String>) -> MockRouteBuilder<'_> {
        MockRouteBuilder {
            transport: self,
            route: MockRoute {
                method,
                path: path.into(),
                query: Vec::new(),
                delay: Duration::ZERO,
                reply: MockReply::Response(HttpResponse::new(200, Bytes::new())),
            },
        }
    }

    /// All requests seen so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.read().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.read().len()
    }

    /// Requests seen for a URL path
    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.requests
            .read()
            .iter()
            .filter(|request| request.url.path() == path)
            .cloned()
            .collect()
    }

    /// Highest number of requests that were outstanding at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn find_route(&self, request: &HttpRequest) -> Option<MockRoute> {
        self.routes
            .read()
            .iter()
            .rev()
            .find(|route| route.matches(request))
            .cloned()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.write().push(request.clone());
        let route = self.find_route(&request);

        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        if let Some(delay) = route.as_ref().map(|r| r.delay).filter(|d| !d.is_zero()) {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match route {
            Some(MockRoute {
                reply: MockReply::Response(response),
                ..
            }) => Ok(response),
            Some(MockRoute {
                reply: MockReply::Error(error),
                ..
            }) => Err(error),
            None => {
                let body = json!({
                    "message": format!("No mock route for {} {}", request.method, request.url.path())
                });
                Ok(HttpResponse::new(404, body.to_string()))
            }
        }
    }
}

/// Builder returned by [`MockTransport::on`]
pub struct MockRouteBuilder<'a> {
    transport: &'a MockTransport,
    route: MockRoute,
}

impl MockRouteBuilder<'_> {
    /// Only match requests carrying this decoded query parameter
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.route.query.push((name.into(), value.into()));
        self
    }

    /// Wait before answering
    pub fn delay(mut self, delay: Duration) -> Self {
        self.route.delay = delay;
        self
    }

    /// Answer 200 with a JSON body
    pub fn respond_json(self, body: Value) {
        self.respond(200, body.to_string());
    }

    /// Answer with a raw status and body
    pub fn respond(mut self, status: u16, body: impl Into<Bytes>) {
        self.route.reply = MockReply::Response(HttpResponse::new(status, body));
        self.transport.routes.write().push(self.route);
    }

    /// Fail at the transport level
    pub fn fail(mut self, error: TransportError) {
        self.route.reply = MockReply::Error(error);
        self.transport.routes.write().push(self.route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.parse().unwrap(),
            headers: Default::default(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_latest_matching_route_wins() {
        let mock = MockTransport::new();
        mock.on(HttpMethod::Get, "/a").respond_json(json!({"n": 1}));
        mock.on(HttpMethod::Get, "/a").respond_json(json!({"n": 2}));

        let response = mock.send(get("http://x.test/a")).await.unwrap();
        assert_eq!(response.body, Bytes::from(r#"{"n":2}"#));
    }

    #[tokio::test]
    async fn test_query_filter() {
        let mock = MockTransport::new();
        mock.on(HttpMethod::Get, "/a")
            .with_query("supplierCode", "HZ")
            .respond_json(json!("hz"));
        mock.on(HttpMethod::Get, "/a")
            .with_query("supplierCode", "AV")
            .respond_json(json!("av"));

        let response = mock
            .send(get("http://x.test/a?supplierCode=HZ&x=1"))
            .await
            .unwrap();
        assert_eq!(response.body, Bytes::from(r#""hz""#));
    }

    #[tokio::test]
    async fn test_unmatched_is_404_and_recorded() {
        let mock = MockTransport::new();
        let response = mock.send(get("http://x.test/missing")).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(mock.request_count(), 1);
        assert_eq!(mock.requests_to("/missing").len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let mock = MockTransport::new();
        mock.on(HttpMethod::Get, "/down").fail(TransportError::Timeout);
        let err = mock.send(get("http://x.test/down")).await.unwrap_err();
        assert!(matches!(err, TransportError::Timeout));
    }
}
