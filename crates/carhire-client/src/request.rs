//! Request descriptors
//!
//! A [`RequestDescriptor`] is a plain description of one API call: where it
//! goes, how its parameters are encoded and how the JSON response becomes
//! a typed value. The executor is the only thing that acts on it.

use std::fmt;

use serde_json::Value;

use crate::encoding::{Headers, ParameterEncoding, Params};
use crate::endpoint::Endpoint;
use crate::error::{CarHireError, Result, UNKNOWN_ERROR};

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Decoder<T> = Box<dyn FnOnce(Value) -> Result<T> + Send>;

/// One API call and the decoder for its response
///
/// Defaults to a POST with a JSON body, no parameters, no extra headers and
/// no URL suffix.
pub struct RequestDescriptor<T> {
    endpoint: Endpoint,
    method: HttpMethod,
    params: Params,
    encoding: ParameterEncoding,
    headers: Headers,
    url_suffix: String,
    decoder: Decoder<T>,
}

impl<T> RequestDescriptor<T> {
    pub fn new<F>(endpoint: Endpoint, decoder: F) -> Self
    where
        F: FnOnce(Value) -> Result<T> + Send + 'static,
    {
        Self {
            endpoint,
            method: HttpMethod::default(),
            params: Params::new(),
            encoding: ParameterEncoding::default(),
            headers: Headers::new(),
            url_suffix: String::new(),
            decoder: Box::new(decoder),
        }
    }

    /// GET with query encoded parameters, the shape of most read calls
    pub fn query<F>(endpoint: Endpoint, decoder: F) -> Self
    where
        F: FnOnce(Value) -> Result<T> + Send + 'static,
    {
        Self::new(endpoint, decoder)
            .method(HttpMethod::Get)
            .encoding(ParameterEncoding::UrlQuery)
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn encoding(mut self, encoding: ParameterEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Text appended to the endpoint path before encoding
    pub fn url_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.url_suffix = suffix.into();
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn http_method(&self) -> HttpMethod {
        self.method
    }

    pub fn parameters(&self) -> &Params {
        &self.params
    }

    pub fn parameter_encoding(&self) -> ParameterEncoding {
        self.encoding
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn suffix(&self) -> &str {
        &self.url_suffix
    }

    /// Turn a parsed response body into the result
    pub fn decode(self, body: Value) -> Result<T> {
        (self.decoder)(body)
    }
}

impl<T> fmt::Debug for RequestDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .field("params", &self.params)
            .field("encoding", &self.encoding)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("url_suffix", &self.url_suffix)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Response envelope
// =============================================================================

/// The `message` string of an envelope, if any
pub fn envelope_message(body: &Value) -> Option<&str> {
    body.get("message").and_then(Value::as_str)
}

/// Error for an envelope without usable data
pub fn envelope_error(body: &Value) -> CarHireError {
    match envelope_message(body) {
        Some(message) => CarHireError::api(message),
        None => CarHireError::decode(UNKNOWN_ERROR),
    }
}

/// The `data` payload of an envelope
///
/// A missing or null `data` yields the envelope's `message`, or the
/// generic unknown error when there is none.
pub fn envelope_data(body: &Value) -> Result<&Value> {
    match body.get("data") {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(envelope_error(body)),
    }
}
