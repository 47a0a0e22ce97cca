//! Request parameter encoding
//!
//! Parameters are a flat map of JSON values. They are either written into
//! the URL query string or serialized as a JSON request body.
//!
//! Query encoding flattens nested values the way form-based APIs expect:
//!
//! ```
//! use carhire_client::encoding::{ParameterEncoder, Params};
//! use serde_json::json;
//!
//! let params = Params::new()
//!     .with("pickUpDepot", json!({"depotCode": "SYD", "countryCode": "AU"}))
//!     .with("debug", true);
//!
//! assert_eq!(
//!     ParameterEncoder::query_string(&params),
//!     "debug=1&pickUpDepot%5BcountryCode%5D=AU&pickUpDepot%5BdepotCode%5D=SYD"
//! );
//! ```

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;

use crate::error::{CarHireError, Result};

/// Characters escaped in query keys and values: everything except RFC 3986
/// unreserved characters, `?` and `/`
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'?')
    .remove(b'/');

/// Characters not allowed anywhere in a URL. `%` is left alone so escapes
/// already in the URL survive.
const URL_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Characters escaped in a single path segment
const PATH_SEGMENT: &AsciiSet = &URL_UNSAFE
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'&')
    .add(b'=')
    .add(b'+')
    .add(b';');

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Request headers by name
pub type Headers = BTreeMap<String, String>;

/// Whether `name` is present, ignoring case
pub fn has_header(headers: &Headers, name: &str) -> bool {
    headers.keys().any(|key| key.eq_ignore_ascii_case(name))
}

/// How parameters are attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterEncoding {
    /// Appended to the URL query string
    UrlQuery,
    /// Serialized into the body as JSON
    #[default]
    JsonBody,
}

/// Request parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parameters from any value that serializes to a JSON object
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self> {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Ok(Self(map.into_iter().collect())),
            Ok(other) => Err(CarHireError::Encoding(format!(
                "parameters must be an object, got {}",
                other
            ))),
            Err(e) => Err(CarHireError::Encoding(e.to_string())),
        }
    }

    /// Add a parameter, replacing any previous value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Parameters ready to attach to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedParams {
    Query(String),
    Body {
        bytes: Vec<u8>,
        content_type: &'static str,
    },
}

/// Serializes [`Params`] for the wire
pub struct ParameterEncoder;

impl ParameterEncoder {
    /// Encode parameters in the given style
    pub fn encode(params: &Params, encoding: ParameterEncoding) -> Result<EncodedParams> {
        match encoding {
            ParameterEncoding::UrlQuery => Ok(EncodedParams::Query(Self::query_string(params))),
            ParameterEncoding::JsonBody => Ok(EncodedParams::Body {
                bytes: Self::json_body(params)?,
                content_type: APPLICATION_JSON,
            }),
        }
    }

    /// Encode parameters onto `url`, returning the final URL and body
    ///
    /// A JSON content type is only added when `headers` has none.
    pub fn apply(
        url: &str,
        headers: &mut Headers,
        params: &Params,
        encoding: ParameterEncoding,
    ) -> Result<(String, Option<Vec<u8>>)> {
        match Self::encode(params, encoding)? {
            EncodedParams::Query(query) => Ok((append_query(url, &query), None)),
            EncodedParams::Body {
                bytes,
                content_type,
            } => {
                if !has_header(headers, CONTENT_TYPE) {
                    headers.insert(CONTENT_TYPE.to_string(), content_type.to_string());
                }
                Ok((url.to_string(), Some(bytes)))
            }
        }
    }

    /// Query string with keys in ascending order
    pub fn query_string(params: &Params) -> String {
        let mut components = Vec::new();
        for (key, value) in params.iter() {
            query_components(key, value, &mut components);
        }
        components
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn json_body(params: &Params) -> Result<Vec<u8>> {
        serde_json::to_vec(&params.0).map_err(|e| CarHireError::Encoding(e.to_string()))
    }
}

fn query_components(key: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (nested_key, nested) in entries {
                query_components(&format!("{}[{}]", key, nested_key), nested, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                query_components(&format!("{}[]", key), item, out);
            }
        }
        Value::Bool(flag) => out.push((escape(key), if *flag { "1" } else { "0" }.to_string())),
        Value::Null => out.push((escape(key), String::new())),
        Value::Number(number) => out.push((escape(key), escape(&number.to_string()))),
        Value::String(text) => out.push((escape(key), escape(text))),
    }
}

/// Percent-escape a query key or value
pub fn escape(component: &str) -> String {
    utf8_percent_encode(component, QUERY_COMPONENT).to_string()
}

/// Percent-escape a value used as one URL path segment
pub fn escape_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Percent-escape characters that are never valid in a URL
pub fn encode_url(url: &str) -> String {
    utf8_percent_encode(url, URL_UNSAFE).to_string()
}

/// Join a query onto a URL that may already carry one
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        url.to_string()
    } else if url.ends_with('?') || url.ends_with('&') {
        format!("{}{}", url, query)
    } else if url.contains('?') {
        format!("{}&{}", url, query)
    } else {
        format!("{}?{}", url, query)
    }
}
