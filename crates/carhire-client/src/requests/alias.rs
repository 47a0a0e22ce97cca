use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::request::{envelope_error, RequestDescriptor};

/// Bootstrap request returning the account alias
pub fn alias() -> RequestDescriptor<String> {
    RequestDescriptor::query(Endpoint::Details, |body| {
        body.pointer("/client/alias")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| envelope_error(&body))
    })
}
