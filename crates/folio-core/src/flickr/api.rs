//! The Flickr API seam and response envelope handling.

use crate::error::{FlickrError, FlickrResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Anything that can execute a Flickr REST method.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the portfolio service holds a `Box<dyn FlickrApi>`).
#[async_trait]
pub trait FlickrApi: Send + Sync {
    /// Execute `method` with the given method-specific parameters.
    ///
    /// Implementations supply the API key and response format themselves and
    /// return the body only after [`check_envelope`] accepted it.
    async fn call(&self, method: &str, params: &[(&str, &str)]) -> FlickrResult<Value>;
}

/// Accept a response body whose envelope says `"stat": "ok"`.
///
/// A failed envelope looks like
/// `{"stat": "fail", "code": 100, "message": "Invalid API Key"}`.
pub fn check_envelope(method: &str, body: Value) -> FlickrResult<Value> {
    match body.get("stat").and_then(Value::as_str) {
        Some("ok") => Ok(body),
        Some(_) => Err(FlickrError::Api {
            method: method.to_string(),
            code: body.get("code").and_then(Value::as_i64).unwrap_or(0),
            message: body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        }),
        None => Err(FlickrError::Decode {
            method: method.to_string(),
            message: "response has no 'stat' field".to_string(),
        }),
    }
}

/// Deserialize the payload under `key` (e.g. `"photos"`) of an ok envelope.
pub(crate) fn decode<T: DeserializeOwned>(method: &str, body: Value, key: &str) -> FlickrResult<T> {
    let payload = match body {
        Value::Object(mut map) => map.remove(key),
        _ => None,
    }
    .ok_or_else(|| FlickrError::Decode {
        method: method.to_string(),
        message: format!("missing '{key}' in response"),
    })?;

    serde_json::from_value(payload).map_err(|e| FlickrError::Decode {
        method: method.to_string(),
        message: e.to_string(),
    })
}
