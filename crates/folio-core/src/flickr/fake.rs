//! In-memory [`FlickrApi`] for tests.
//!
//! Responses are canned envelopes keyed by method, optionally narrowed to a
//! single `photo_id` / `photoset_id`. Every call is recorded.

use super::api::{check_envelope, FlickrApi};
use crate::error::{FlickrError, FlickrResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: String,
    pub params: Vec<(String, String)>,
}

impl RecordedCall {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
pub(crate) struct FakeFlickr {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeFlickr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `method` with `body`.
    pub fn respond(mut self, method: &str, body: Value) -> Self {
        self.responses.insert(method.to_string(), body);
        self
    }

    /// Answer calls to `method` for one photo/photoset id with `body`.
    pub fn respond_for(mut self, method: &str, id: &str, body: Value) -> Self {
        self.responses.insert(format!("{method}:{id}"), body);
        self
    }

    /// Answer every call to `method` with a failed envelope.
    pub fn fail(self, method: &str, code: i64, message: &str) -> Self {
        self.respond(
            method,
            json!({"stat": "fail", "code": code, "message": message}),
        )
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls().iter().filter(|c| c.method == method).count()
    }

    pub fn last_call(&self, method: &str) -> Option<RecordedCall> {
        self.calls().into_iter().rev().find(|c| c.method == method)
    }
}

#[async_trait]
impl FlickrApi for FakeFlickr {
    async fn call(&self, method: &str, params: &[(&str, &str)]) -> FlickrResult<Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                method: method.to_string(),
                params: params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            });
        }

        let id = params
            .iter()
            .find(|(k, _)| *k == "photo_id" || *k == "photoset_id")
            .map(|(_, v)| *v);

        let body = id
            .and_then(|id| self.responses.get(&format!("{method}:{id}")))
            .or_else(|| self.responses.get(method))
            .cloned()
            .ok_or_else(|| FlickrError::Api {
                method: method.to_string(),
                code: 112,
                message: format!("Method \"{method}\" not found"),
            })?;

        check_envelope(method, body)
    }
}
