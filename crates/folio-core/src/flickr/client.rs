//! HTTP implementation of [`FlickrApi`] on top of `reqwest`.
//!
//! Every method is a GET against the REST endpoint with
//! `format=json&nojsoncallback=1`, so the body is plain JSON rather than
//! JSONP.

use super::api::{check_envelope, FlickrApi};
use super::retry;
use crate::config::FlickrConfig;
use crate::error::{FlickrError, FlickrResult};
use async_trait::async_trait;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Flickr REST client.
pub struct FlickrClient {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl FlickrClient {
    /// Single-shot client: no timeout, no retries.
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
            timeout: None,
            retry_attempts: 0,
            retry_delay_ms: 1000,
        }
    }

    /// Client configured from the `[flickr]` config section.
    pub fn from_config(config: &FlickrConfig, api_key: &str) -> Self {
        let client = Self::new(&config.endpoint, api_key)
            .with_retries(config.retry_attempts, config.retry_delay_ms);
        if config.timeout_ms > 0 {
            client.with_timeout(Duration::from_millis(config.timeout_ms))
        } else {
            client
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retries(mut self, attempts: u32, base_delay_ms: u64) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay_ms = base_delay_ms;
        self
    }

    async fn call_once(&self, method: &str, params: &[(&str, &str)]) -> FlickrResult<Value> {
        let mut query: Vec<(&str, &str)> = vec![
            ("method", method),
            ("api_key", self.api_key.as_str()),
            ("format", "json"),
            ("nojsoncallback", "1"),
        ];
        query.extend_from_slice(params);

        let mut request = self.client.get(&self.endpoint).query(&query);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let resp = request.send().await.map_err(|e| self.transport_error(method, e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(FlickrError::Http {
                method: method.to_string(),
                message: format!("HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
                connect: false,
            });
        }

        let body: Value = resp.json().await.map_err(|e| FlickrError::Decode {
            method: method.to_string(),
            message: format!("body is not JSON: {e}"),
        })?;

        check_envelope(method, body)
    }

    /// Classify a `send` failure by reqwest's error kind. The rendered
    /// message only says "error sending request", so it can't be matched on.
    fn transport_error(&self, method: &str, e: reqwest::Error) -> FlickrError {
        if e.is_timeout() {
            return FlickrError::Timeout {
                method: method.to_string(),
                timeout_ms: self.timeout.map_or(0, |t| t.as_millis() as u64),
            };
        }
        FlickrError::Http {
            method: method.to_string(),
            message: e.to_string(),
            status_code: e.status().map(|s| s.as_u16()),
            connect: e.is_connect(),
        }
    }
}

#[async_trait]
impl FlickrApi for FlickrClient {
    async fn call(&self, method: &str, params: &[(&str, &str)]) -> FlickrResult<Value> {
        let mut attempt = 0;
        loop {
            let start = Instant::now();
            match self.call_once(method, params).await {
                Ok(body) => {
                    tracing::debug!(
                        method,
                        latency_ms = start.elapsed().as_millis() as u64,
                        "Flickr call ok"
                    );
                    return Ok(body);
                }
                Err(e) if attempt < self.retry_attempts && retry::is_retryable(&e) => {
                    let delay = retry::backoff_duration(attempt, self.retry_delay_ms);
                    tracing::warn!(
                        "{e} (attempt {}/{}), retrying in {}ms",
                        attempt + 1,
                        self.retry_attempts + 1,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_from_config_defaults_are_single_shot() {
        let client = FlickrClient::from_config(&FlickrConfig::default(), "key");
        assert_eq!(client.timeout, None);
        assert_eq!(client.retry_attempts, 0);
        assert_eq!(client.endpoint, crate::config::DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_from_config_applies_timeout_and_retries() {
        let config = FlickrConfig {
            timeout_ms: 2500,
            retry_attempts: 2,
            retry_delay_ms: 200,
            ..FlickrConfig::default()
        };
        let client = FlickrClient::from_config(&config, "key");
        assert_eq!(client.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(client.retry_attempts, 2);
        assert_eq!(client.retry_delay_ms, 200);
    }

    #[tokio::test]
    async fn test_refused_connection_is_retryable() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = FlickrClient::new("http://127.0.0.1:9/services/rest/", "key");
        let err = client.call("flickr.test.echo", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            FlickrError::Http {
                status_code: None,
                connect: true,
                ..
            }
        ));
        assert!(retry::is_retryable(&err));
        assert_eq!(err.method(), "flickr.test.echo");
    }

    /// Serve every request with the same canned response, counting requests.
    async fn canned_server(status_line: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                counter.fetch_add(1, Ordering::SeqCst);
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{addr}/services/rest/"), hits)
    }

    #[tokio::test]
    async fn test_server_error_retried_until_attempts_exhausted() {
        let (endpoint, hits) = canned_server("503 Service Unavailable", "{}").await;
        let client = FlickrClient::new(&endpoint, "key").with_retries(1, 1);

        let err = client.call("flickr.photos.search", &[]).await.unwrap_err();
        assert!(matches!(err, FlickrError::Http { status_code: Some(503), .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_api_failure_not_retried() {
        let (endpoint, hits) = canned_server(
            "200 OK",
            r#"{"stat":"fail","code":100,"message":"Invalid API Key"}"#,
        )
        .await;
        let client = FlickrClient::new(&endpoint, "key").with_retries(3, 1);

        let err = client.call("flickr.photos.search", &[]).await.unwrap_err();
        assert!(matches!(err, FlickrError::Api { code: 100, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ok_envelope_returned_once() {
        let (endpoint, hits) = canned_server("200 OK", r#"{"stat":"ok","photos":{"page":1}}"#).await;
        let client = FlickrClient::new(&endpoint, "key").with_retries(2, 1);

        let body = client.call("flickr.photos.search", &[]).await.unwrap();
        assert_eq!(body["photos"]["page"], 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
