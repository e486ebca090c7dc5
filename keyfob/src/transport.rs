//! HTTP verb primitives for talking to the management API.
//!
//! This module defines the `Transport` trait to abstract the three verbs
//! the resource modules delegate to, enabling testability with mock
//! implementations.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Trait for the HTTP verb primitives consumed by resource modules.
///
/// This abstraction allows for different implementations (production vs.
/// testing) and keeps the resource operations testable without making real
/// HTTP calls. Authentication, timeouts and TLS all live behind it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET against `path` with the given query pairs.
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value>;

    /// Issue a POST against `path` with a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value>;

    /// Issue a DELETE against `path`.
    async fn delete(&self, path: &str) -> Result<Value>;
}

// ============================================================================
// Production Implementation using reqwest
// ============================================================================

/// Production transport using reqwest.
///
/// Holds the base URL of the tenant, an optional bearer token injected into
/// every request, and a `reqwest::Client` configured with the request
/// timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    /// Create a transport rooted at `base_url`.
    pub fn new(base_url: Url, token: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            // Url normalizes a bare host to a trailing "/"; trim it so
            // joining an absolute resource path never doubles the slash.
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let request = match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(
                status = status.as_u16(),
                body_len = body.len(),
                "management API returned an error status"
            );
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        // DELETE responses are typically empty
        if body.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip(self, query))]
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        tracing::debug!(pairs = query.len(), "Executing GET request");
        self.dispatch(self.client.get(self.url(path)).query(query))
            .await
    }

    #[tracing::instrument(skip(self, body))]
    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        tracing::debug!("Executing POST request");
        self.dispatch(self.client.post(self.url(path)).json(body))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, path: &str) -> Result<Value> {
        tracing::debug!("Executing DELETE request");
        self.dispatch(self.client.delete(self.url(path))).await
    }
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Mock transport for testing.
///
/// Allows configuring predetermined responses for specific requests without
/// making actual HTTP calls, and records every call made through it.
///
/// # Example
/// ```ignore
/// let mock = MockTransport::new();
/// mock.add_response("GET /api/v2/device-credentials", Ok(serde_json::json!([])));
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Vec<Result<Value>>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// Record of a call made through the mock transport.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predetermined response for a specific method and path.
    ///
    /// The key is formatted as "{method} {path}". Multiple responses can be
    /// added for the same key - they will be returned in FIFO order.
    pub fn add_response(&self, key: &str, response: Result<Value>) {
        self.responses
            .lock()
            .entry(key.to_string())
            .or_default()
            .push(response);
    }

    /// Get all calls that have been made through this transport.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn respond(&self, method: &str, path: &str) -> Result<Value> {
        let key = format!("{} {}", method, path);
        let mut responses = self.responses.lock();

        if let Some(queue) = responses.get_mut(&key) {
            if !queue.is_empty() {
                return queue.remove(0);
            }
        }

        // A missing canned response is a bug in the test itself
        panic!("no mock response configured for {}", key);
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        self.calls.lock().push(RecordedCall {
            method: "GET".to_string(),
            path: path.to_string(),
            query: query.to_vec(),
            body: None,
        });
        self.respond("GET", path)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.calls.lock().push(RecordedCall {
            method: "POST".to_string(),
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        });
        self.respond("POST", path)
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.calls.lock().push(RecordedCall {
            method: "DELETE".to_string(),
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        });
        self.respond("DELETE", path)
    }
}
