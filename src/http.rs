//! HTTP client abstraction for upstream fetches.
//!
//! This module defines the `HttpClient` trait to abstract HTTP request execution,
//! enabling testability with mock implementations.

use crate::error::{Result, VolleyError};
use async_trait::async_trait;
use std::error::Error as _;
use std::time::Duration;

/// Response from an HTTP request.
///
/// The whole body is buffered before being returned; upstream scripts are
/// small text files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as a string
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx success class.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for executing upstream GET requests.
///
/// This abstraction allows for different implementations (production vs. testing)
/// and makes the fetch loop testable without making real HTTP calls.
///
/// Any response that arrives — success or error status — is an `Ok`;
/// `Err` is reserved for transport-level failures (timeout, connect errors,
/// and so on), already mapped into the crate error taxonomy.
///
/// # Example
/// ```ignore
/// let client = ReqwestHttpClient::new();
/// let response = client.get("http://host/scripts/script001.txt", 15000).await?;
/// println!("Status: {}, Body: {}", response.status, response.body);
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync + Clone {
    /// Execute a GET request against `url`.
    ///
    /// # Arguments
    /// * `url` - The full target URL
    /// * `timeout_ms` - Request timeout in milliseconds
    ///
    /// # Errors
    /// Returns an error if the request fails at the transport level:
    /// - `VolleyError::Timeout` when the timeout elapses
    /// - `VolleyError::Network` for identified causes (connect failures)
    /// - `VolleyError::Other` for anything else
    async fn get(&self, url: &str, timeout_ms: u64) -> Result<HttpResponse>;
}

// ============================================================================
// Production Implementation using reqwest
// ============================================================================

/// Production HTTP client using reqwest.
///
/// This implementation makes real HTTP requests to the upstream script host.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new reqwest-based HTTP client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    #[tracing::instrument(skip(self))]
    async fn get(&self, url: &str, timeout_ms: u64) -> Result<HttpResponse> {
        tracing::debug!(url = %url, timeout_ms = timeout_ms, "Executing upstream GET");

        let response = self
            .client
            .get(url)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|e| classify_transport_error(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(url, e))?;

        tracing::debug!(
            url = %url,
            status = status,
            response_len = body.len(),
            "Upstream GET completed"
        );

        Ok(HttpResponse { status, body })
    }
}

/// Map a reqwest transport failure into the crate error taxonomy.
///
/// Timeouts keep their own variant. Connect failures surface the innermost
/// source message (e.g. "Connection refused (os error 111)") as the
/// identified cause; everything else falls through to the generic variant.
fn classify_transport_error(url: &str, error: reqwest::Error) -> VolleyError {
    if error.is_timeout() {
        return VolleyError::Timeout(url.to_string());
    }
    if error.is_connect() {
        let mut detail = error.to_string();
        let mut source = error.source();
        while let Some(inner) = source {
            detail = inner.to_string();
            source = inner.source();
        }
        return VolleyError::Network {
            url: url.to_string(),
            detail,
        };
    }
    VolleyError::Other(anyhow::Error::new(error))
}

// ============================================================================
// Test/Mock Implementation
// ============================================================================

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Mock HTTP client for testing.
///
/// Allows configuring predetermined responses for specific URLs without
/// making actual HTTP calls.
///
/// # Example
/// ```ignore
/// let mock = MockHttpClient::new();
/// mock.add_response(
///     "http://host/scripts/script001.txt",
///     Ok(HttpResponse {
///         status: 200,
///         body: "SELECT 1;".to_string(),
///     }),
/// );
/// ```
#[derive(Clone, Default)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, Vec<Result<HttpResponse>>>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

/// Record of a call made to the mock HTTP client.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub url: String,
    pub timeout_ms: u64,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predetermined response for a URL.
    ///
    /// Multiple responses can be added for the same URL - they will be
    /// returned in FIFO order.
    pub fn add_response(&self, url: &str, response: Result<HttpResponse>) {
        self.responses
            .lock()
            .entry(url.to_string())
            .or_default()
            .push(response);
    }

    /// Get all calls that have been made to this mock client.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Clear all recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, timeout_ms: u64) -> Result<HttpResponse> {
        // Record this call
        self.calls.lock().push(MockCall {
            url: url.to_string(),
            timeout_ms,
        });

        // Look up the response
        let response = {
            let mut responses = self.responses.lock();
            match responses.get_mut(url) {
                Some(queue) if !queue.is_empty() => Some(queue.remove(0)),
                _ => None,
            }
        };

        match response {
            Some(response) => response,
            None => Err(VolleyError::Other(anyhow::anyhow!(
                "No mock response configured for {}",
                url
            ))),
        }
    }
}
