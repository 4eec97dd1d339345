//! Sequential script fetching and outcome classification.
//!
//! `ScriptFetcher` is generic over [`HttpClient`] so the fetch loop can be
//! exercised in tests without real network calls.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::domain::{script_url, FetchStatus, ScriptNumber, ScriptRange, ScriptResult};
use crate::error::{Result, VolleyError};
use crate::http::HttpClient;

/// Fetches numbered scripts from the upstream host and classifies each
/// outcome.
///
/// Holds no per-request state; one instance is shared across all incoming
/// requests.
pub struct ScriptFetcher<H: HttpClient> {
    http_client: Arc<H>,
    config: RelayConfig,
}

impl<H: HttpClient> ScriptFetcher<H> {
    /// Create a fetcher over the given client and configuration.
    pub fn new(http_client: Arc<H>, config: RelayConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Fetch every script in `range` for one system/database pair.
    ///
    /// Fetches run strictly sequentially, one result per number, in input
    /// order. Failures are local to one item: every classified outcome is
    /// recorded and the loop always completes the full range.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_batch(
        &self,
        system: &str,
        db_kind: &str,
        range: ScriptRange,
    ) -> Vec<ScriptResult> {
        let mut results = Vec::with_capacity(range.len());

        for number in range.iter() {
            let url = script_url(&self.config.upstream_base_url, system, db_kind, number);
            results.push(self.fetch_numbered(number, url).await);
        }

        tracing::info!(
            total = results.len(),
            available = results.iter().filter(|r| r.status.is_available()).count(),
            "Batch fetch completed"
        );

        results
    }

    /// Fetch one numbered script and classify the outcome.
    async fn fetch_numbered(&self, number: ScriptNumber, url: String) -> ScriptResult {
        let status = match self
            .http_client
            .get(&url, self.config.batch_timeout_ms)
            .await
        {
            Ok(response) => {
                if response.is_success() {
                    return ScriptResult::available(number, url, response.body);
                }
                FetchStatus::from_http_status(response.status)
            }
            Err(error) => FetchStatus::from_error(&error),
        };

        tracing::error!(url = %url, status = %status, "Script fetch failed");
        ScriptResult::failed(number, url, status)
    }

    /// Fetch one arbitrary script URL and return its body.
    ///
    /// # Errors
    /// - `VolleyError::NotFound` when upstream answers 404
    /// - `VolleyError::UpstreamStatus` for any other non-success status
    /// - `VolleyError::Timeout` / `VolleyError::Network` / `VolleyError::Other`
    ///   for transport failures
    #[tracing::instrument(skip(self))]
    pub async fn fetch_script(&self, url: &str) -> Result<String> {
        match self
            .http_client
            .get(url, self.config.script_timeout_ms)
            .await
        {
            Ok(response) if response.is_success() => Ok(response.body),
            Ok(response) => {
                tracing::error!(url = %url, status = response.status, "Script fetch failed");
                if response.status == 404 {
                    Err(VolleyError::NotFound(url.to_string()))
                } else {
                    Err(VolleyError::UpstreamStatus {
                        status: response.status,
                        url: url.to_string(),
                    })
                }
            }
            Err(error) => {
                tracing::error!(url = %url, error = %error, "Script fetch failed");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpResponse, MockHttpClient};

    const BASE: &str = "http://upstream.test/scriptsbd";

    fn fetcher_with(mock: &MockHttpClient) -> ScriptFetcher<MockHttpClient> {
        let config = RelayConfig {
            upstream_base_url: BASE.to_string(),
            ..RelayConfig::default()
        };
        ScriptFetcher::new(Arc::new(mock.clone()), config)
    }

    fn url_for(number: u32) -> String {
        script_url(BASE, "hospA", "postgres", ScriptNumber(number))
    }

    fn ok(body: &str) -> crate::error::Result<HttpResponse> {
        Ok(HttpResponse {
            status: 200,
            body: body.to_string(),
        })
    }

    fn status(code: u16) -> crate::error::Result<HttpResponse> {
        Ok(HttpResponse {
            status: code,
            body: String::new(),
        })
    }

    #[tokio::test]
    async fn batch_returns_full_range_in_order() {
        let mock = MockHttpClient::new();
        mock.add_response(&url_for(1), ok("SELECT 1;"));
        mock.add_response(&url_for(2), status(404));
        mock.add_response(&url_for(3), status(500));

        let fetcher = fetcher_with(&mock);
        let range = ScriptRange::new(1, 3).unwrap();
        let results = fetcher.fetch_batch("hospA", "postgres", range).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].number, ScriptNumber(1));
        assert_eq!(results[0].status, FetchStatus::Available);
        assert_eq!(results[0].body.as_deref(), Some("SELECT 1;"));
        assert_eq!(results[1].number, ScriptNumber(2));
        assert_eq!(results[1].status, FetchStatus::NotFound);
        assert!(results[1].body.is_none());
        assert_eq!(results[2].number, ScriptNumber(3));
        assert_eq!(results[2].status, FetchStatus::HttpError { status: 500 });

        // One call per number, issued in ascending order.
        let calls = mock.get_calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].url, url_for(1));
        assert_eq!(calls[1].url, url_for(2));
        assert_eq!(calls[2].url, url_for(3));
    }

    #[tokio::test]
    async fn batch_failure_is_local_to_one_item() {
        let mock = MockHttpClient::new();
        mock.add_response(&url_for(10), ok("a"));
        mock.add_response(&url_for(11), status(404));
        mock.add_response(&url_for(12), ok("c"));

        let fetcher = fetcher_with(&mock);
        let range = ScriptRange::new(10, 12).unwrap();
        let results = fetcher.fetch_batch("hospA", "postgres", range).await;

        assert_eq!(results[0].status, FetchStatus::Available);
        assert_eq!(results[1].status, FetchStatus::NotFound);
        assert_eq!(results[2].status, FetchStatus::Available);
        assert_eq!(results[2].body.as_deref(), Some("c"));
    }

    #[tokio::test]
    async fn batch_survives_ten_mixed_failures() {
        let mock = MockHttpClient::new();
        for number in 1..=10u32 {
            let url = url_for(number);
            let response = match number % 4 {
                0 => status(404),
                1 => status(500),
                2 => Err(VolleyError::Timeout(url.clone())),
                _ => Err(VolleyError::Network {
                    url: url.clone(),
                    detail: "Connection reset by peer (os error 104)".to_string(),
                }),
            };
            mock.add_response(&url, response);
        }

        let fetcher = fetcher_with(&mock);
        let range = ScriptRange::new(1, 10).unwrap();
        let results = fetcher.fetch_batch("hospA", "postgres", range).await;

        assert_eq!(results.len(), 10);
        assert!(results.iter().all(|r| !r.status.is_available()));
        assert_eq!(results[1].status, FetchStatus::NetworkTimeout);
        assert_eq!(
            results[2].status,
            FetchStatus::NetworkError {
                detail: Some("Connection reset by peer (os error 104)".to_string())
            }
        );
        assert_eq!(results[3].status, FetchStatus::NotFound);
        assert_eq!(results[4].status, FetchStatus::HttpError { status: 500 });
    }

    #[tokio::test]
    async fn batch_uses_batch_timeout() {
        let mock = MockHttpClient::new();
        mock.add_response(&url_for(1), ok("x"));

        let fetcher = fetcher_with(&mock);
        let range = ScriptRange::new(1, 1).unwrap();
        fetcher.fetch_batch("hospA", "postgres", range).await;

        assert_eq!(mock.get_calls()[0].timeout_ms, 15_000);
    }

    #[tokio::test]
    async fn single_fetch_returns_body() {
        let mock = MockHttpClient::new();
        mock.add_response("http://host/a.txt", ok("-- script body"));

        let fetcher = fetcher_with(&mock);
        let content = fetcher.fetch_script("http://host/a.txt").await.unwrap();
        assert_eq!(content, "-- script body");
        // Single fetches use the shorter timeout.
        assert_eq!(mock.get_calls()[0].timeout_ms, 10_000);
    }

    #[tokio::test]
    async fn single_fetch_classifies_not_found() {
        let mock = MockHttpClient::new();
        mock.add_response("http://host/a.txt", status(404));

        let fetcher = fetcher_with(&mock);
        let err = fetcher.fetch_script("http://host/a.txt").await.unwrap_err();
        assert!(matches!(err, VolleyError::NotFound(_)));
    }

    #[tokio::test]
    async fn single_fetch_classifies_other_statuses_and_transport_errors() {
        let mock = MockHttpClient::new();
        mock.add_response("http://host/a.txt", status(503));
        mock.add_response(
            "http://host/b.txt",
            Err(VolleyError::Timeout("http://host/b.txt".to_string())),
        );

        let fetcher = fetcher_with(&mock);

        let err = fetcher.fetch_script("http://host/a.txt").await.unwrap_err();
        assert!(matches!(
            err,
            VolleyError::UpstreamStatus { status: 503, .. }
        ));

        let err = fetcher.fetch_script("http://host/b.txt").await.unwrap_err();
        assert!(matches!(err, VolleyError::Timeout(_)));
    }
}
