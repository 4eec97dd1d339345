//! Error types for the script relay.

use thiserror::Error;

/// Result type alias using the volley error type.
pub type Result<T> = std::result::Result<T, VolleyError>;

/// Main error type for the script relay.
///
/// Transport-level failures are split into distinct variants (timeout vs.
/// identified network cause vs. anything else) so that callers can classify
/// outcomes exhaustively instead of matching on message strings.
#[derive(Error, Debug)]
pub enum VolleyError {
    /// Request validation failed (missing fields, inverted range)
    #[error("invalid request parameters: {0}")]
    Validation(String),

    /// Upstream returned 404 for the requested script
    #[error("script not found upstream: {0}")]
    NotFound(String),

    /// Upstream returned a non-success status other than 404
    #[error("upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    /// The outbound request exceeded its timeout
    #[error("request to {0} timed out")]
    Timeout(String),

    /// Transport-level failure with an identifiable cause
    #[error("network error fetching {url}: {detail}")]
    Network { url: String, detail: String },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
