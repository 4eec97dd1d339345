//! Fetch outcome classification.
//!
//! Every outbound fetch maps to exactly one `FetchStatus`, so downstream
//! code matches on variants instead of inspecting status codes or error
//! message strings.

use std::fmt;

use crate::domain::script::ScriptNumber;
use crate::error::VolleyError;

/// Classified outcome of fetching one script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Upstream answered with a 2xx status and a body.
    Available,
    /// Upstream answered 404.
    NotFound,
    /// Upstream answered with any other non-success status.
    HttpError { status: u16 },
    /// The transport failed with a recognizable timeout.
    NetworkTimeout,
    /// The transport failed some other way. `detail` carries the identified
    /// cause when there is one (e.g. a connect failure's OS message).
    NetworkError { detail: Option<String> },
}

impl FetchStatus {
    /// Whether the script content was retrieved.
    pub fn is_available(&self) -> bool {
        matches!(self, FetchStatus::Available)
    }

    /// Classify an HTTP status code that was actually received.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            200..=299 => FetchStatus::Available,
            404 => FetchStatus::NotFound,
            other => FetchStatus::HttpError { status: other },
        }
    }

    /// Classify a failed fetch. Timeouts and identified network causes keep
    /// their distinction; everything else collapses to the generic case.
    pub fn from_error(error: &VolleyError) -> Self {
        match error {
            VolleyError::Timeout(_) => FetchStatus::NetworkTimeout,
            VolleyError::Network { detail, .. } => FetchStatus::NetworkError {
                detail: Some(detail.clone()),
            },
            VolleyError::NotFound(_) => FetchStatus::NotFound,
            VolleyError::UpstreamStatus { status, .. } => FetchStatus::HttpError { status: *status },
            _ => FetchStatus::NetworkError { detail: None },
        }
    }
}

/// Client-facing status labels, kept verbatim from the service this relay
/// replaced so existing frontends keep rendering them.
impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Available => write!(f, "Disponível"),
            FetchStatus::NotFound => write!(f, "Não encontrado"),
            FetchStatus::HttpError { status } => write!(f, "Erro HTTP {}", status),
            FetchStatus::NetworkTimeout => write!(f, "Erro de rede: Tempo limite (Timeout)"),
            FetchStatus::NetworkError {
                detail: Some(detail),
            } => write!(f, "Erro de rede: {}", detail),
            FetchStatus::NetworkError { detail: None } => write!(f, "Erro de rede"),
        }
    }
}

/// Outcome record for one script in a batch.
///
/// Created once per loop iteration and never mutated; `body` is present
/// exactly when the status is `Available`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptResult {
    /// Position of this script in the requested range.
    pub number: ScriptNumber,
    /// The URL that was fetched.
    pub url: String,
    /// Classified outcome.
    pub status: FetchStatus,
    /// Response payload, for available scripts only.
    pub body: Option<String>,
}

impl ScriptResult {
    /// Record a successfully retrieved script.
    pub fn available(number: ScriptNumber, url: String, body: String) -> Self {
        ScriptResult {
            number,
            url,
            status: FetchStatus::Available,
            body: Some(body),
        }
    }

    /// Record a failed fetch. `status` must not be `Available`.
    pub fn failed(number: ScriptNumber, url: String, status: FetchStatus) -> Self {
        debug_assert!(!status.is_available());
        ScriptResult {
            number,
            url,
            status,
            body: None,
        }
    }
}
