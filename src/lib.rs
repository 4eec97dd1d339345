//! HTTP relay for numbered database scripts.
//!
//! This crate serves two JSON endpoints: one synthesizes the URLs for a
//! numeric range of scripts, fetches each sequentially, and returns one
//! classified result per number; the other fetches a single arbitrary URL
//! and relays its body. Each outbound call gets a single timeout - there are
//! no retries, no caching, and no state beyond the request being handled.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http;

// Re-export commonly used types
pub use api::{router, AppState};
pub use config::RelayConfig;
pub use domain::{script_url, FetchStatus, ScriptNumber, ScriptRange, ScriptResult};
pub use error::{Result, VolleyError};
pub use fetcher::ScriptFetcher;
pub use http::{HttpClient, HttpResponse, MockHttpClient, ReqwestHttpClient};
