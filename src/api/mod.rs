//! HTTP surface of the relay: routes, shared state, and CORS.

pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

use crate::fetcher::ScriptFetcher;
use crate::http::HttpClient;

/// Shared state handed to every handler.
pub struct AppState<H: HttpClient> {
    pub fetcher: Arc<ScriptFetcher<H>>,
}

impl<H: HttpClient> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

/// Build the relay router.
///
/// `/api/buscar-scripts` is a route alias of `/api/batch-fetch`, kept so
/// frontends deployed against the previous service keep working.
pub fn router<H: HttpClient + 'static>(state: AppState<H>) -> Router {
    Router::new()
        .route("/api/batch-fetch", post(handlers::batch_fetch::<H>))
        .route("/api/buscar-scripts", post(handlers::batch_fetch::<H>))
        .route("/api/fetch-script", post(handlers::fetch_script::<H>))
        .layer(middleware::from_fn(open_cors))
        .with_state(state)
}

/// Open-CORS middleware: any origin, POST only, Content-Type only.
///
/// Preflight OPTIONS requests are answered directly with 204; every other
/// response gets the same headers attached.
async fn open_cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}
