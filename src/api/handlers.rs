//! Request handlers for the two relay endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::types::{
    BatchFetchRequest, BatchFetchResponse, ErrorResponse, FetchErrorResponse, FetchScriptRequest,
    ScriptContentResponse, ScriptResultBody,
};
use crate::api::AppState;
use crate::domain::ScriptRange;
use crate::error::VolleyError;
use crate::http::HttpClient;

// Client-facing messages, verbatim from the legacy service.
const INVALID_SEARCH_PARAMS: &str = "Parâmetros de busca inválidos.";
const MISSING_URL: &str = "URL do script ausente.";
const SCRIPT_NOT_FOUND: &str = "Script não encontrado no destino.";
const FETCH_TIMED_OUT: &str = "Tempo limite esgotado";
const FETCH_BLOCKED: &str = "Falha de rede (Bloqueio)";

/// `POST /api/batch-fetch`: fetch and consolidate every script in a range.
///
/// Validation failures answer 400 before any outbound call is made. Once
/// validation passes the response is always 200 with one classified entry
/// per number, even if every fetch failed.
pub async fn batch_fetch<H: HttpClient + 'static>(
    State(state): State<AppState<H>>,
    payload: Result<Json<BatchFetchRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected malformed batch request");
            return bad_request(INVALID_SEARCH_PARAMS);
        }
    };

    if request.sistema.is_empty() || request.sgbd.is_empty() {
        tracing::warn!("Rejected batch request with empty system or database kind");
        return bad_request(INVALID_SEARCH_PARAMS);
    }

    let range = match ScriptRange::new(request.inicio, request.fim) {
        Ok(range) => range,
        Err(error) => {
            tracing::warn!(error = %error, "Rejected batch request with invalid range");
            return bad_request(INVALID_SEARCH_PARAMS);
        }
    };

    let results = state
        .fetcher
        .fetch_batch(&request.sistema, &request.sgbd, range)
        .await;

    Json(BatchFetchResponse {
        sucesso: true,
        data: results.into_iter().map(ScriptResultBody::from).collect(),
    })
    .into_response()
}

/// `POST /api/fetch-script`: relay one script's content.
pub async fn fetch_script<H: HttpClient + 'static>(
    State(state): State<AppState<H>>,
    payload: Result<Json<FetchScriptRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected malformed fetch request");
            return bad_request(MISSING_URL);
        }
    };

    if request.url.is_empty() {
        return bad_request(MISSING_URL);
    }

    match state.fetcher.fetch_script(&request.url).await {
        Ok(content) => Json(ScriptContentResponse {
            sucesso: true,
            content,
        })
        .into_response(),
        Err(VolleyError::NotFound(_)) => fetch_failure(StatusCode::NOT_FOUND, SCRIPT_NOT_FOUND),
        Err(VolleyError::Timeout(_)) => {
            fetch_failure(StatusCode::INTERNAL_SERVER_ERROR, FETCH_TIMED_OUT)
        }
        Err(_) => fetch_failure(StatusCode::INTERNAL_SERVER_ERROR, FETCH_BLOCKED),
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn fetch_failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(FetchErrorResponse {
            sucesso: false,
            error: message.to_string(),
        }),
    )
        .into_response()
}
