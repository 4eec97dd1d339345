//! Wire types for the relay API.
//!
//! Field names are kept verbatim from the service this relay replaced
//! (Portuguese), since deployed frontends depend on them.

use serde::{Deserialize, Serialize};

use crate::domain::ScriptResult;

/// Body of a batch fetch request: system, database kind, inclusive range.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchFetchRequest {
    pub sistema: String,
    pub sgbd: String,
    pub inicio: u32,
    pub fim: u32,
}

/// Body of a single-script fetch request.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchScriptRequest {
    pub url: String,
}

/// Successful batch response: one entry per requested number, in order.
#[derive(Debug, Serialize)]
pub struct BatchFetchResponse {
    pub sucesso: bool,
    pub data: Vec<ScriptResultBody>,
}

/// One classified script outcome on the wire.
///
/// `url` and `conteudo` are present only for available scripts.
#[derive(Debug, Serialize)]
pub struct ScriptResultBody {
    pub numero: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conteudo: Option<String>,
}

impl From<ScriptResult> for ScriptResultBody {
    fn from(result: ScriptResult) -> Self {
        let numero = result.number.to_string();
        let status = result.status.to_string();
        let url = result.status.is_available().then_some(result.url);
        ScriptResultBody {
            numero,
            url,
            status,
            conteudo: result.body,
        }
    }
}

/// Successful single-script response.
#[derive(Debug, Serialize)]
pub struct ScriptContentResponse {
    pub sucesso: bool,
    pub content: String,
}

/// Classified single-script failure.
#[derive(Debug, Serialize)]
pub struct FetchErrorResponse {
    pub sucesso: bool,
    pub error: String,
}

/// Validation failure payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
