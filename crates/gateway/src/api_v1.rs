//! HTTP API v1.
//!
//! Endpoints:
//!
//! - `POST /v1/ask`             — Answer a query over masked messages
//! - `GET  /v1/modes`           — List modes and their personas
//! - `POST /v1/prompt/preview`  — Compile the prompt without calling the backend
//!
//! Failures of the ask pipeline map to `500 {"error": kind, "detail": ...}`.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use maskrag_agent::{AskRequest, AskResponse, PromptTemplate};
use maskrag_core::error::{CompletionError, Error};
use maskrag_core::mode::Mode;
use maskrag_core::prompt::Prompt;

use crate::SharedState;

/// Build the v1 API router. State is applied by the caller.
pub fn v1_router() -> Router<SharedState> {
    Router::new()
        .route("/ask", post(ask_handler))
        .route("/modes", get(modes_handler))
        .route("/prompt/preview", post(preview_handler))
}

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: Value,
}

/// A pipeline failure rendered as a JSON 500.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn detail(&self) -> Value {
        match &self.0 {
            Error::Completion(CompletionError::Upstream { body, .. }) => {
                serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone()))
            }
            Error::Completion(CompletionError::Transport { reason, .. }) => {
                Value::String(reason.clone())
            }
            Error::Fidelity { introduced } => {
                Value::Array(introduced.iter().cloned().map(Value::String).collect())
            }
            Error::Config { message } => Value::String(message.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.0.kind().into(),
            detail: self.detail(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

// ── Ask ───────────────────────────────────────────────────────────────────

pub(crate) async fn ask_handler(
    State(state): State<SharedState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    info!(
        mode = payload.mode.as_deref().unwrap_or(""),
        messages = payload.masked_messages.len(),
        "Ask request received"
    );
    let response = state.ask.handle(&payload).await?;
    Ok(Json(response))
}

// ── Modes ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ModeDto {
    pub mode: Mode,
    pub persona: String,
}

async fn modes_handler() -> Json<Vec<ModeDto>> {
    Json(
        PromptTemplate::ALL
            .iter()
            .map(|t| ModeDto {
                mode: t.mode(),
                persona: t.persona().into(),
            })
            .collect(),
    )
}

// ── Prompt preview ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub prompt: Prompt,
    pub mode_used: Mode,
    pub estimated_tokens: usize,
}

async fn preview_handler(
    State(state): State<SharedState>,
    Json(payload): Json<AskRequest>,
) -> Json<PreviewResponse> {
    let (prompt, mode_used) = state.ask.preview(
        &payload.user_query,
        payload.masked_messages.as_slice(),
        payload.mode.as_deref(),
    );
    let estimated_tokens = prompt.estimated_tokens();
    Json(PreviewResponse {
        prompt,
        mode_used,
        estimated_tokens,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────
