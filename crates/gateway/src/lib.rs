//! HTTP API gateway for MaskRAG.
//!
//! Exposes the ask operation over JSON, plus health, mode listing and a
//! prompt preview for debugging templates without calling the backend.
//!
//! Built on Axum. Every request gets an `x-request-id` (echoed when the
//! caller sends one) that is attached to its tracing span.

pub mod api_v1;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::{Request, State},
    http::HeaderValue,
    middleware::{self, Next},
    response::{Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{Instrument, info, info_span};

use maskrag_agent::AskService;
use maskrag_config::AppConfig;
use maskrag_core::provider::Provider;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared application state for the gateway.
pub struct GatewayState {
    pub ask: Arc<AskService>,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

impl GatewayState {
    pub fn new(ask: Arc<AskService>) -> Self {
        Self {
            ask,
            start_time: chrono::Utc::now(),
        }
    }
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
///
/// `POST /ask` is kept at the root for existing clients; the same handler
/// is mounted under `/v1` next to the other API routes.
pub fn build_router(state: SharedState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ask", post(api_v1::ask_handler))
        .nest("/v1", api_v1::v1_router())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Refuses to start without a credential: every ask would fail upstream.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.require_api_key()?;

    let provider = maskrag_providers::build_from_config(&config)?;
    let provider_name = provider.name().to_string();
    let ask = AskService::new(Arc::new(provider)).with_fidelity(config.fidelity.policy);
    let state = Arc::new(GatewayState::new(Arc::new(ask)));

    let app = build_router(state, config.gateway.max_body_bytes);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        addr = %addr,
        provider = %provider_name,
        model = %config.model,
        fidelity = ?config.fidelity.policy,
        "MaskRAG gateway listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Attach a request id to the span and the response.
async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path()
    );

    let mut response = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

// --- Handlers ---

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub provider: String,
    pub model: String,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = chrono::Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;
    let provider = state.ask.provider();

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_secs: uptime,
        provider: provider.name().into(),
        model: provider.model().into(),
    })
}

#[cfg(test)]
pub(crate) mod test_helpers;
