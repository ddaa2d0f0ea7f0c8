// HTTP handlers for the sandbox API

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use super::AppState;
use crate::config::constants::{DEFAULT_HISTORY_LIMIT, SERVICE_NAME};
use crate::sandbox::{SandboxRequest, SandboxResult};
use crate::tools::EchoHandler;

/// Build the sandbox API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/execute", post(execute))
        .route("/v1/history", get(history))
        .route("/v1/tools", get(list_tools))
        .route("/v1/tools/register", post(register_tool))
        .with_state(state)
}

/// API-level errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Admission check rejected the request before dispatch.
    #[error("{0}")]
    Rejected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Rejected(reason) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": reason })),
            )
                .into_response(),
        }
    }
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "tools_registered": state.runner.tool_count(),
    }))
}

async fn execute(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SandboxRequest>,
) -> Result<Json<SandboxResult>, ApiError> {
    let (allowed, reason) = state.enforcer.check_allowed(&request);
    if !allowed {
        warn!(tool = %request.tool_name, "Request rejected at admission: {}", reason);
        return Err(ApiError::Rejected(reason));
    }

    if let Some(audit) = &state.audit {
        if let Err(e) = audit.log_start(&request) {
            warn!("Failed to write audit start event: {}", e);
        }
    }

    let agent_id = request.agent_id.clone();
    let result = state.runner.execute(request).await;

    if let Some(audit) = &state.audit {
        if let Err(e) = audit.log_result(&result, &agent_id) {
            warn!("Failed to write audit result event: {}", e);
        }
    }

    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    limit: Option<usize>,
}

async fn history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Json<Value> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    Json(json!({ "history": state.runner.get_history(limit) }))
}

async fn list_tools(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "tools": state.runner.tool_names() }))
}

/// Tool registration input.
#[derive(Debug, Deserialize)]
pub struct RegisterToolRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterToolResponse {
    pub registered: bool,
    pub tool_name: String,
    pub total_tools: usize,
}

/// Register a tool by name. Network callers cannot supply code, so the
/// registered handler is the echo implementation; real handlers are
/// registered in-process through the library API.
async fn register_tool(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RegisterToolRequest>,
) -> Json<RegisterToolResponse> {
    tracing::info!(tool = %input.name, description = %input.description, "Registering tool");
    state.runner.register_tool(input.name.clone(), Arc::new(EchoHandler));
    Json(RegisterToolResponse {
        registered: true,
        tool_name: input.name,
        total_tools: state.runner.tool_count(),
    })
}
