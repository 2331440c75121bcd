//! HTTP API for idea-forge
//!
//! Axum router exposing idea generation over JSON. Results are persisted per session so they can
//! be fetched again later.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::error::{IdeaForgeError, Result};
use crate::generator::IdeaGenerator;
use crate::model::{IdeaGenerationResult, InnovationSet};
use crate::store;

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub generator: Arc<IdeaGenerator>,
    pub results_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    #[serde(default)]
    pub innovation_sets: Vec<InnovationSet>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub session_id: String,
    pub result: IdeaGenerationResult,
}

impl IntoResponse for IdeaForgeError {
    fn into_response(self) -> Response {
        let status = match &self {
            IdeaForgeError::Validation { .. } => StatusCode::BAD_REQUEST,
            IdeaForgeError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self.to_json())).into_response()
    }
}

/// Health check endpoint
pub async fn health_handler(State(state): State<HttpState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "external_source": state.generator.source_name(),
    }))
}

pub async fn generate_handler(
    State(state): State<HttpState>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    if req.topic.trim().is_empty() {
        return IdeaForgeError::Validation {
            message: "topic must not be empty".into(),
        }
        .into_response();
    }

    let Some(result) = state.generator.generate(&req.innovation_sets, &req.topic).await else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "no_innovations",
                "message": "No innovation points were supplied, nothing to generate from",
            })),
        )
            .into_response();
    };

    let session_id = uuid::Uuid::new_v4().to_string();
    if let Err(e) = store::save_session(&result, &state.results_dir, &session_id) {
        tracing::error!(error = %e, "failed to persist generation result");
        return e.into_response();
    }

    (StatusCode::OK, Json(GenerateResponse { session_id, result })).into_response()
}

pub async fn results_handler(
    State(state): State<HttpState>,
    Path(session_id): Path<String>,
) -> Result<Json<IdeaGenerationResult>> {
    let result = store::load_session(&state.results_dir, &session_id)?;
    Ok(Json(result))
}

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/generate", post(generate_handler))
        .route("/api/results/:session_id", get(results_handler))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_http_server(state: HttpState, bind: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP listener: {}", e))?;

    tracing::info!("Starting HTTP server on {}", bind);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    Ok(())
}
