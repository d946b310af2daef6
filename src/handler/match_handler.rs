// handler/match_handler.rs
//! `GET /healthz` and `POST /v1/match` (spec.md 3), following the
//! teacher's `Extension<Arc<AppState>>` handler signature
//! (`handler/labour.rs`) rather than axum's `State` extractor.

use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::json;

use match_engine::models::MatchRequest;

use crate::service::MatchServiceError;
use crate::AppState;

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "match engine is running" }))
}

pub async fn match_candidate(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<MatchRequest>,
) -> Result<impl IntoResponse, MatchServiceError> {
    let result = state.match_service.match_candidate(&request).await?;
    Ok((StatusCode::OK, Json(result)))
}
