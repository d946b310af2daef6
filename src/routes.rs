// routes.rs
//! Router assembly (spec.md 3), mirroring the teacher's `routes.rs`
//! shape: CORS + trace layers wrapped around `Extension`-fed handlers.

use std::sync::Arc;

use axum::{
    http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler::{health_check, match_candidate};
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    Router::new()
        .route("/healthz", get(health_check))
        .route("/v1/match", post(match_candidate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}
