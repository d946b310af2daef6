// service/error.rs
//! Bridges `match_engine::engine::EngineError` to the HTTP error
//! envelope, the same role the teacher's `service/error.rs::ServiceError`
//! plays between its services and `handler/*.rs`.

use axum::response::{IntoResponse, Response};

use match_engine::engine::EngineError;
use match_engine::error::HttpError;

#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("engine is at capacity, try again shortly")]
    Busy,
}

impl From<EngineError> for MatchServiceError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidRequest(message) => MatchServiceError::InvalidRequest(message),
            EngineError::Busy => MatchServiceError::Busy,
        }
    }
}

impl IntoResponse for MatchServiceError {
    fn into_response(self) -> Response {
        match self {
            MatchServiceError::InvalidRequest(message) => HttpError::bad_request(message).into_response(),
            MatchServiceError::Busy => {
                HttpError::too_many_requests("engine is at capacity, try again shortly").into_response()
            }
        }
    }
}
