// service/match_service.rs
//! Thin async facade the HTTP layer calls instead of touching `Engine`
//! directly — the same role the teacher's `service/matching_service.rs`
//! plays between `handler/labour.rs` and its own scoring logic.

use std::sync::Arc;

use match_engine::engine::Engine;
use match_engine::models::result::MatchResult;
use match_engine::models::MatchRequest;

use super::error::MatchServiceError;

#[derive(Clone)]
pub struct MatchService {
    engine: Arc<Engine>,
}

impl MatchService {
    pub fn new(engine: Arc<Engine>) -> Self {
        MatchService { engine }
    }

    pub async fn match_candidate(&self, request: &MatchRequest) -> Result<MatchResult, MatchServiceError> {
        self.engine
            .match_candidate(request)
            .await
            .map_err(MatchServiceError::from)
    }
}
