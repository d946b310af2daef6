//! Candidate status scorer (spec.md 4.4): a fixed lookup from
//! `CandidateStatus` to an urgency/readiness proxy. Actively-searching
//! candidates are the safest bet; students and freelancers carry more
//! process risk even when everything else about the match looks right.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::enums::{CandidateStatus, ComponentName};
use crate::models::result::ComponentScore;

use super::{build_score, Scorer, ScoringContext};

fn status_score(status: CandidateStatus) -> f64 {
    match status {
        CandidateStatus::ActivelySearching => 1.0,
        CandidateStatus::BetweenJobs => 0.8,
        CandidateStatus::Employed => 0.7,
        CandidateStatus::Freelancer => 0.6,
        CandidateStatus::Student => 0.5,
    }
}

pub struct CandidateStatusScorer;

#[async_trait]
impl Scorer for CandidateStatusScorer {
    fn name(&self) -> ComponentName {
        ComponentName::CandidateStatus
    }

    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let start = std::time::Instant::now();
        let raw = status_score(ctx.candidate.status);

        let mut details = BTreeMap::new();
        details.insert("status".to_string(), Value::String(format!("{:?}", ctx.candidate.status)));

        build_score(self.name(), ctx.matrix, raw, 1.0, details, start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::LevelDetector;
    use crate::matrix::WeightMatrixRegistry;
    use crate::test_support::{fake_gateway, sample_candidate, sample_job};

    #[tokio::test]
    async fn actively_searching_scores_one() {
        let mut candidate = sample_candidate();
        candidate.status = CandidateStatus::ActivelySearching;
        let job = sample_job();
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = CandidateStatusScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 1.0);
    }

    #[tokio::test]
    async fn student_scores_half() {
        let mut candidate = sample_candidate();
        candidate.status = CandidateStatus::Student;
        let job = sample_job();
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = CandidateStatusScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 0.5);
    }
}
