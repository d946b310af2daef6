//! Work modality scorer (spec.md 4.4): exact match scores highest;
//! `HYBRID` against either side is a partial match with a remote-days
//! proximity bonus; `REMOTE` against `ON_SITE` is nearly disqualifying
//! unless the candidate actually lists `REMOTE` as a transport mode.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::enums::{ComponentName, TransportMode, WorkModality};
use crate::models::result::ComponentScore;

use super::{build_score, Scorer, ScoringContext};

pub struct WorkModalityScorer;

#[async_trait]
impl Scorer for WorkModalityScorer {
    fn name(&self) -> ComponentName {
        ComponentName::WorkModality
    }

    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let start = std::time::Instant::now();
        let candidate_modality = ctx.candidate.preferred_modality;
        let job_modality = ctx.job.modality_policy.modality;

        let days_proximity_bonus = if (ctx.candidate.remote_days_per_week as i32
            - ctx.job.modality_policy.remote_days_allowed as i32)
            .abs()
            <= 1
        {
            0.1
        } else {
            0.0
        };

        let raw = if candidate_modality == job_modality {
            1.0
        } else if candidate_modality == WorkModality::Hybrid || job_modality == WorkModality::Hybrid {
            0.7 + days_proximity_bonus
        } else {
            // ON_SITE vs REMOTE, in either direction.
            if ctx.candidate.mobility.transport_modes.contains(&TransportMode::Remote) {
                0.6
            } else {
                0.1
            }
        };

        let mut details = BTreeMap::new();
        details.insert("candidate_modality".to_string(), Value::String(format!("{candidate_modality:?}")));
        details.insert("job_modality".to_string(), Value::String(format!("{job_modality:?}")));

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
    async fn exact_match_scores_one() {
        let mut candidate = sample_candidate();
        candidate.preferred_modality = WorkModality::OnSite;
        let mut job = sample_job();
        job.modality_policy.modality = WorkModality::OnSite;
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = WorkModalityScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 1.0);
    }

    #[tokio::test]
    async fn remote_vs_on_site_without_remote_transport_scores_very_low() {
        let mut candidate = sample_candidate();
        candidate.preferred_modality = WorkModality::Remote;
        candidate.mobility.transport_modes.remove(&TransportMode::Remote);
        let mut job = sample_job();
        job.modality_policy.modality = WorkModality::OnSite;
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = WorkModalityScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 0.1);
    }
}
