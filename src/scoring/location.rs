//! Location scorer (spec.md 4.4): delegates to the Transport Pre-Filter
//! (C3). The only one of the twelve scorers with a suspension point
//! (spec.md 5 "Suspension points").

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::enums::ComponentName;
use crate::models::result::ComponentScore;
use crate::transport::TransportPreFilter;

use super::{build_score, Scorer, ScoringContext};

pub struct LocationScorer;

#[async_trait]
impl Scorer for LocationScorer {
    fn name(&self) -> ComponentName {
        ComponentName::Location
    }

    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let start = std::time::Instant::now();
        let prefilter = TransportPreFilter::new(ctx.geo);
        let evaluation = prefilter.evaluate(
            &ctx.candidate.home_address,
            &ctx.job.location,
            &ctx.candidate.mobility.transport_modes,
            &ctx.candidate.mobility.max_travel_time_min,
        );

        let outcome = tokio::select! {
            outcome = evaluation => outcome,
            _ = ctx.cancel.cancelled() => {
                let mut details = BTreeMap::new();
                details.insert("reason".to_string(), Value::String("request_cancelled".into()));
                return build_score(self.name(), ctx.matrix, 0.5, 0.0, details, start.elapsed().as_millis() as u64);
            }
        };

        let confidence = if outcome.reason.is_some() { 0.4 } else { 1.0 };

        let mut details = BTreeMap::new();
        details.insert("feasible".to_string(), Value::Bool(outcome.feasible));
        if let Some(mode) = outcome.best_mode {
            details.insert("best_mode".to_string(), Value::String(format!("{mode:?}")));
        }
        if let Some(minutes) = outcome.best_time_min {
            details.insert("best_time_min".to_string(), Value::from(minutes));
        }
        if let Some(reason) = outcome.reason {
            details.insert("reason".to_string(), Value::String(reason.to_string()));
        }

        build_score(
            self.name(),
            ctx.matrix,
            outcome.location_sub_score,
            confidence,
            details,
            start.elapsed().as_millis() as u64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::LevelDetector;
    use crate::matrix::WeightMatrixRegistry;
    use crate::test_support::{fake_gateway, sample_candidate, sample_job};

    #[tokio::test]
    async fn short_commute_within_budget_scores_above_zero() {
        let candidate = sample_candidate();
        let job = sample_job();
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = LocationScorer.score(&ctx).await;
        assert!(result.raw_score > 0.0);
    }
}
