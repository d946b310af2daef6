//! Experience scorer (spec.md 4.4): full score inside `[min_years,
//! max_years]`, linear decay outside at 0.1/year, with an extra
//! 0.05/year overqualification penalty stacked on top beyond `max_years`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::enums::ComponentName;
use crate::models::result::ComponentScore;

use super::{build_score, Scorer, ScoringContext};

const UNDER_MIN_SLOPE: f64 = 0.1;
const OVER_MAX_SLOPE: f64 = 0.1;
const OVERQUALIFICATION_SLOPE: f64 = 0.05;

pub struct ExperienceScorer;

#[async_trait]
impl Scorer for ExperienceScorer {
    fn name(&self) -> ComponentName {
        ComponentName::Experience
    }

    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let start = std::time::Instant::now();
        let years = ctx.candidate.years_total as f64;
        let min_years = ctx.job.requirements.min_years as f64;
        let max_years = ctx.job.requirements.max_years.map(|y| y as f64);

        let raw = if years < min_years {
            1.0 - UNDER_MIN_SLOPE * (min_years - years)
        } else if let Some(max) = max_years {
            if years > max {
                let over = years - max;
                1.0 - (OVER_MAX_SLOPE + OVERQUALIFICATION_SLOPE) * over
            } else {
                1.0
            }
        } else {
            1.0
        };

        let mut details = BTreeMap::new();
        details.insert("candidate_years".to_string(), Value::from(years));
        details.insert("min_years".to_string(), Value::from(min_years));
        if let Some(max) = max_years {
            details.insert("max_years".to_string(), Value::from(max));
        }

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
    async fn within_band_scores_perfectly() {
        let mut candidate = sample_candidate();
        candidate.years_total = 6;
        let job = sample_job();
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = ExperienceScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 1.0);
    }

    #[tokio::test]
    async fn far_over_max_years_decays_and_clamps_at_zero() {
        let mut candidate = sample_candidate();
        candidate.years_total = 30;
        let job = sample_job();
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = ExperienceScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 0.0);
    }
}
