//! Salary scorer (spec.md 4.4): overlap between the candidate's desired
//! band `[desired*0.9, desired*1.1]` and the job's `[min, max]`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::enums::ComponentName;
use crate::models::result::ComponentScore;

use super::{build_score, Scorer, ScoringContext};

pub struct SalaryScorer;

#[async_trait]
impl Scorer for SalaryScorer {
    fn name(&self) -> ComponentName {
        ComponentName::Salary
    }

    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let start = std::time::Instant::now();
        let mut details = BTreeMap::new();

        let Some(desired) = ctx.candidate.compensation.desired_salary.as_ref().map(|m| m.to_f64())
        else {
            details.insert("reason".to_string(), Value::String("desired_salary_missing".into()));
            return build_score(self.name(), ctx.matrix, 0.5, 0.0, details, start.elapsed().as_millis() as u64);
        };

        let job_min = ctx.job.compensation.salary_min.to_f64();
        let job_max = ctx.job.compensation.salary_max.to_f64();
        let cand_min = desired * 0.9;
        let cand_max = desired * 1.1;

        let overlaps = cand_min <= job_max && job_min <= cand_max;
        let raw = if overlaps {
            let job_mid = (job_min + job_max) / 2.0;
            let normalized_distance = if desired.abs() > f64::EPSILON {
                (desired - job_mid).abs() / desired
            } else {
                0.0
            };
            (1.0 - normalized_distance).max(0.5)
        } else {
            let gap = if cand_max < job_min {
                job_min - cand_max
            } else {
                cand_min - job_max
            };
            let normalized_gap = if desired.abs() > f64::EPSILON { gap / desired } else { 1.0 };
            (1.0 - normalized_gap).max(0.0)
        };

        details.insert("desired_salary".to_string(), Value::from(desired));
        details.insert("job_salary_min".to_string(), Value::from(job_min));
        details.insert("job_salary_max".to_string(), Value::from(job_max));
        details.insert("overlaps".to_string(), Value::Bool(overlaps));

        build_score(self.name(), ctx.matrix, raw, 0.9, details, start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::LevelDetector;
    use crate::matrix::WeightMatrixRegistry;
    use crate::test_support::{fake_gateway, sample_candidate, sample_job};

    #[tokio::test]
    async fn overlapping_ranges_score_at_least_half() {
        let candidate = sample_candidate();
        let job = sample_job();
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = SalaryScorer.score(&ctx).await;
        assert!(result.raw_score >= 0.5);
    }

    #[tokio::test]
    async fn disjoint_ranges_score_below_half() {
        let mut candidate = sample_candidate();
        candidate.compensation.desired_salary = Some(crate::models::Money::from_i64(30_000));
        let job = sample_job();
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = SalaryScorer.score(&ctx).await;
        assert!(result.raw_score < 0.5);
    }
}
