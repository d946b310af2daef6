//! Timing compatibility scorer (spec.md 4.4).
//!
//! `gap_weeks = job.desired_start − (candidate.availability +
//! notice_period)`, exactly as spec.md 4.4 defines it: a non-positive
//! gap means the job's desired start already falls at or before the
//! candidate's earliest possible join date, the best case. Weeks beyond
//! the candidate's `flexibility_weeks` but still inside the job's
//! `max_wait_weeks` decay linearly; beyond that, floor at 0.1.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::enums::ComponentName;
use crate::models::result::ComponentScore;

use super::{build_score, Scorer, ScoringContext};

const OVER_FLEXIBILITY_DECAY: f64 = 0.02;

pub struct TimingScorer;

#[async_trait]
impl Scorer for TimingScorer {
    fn name(&self) -> ComponentName {
        ComponentName::Timing
    }

    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let start = std::time::Instant::now();
        let mut details = BTreeMap::new();

        let Some(desired_start) = ctx.job.timing.desired_start_date else {
            details.insert("reason".to_string(), Value::String("job_has_no_desired_start_date".into()));
            return build_score(self.name(), ctx.matrix, 0.8, 0.3, details, start.elapsed().as_millis() as u64);
        };

        let availability = ctx.candidate.timing.availability_date
            + chrono::Duration::weeks(ctx.candidate.timing.notice_period_weeks as i64);
        let gap_weeks = (desired_start - availability).num_weeks() as f64;

        let raw = if gap_weeks <= 0.0 {
            1.0
        } else if gap_weeks <= ctx.candidate.timing.flexibility_weeks as f64 {
            0.8
        } else {
            let max_wait = ctx.job.timing.max_wait_weeks.unwrap_or(u32::MAX) as f64;
            if gap_weeks <= max_wait {
                let weeks_over = gap_weeks - ctx.candidate.timing.flexibility_weeks as f64;
                (0.5 - OVER_FLEXIBILITY_DECAY * weeks_over).max(0.1)
            } else {
                0.1
            }
        };

        details.insert("gap_weeks".to_string(), Value::from(gap_weeks));

        build_score(self.name(), ctx.matrix, raw, 0.9, details, start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::LevelDetector;
    use crate::matrix::WeightMatrixRegistry;
    use crate::test_support::{fake_gateway, sample_candidate, sample_job};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn non_positive_gap_scores_one() {
        let candidate = sample_candidate();
        let mut job = sample_job();
        job.timing.desired_start_date = Some(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = TimingScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 1.0);
    }

    #[tokio::test]
    async fn gap_far_beyond_max_wait_floors_at_point_one() {
        let candidate = sample_candidate();
        let mut job = sample_job();
        job.timing.desired_start_date = Some(NaiveDate::from_ymd_opt(2028, 1, 1).unwrap());
        job.timing.max_wait_weeks = Some(4);
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = TimingScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 0.1);
    }
}
