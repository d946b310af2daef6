//! Motivations scorer (spec.md 4.4): order-weighted intersection between
//! the candidate's motivation ranking and the job's.
//!
//! Each rank `k` (0-indexed) contributes weight `w(k) = 1 / (k + 1)`, so
//! a motivation both sides agree is top priority counts far more than
//! one buried at the bottom of either list. The raw score normalizes by
//! the maximum attainable sum (both lists identical) rather than by
//! list length, so a candidate with only two motivations listed isn't
//! penalized relative to one who listed all eight.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::enums::ComponentName;
use crate::models::result::ComponentScore;

use super::{build_score, Scorer, ScoringContext};

fn rank_weight(rank: usize) -> f64 {
    1.0 / (rank + 1) as f64
}

pub struct MotivationsScorer;

#[async_trait]
impl Scorer for MotivationsScorer {
    fn name(&self) -> ComponentName {
        ComponentName::Motivations
    }

    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let start = std::time::Instant::now();
        let candidate_ranks = &ctx.candidate.motivations;
        let job_ranks = &ctx.job.position_motivations;

        let mut matched = 0usize;
        let mut sum_score = 0.0;
        for (c_rank, motivation) in candidate_ranks.iter().enumerate() {
            if let Some(j_rank) = job_ranks.iter().position(|m| m == motivation) {
                sum_score += rank_weight(c_rank) * rank_weight(j_rank);
                matched += 1;
            }
        }

        let max_possible: f64 = candidate_ranks
            .iter()
            .enumerate()
            .map(|(rank, _)| rank_weight(rank).powi(2))
            .sum();

        let raw = if max_possible > 0.0 {
            (sum_score / max_possible).clamp(0.0, 1.0)
        } else {
            0.5
        };

        let confidence = if candidate_ranks.is_empty() || job_ranks.is_empty() {
            0.3
        } else {
            0.85
        };

        let mut details = BTreeMap::new();
        details.insert("matched_count".to_string(), Value::from(matched));

        build_score(self.name(), ctx.matrix, raw, confidence, details, start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::LevelDetector;
    use crate::matrix::WeightMatrixRegistry;
    use crate::models::enums::Motivation;
    use crate::test_support::{fake_gateway, sample_candidate, sample_job};

    #[tokio::test]
    async fn identical_top_priority_scores_one() {
        let mut candidate = sample_candidate();
        candidate.motivations = vec![Motivation::Growth];
        let mut job = sample_job();
        job.position_motivations = vec![Motivation::Growth];
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = MotivationsScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 1.0);
    }

    #[tokio::test]
    async fn disjoint_lists_score_zero() {
        let mut candidate = sample_candidate();
        candidate.motivations = vec![Motivation::Growth];
        let mut job = sample_job();
        job.position_motivations = vec![Motivation::Stability];
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = MotivationsScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 0.0);
    }
}
