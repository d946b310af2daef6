//! Contract flexibility scorer (spec.md 4.4): looks up the job's
//! contract type in the candidate's preference ranking.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::enums::ComponentName;
use crate::models::result::ComponentScore;

use super::{build_score, Scorer, ScoringContext};

pub struct ContractScorer;

#[async_trait]
impl Scorer for ContractScorer {
    fn name(&self) -> ComponentName {
        ComponentName::Contract
    }

    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let start = std::time::Instant::now();
        let rank = ctx
            .candidate
            .contract_ranking
            .iter()
            .position(|c| *c == ctx.job.contract_type)
            .map(|idx| idx + 1);

        let raw = match rank {
            Some(1) => 1.0,
            Some(2) => 0.75,
            Some(3) => 0.5,
            Some(4) => 0.25,
            _ => 0.0,
        };

        let mut details = BTreeMap::new();
        if let Some(r) = rank {
            details.insert("rank".to_string(), Value::from(r));
        }

        build_score(self.name(), ctx.matrix, raw, 1.0, details, start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::LevelDetector;
    use crate::matrix::WeightMatrixRegistry;
    use crate::models::enums::ContractType;
    use crate::test_support::{fake_gateway, sample_candidate, sample_job};

    #[tokio::test]
    async fn top_ranked_contract_type_scores_one() {
        let mut candidate = sample_candidate();
        candidate.contract_ranking = vec![ContractType::Cdi, ContractType::Freelance];
        let mut job = sample_job();
        job.contract_type = ContractType::Cdi;
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = ContractScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 1.0);
    }

    #[tokio::test]
    async fn absent_contract_type_scores_zero() {
        let mut candidate = sample_candidate();
        candidate.contract_ranking = vec![ContractType::Cdi];
        let mut job = sample_job();
        job.contract_type = ContractType::Interim;
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = ContractScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 0.0);
    }
}
