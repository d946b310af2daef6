//! Sector compatibility scorer (spec.md 4.4): preferred/excluded sets
//! dominate, with a sector-proximity table as a tiebreaker for anything
//! in neither set.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::enums::ComponentName;
use crate::models::result::ComponentScore;

use super::{build_score, Scorer, ScoringContext};

fn proximity_table() -> &'static HashMap<(&'static str, &'static str), f64> {
    static TABLE: OnceLock<HashMap<(&'static str, &'static str), f64>> = OnceLock::new();
    TABLE.get_or_init(|| {
        HashMap::from([
            (("fintech", "banking"), 0.8),
            (("banking", "fintech"), 0.8),
            (("tech", "fintech"), 0.6),
            (("fintech", "tech"), 0.6),
            (("healthtech", "healthcare"), 0.75),
            (("healthcare", "healthtech"), 0.75),
            (("ecommerce", "retail"), 0.7),
            (("retail", "ecommerce"), 0.7),
        ])
    })
}

pub struct SectorScorer;

#[async_trait]
impl Scorer for SectorScorer {
    fn name(&self) -> ComponentName {
        ComponentName::Sector
    }

    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let start = std::time::Instant::now();
        let sector = ctx.job.sector.to_lowercase();
        let prefs = &ctx.candidate.sector_preferences;

        let preferred = prefs.preferred.iter().any(|s| s.to_lowercase() == sector);
        let excluded = prefs.excluded.iter().any(|s| s.to_lowercase() == sector);

        let mut details = BTreeMap::new();
        details.insert("preferred".to_string(), Value::Bool(preferred));
        details.insert("excluded".to_string(), Value::Bool(excluded));

        let raw = if preferred {
            1.0
        } else if excluded {
            0.0
        } else {
            let base = (0.4 + 0.1 * prefs.openness as f64).min(1.0);
            let proximity = prefs
                .preferred
                .iter()
                .filter_map(|p| proximity_table().get(&(p.to_lowercase().as_str(), sector.as_str())))
                .copied()
                .fold(0.0, f64::max);
            base.max(proximity)
        };

        build_score(self.name(), ctx.matrix, raw, 0.8, details, start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::LevelDetector;
    use crate::matrix::WeightMatrixRegistry;
    use crate::test_support::{fake_gateway, sample_candidate, sample_job};

    #[tokio::test]
    async fn excluded_sector_scores_zero() {
        let mut candidate = sample_candidate();
        candidate.sector_preferences.excluded.insert("defense".to_string());
        let mut job = sample_job();
        job.sector = "Defense".to_string();
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = SectorScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 0.0);
    }

    #[tokio::test]
    async fn preferred_sector_scores_one() {
        let mut candidate = sample_candidate();
        candidate.sector_preferences.preferred.insert("tech".to_string());
        let mut job = sample_job();
        job.sector = "Tech".to_string();
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = SectorScorer.score(&ctx).await;
        assert_eq!(result.raw_score, 1.0);
    }
}
