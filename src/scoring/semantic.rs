//! Semantic scorer (spec.md 4.4): Jaccard-flavored skill overlap,
//! required skills weighted above preferred, with a curated synonym
//! table for partial matches (spec.md 9 — synonym table contents are an
//! out-of-scope configuration input; this is a representative seed set).

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::enums::ComponentName;
use crate::models::result::ComponentScore;

use super::{build_score, Scorer, ScoringContext};

const REQUIRED_WEIGHT: f64 = 0.7;
const PREFERRED_WEIGHT: f64 = 0.3;

fn synonym_table() -> &'static HashMap<&'static str, Vec<&'static str>> {
    static TABLE: OnceLock<HashMap<&'static str, Vec<&'static str>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        HashMap::from([
            ("javascript", vec!["js", "node", "nodejs", "typescript"]),
            ("typescript", vec!["ts", "javascript"]),
            ("python", vec!["django", "flask", "fastapi"]),
            ("postgres", vec!["postgresql", "psql"]),
            ("golang", vec!["go"]),
            ("kubernetes", vec!["k8s"]),
            ("aws", vec!["amazon web services"]),
            ("rust", vec!["rustlang"]),
        ])
    })
}

fn candidate_has_skill(candidate_skills: &std::collections::BTreeSet<String>, required: &str) -> bool {
    if candidate_skills.contains(required) {
        return true;
    }
    synonym_table()
        .get(required)
        .map(|syns| syns.iter().any(|s| candidate_skills.contains(*s)))
        .unwrap_or(false)
}

pub struct SemanticScorer;

#[async_trait]
impl Scorer for SemanticScorer {
    fn name(&self) -> ComponentName {
        ComponentName::Semantic
    }

    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let start = std::time::Instant::now();
        let candidate_skills: std::collections::BTreeSet<String> = ctx
            .candidate
            .skills
            .iter()
            .map(|s| s.to_lowercase())
            .collect();

        let required = &ctx.job.requirements.required_skills;
        let preferred = &ctx.job.requirements.preferred_skills;

        let required_matched = required
            .iter()
            .filter(|s| candidate_has_skill(&candidate_skills, &s.to_lowercase()))
            .count();
        let preferred_matched = preferred
            .iter()
            .filter(|s| candidate_has_skill(&candidate_skills, &s.to_lowercase()))
            .count();

        let required_score = if required.is_empty() {
            1.0
        } else {
            required_matched as f64 / required.len() as f64
        };
        let preferred_score = if preferred.is_empty() {
            1.0
        } else {
            preferred_matched as f64 / preferred.len() as f64
        };

        let raw = required_score * REQUIRED_WEIGHT + preferred_score * PREFERRED_WEIGHT;

        let confidence = if required.is_empty() && preferred.is_empty() {
            0.3
        } else {
            0.9
        };

        let mut details = BTreeMap::new();
        details.insert("required_matched".to_string(), Value::from(required_matched));
        details.insert("required_total".to_string(), Value::from(required.len()));
        details.insert("preferred_matched".to_string(), Value::from(preferred_matched));
        details.insert("preferred_total".to_string(), Value::from(preferred.len()));

        build_score(
            self.name(),
            ctx.matrix,
            raw,
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
    use crate::test_support::{sample_candidate, sample_job};

    #[tokio::test]
    async fn perfect_required_skill_overlap_scores_highly() {
        let mut candidate = sample_candidate();
        candidate.skills = ["python", "postgres"].iter().map(|s| s.to_string()).collect();
        let mut job = sample_job();
        job.requirements.required_skills = ["python", "postgres"].iter().map(|s| s.to_string()).collect();
        job.requirements.preferred_skills.clear();

        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = crate::test_support::fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext {
            candidate: &candidate,
            job: &job,
            matrix,
            geo: &geo,
            detector: &detector,
            cancel: &cancel,
        };

        let result = SemanticScorer.score(&ctx).await;
        assert!(result.raw_score >= 0.69);
    }

    #[tokio::test]
    async fn synonym_match_counts_toward_required_skills() {
        let mut candidate = sample_candidate();
        candidate.skills = ["js"].iter().map(|s| s.to_string()).collect();
        let mut job = sample_job();
        job.requirements.required_skills = ["javascript"].iter().map(|s| s.to_string()).collect();
        job.requirements.preferred_skills.clear();

        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = crate::test_support::fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext {
            candidate: &candidate,
            job: &job,
            matrix,
            geo: &geo,
            detector: &detector,
            cancel: &cancel,
        };

        let result = SemanticScorer.score(&ctx).await;
        assert!(result.raw_score > 0.5);
    }
}
