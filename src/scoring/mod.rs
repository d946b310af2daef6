//! Individual Scorers (C4, spec.md 4.4): twelve pure, independently
//! timed-out functions registered in a table keyed by `ComponentName`
//! (spec.md 9 — "deep class hierarchies for scorers" replaced with one
//! trait and plain implementations).

pub mod candidate_status;
pub mod contract;
pub mod experience;
pub mod hierarchical;
pub mod listening_reason;
pub mod location;
pub mod motivations;
pub mod salary;
pub mod salary_progression;
pub mod sector;
pub mod semantic;
pub mod timing;
pub mod work_modality;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use tokio_util::sync::CancellationToken;

use crate::geo::GeoGateway;
use crate::hierarchy::LevelDetector;
use crate::matrix::WeightMatrix;
use crate::models::enums::ComponentName;
use crate::models::result::ComponentScore;
use crate::models::{CandidateProfile, JobPosting};

/// Everything a scorer needs to compute its `ComponentScore`. Scorers
/// that never touch the network (every scorer but `location`) ignore
/// `geo`/`detector`/`cancel`.
pub struct ScoringContext<'a> {
    pub candidate: &'a CandidateProfile,
    pub job: &'a JobPosting,
    pub matrix: &'a WeightMatrix,
    pub geo: &'a GeoGateway,
    pub detector: &'a LevelDetector,
    /// Checked at the one await point a scorer has (the C1 call), so a
    /// cancelled request doesn't keep an in-flight geocode/route lookup
    /// running past the engine's deadline (spec.md 5 "MUST NOT dangle
    /// tasks past request completion").
    pub cancel: &'a CancellationToken,
}

#[async_trait]
pub trait Scorer: Send + Sync {
    fn name(&self) -> ComponentName;
    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore;
}

/// Bundles a raw scorer's `(raw_score, confidence, details)` output into
/// a complete `ComponentScore`, attaching the weight from the resolved
/// matrix and clamping out-of-range values per I3 — recording the
/// clamp in `details` rather than silently swallowing it.
pub fn build_score(
    name: ComponentName,
    matrix: &WeightMatrix,
    raw_score: f64,
    confidence: f64,
    mut details: BTreeMap<String, Value>,
    elapsed_ms: u64,
) -> ComponentScore {
    let clamped_raw = clamp_and_record(raw_score, &mut details, "raw_score");
    let clamped_confidence = clamp_and_record(confidence, &mut details, "confidence");
    let weight = matrix.weight(name);
    ComponentScore {
        name,
        raw_score: clamped_raw,
        weight,
        boost_applied: 0.0,
        weighted_score: clamped_raw * weight,
        confidence: clamped_confidence,
        details,
        elapsed_ms,
    }
}

fn clamp_and_record(value: f64, details: &mut BTreeMap<String, Value>, field: &str) -> f64 {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        details.insert(
            format!("{field}_clamped_from"),
            Value::from(if value.is_nan() { 0.0 } else { value }),
        );
        clamped
    } else {
        value
    }
}

/// The twelve weighted scorers, in `ComponentName::CANONICAL_ORDER` —
/// the fixed iteration order the engine sums in (spec.md 4.6 "Ordering
/// guarantees").
pub fn all_scorers() -> Vec<Box<dyn Scorer>> {
    vec![
        Box::new(semantic::SemanticScorer),
        Box::new(salary::SalaryScorer),
        Box::new(experience::ExperienceScorer),
        Box::new(location::LocationScorer),
        Box::new(motivations::MotivationsScorer),
        Box::new(sector::SectorScorer),
        Box::new(contract::ContractScorer),
        Box::new(timing::TimingScorer),
        Box::new(work_modality::WorkModalityScorer),
        Box::new(salary_progression::SalaryProgressionScorer),
        Box::new(listening_reason::ListeningReasonScorer),
        Box::new(candidate_status::CandidateStatusScorer),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_scorers_cover_the_canonical_order_exactly_once() {
        let scorers = all_scorers();
        let mut names: Vec<ComponentName> = scorers.iter().map(|s| s.name()).collect();
        names.sort_by_key(|n| n.as_str());
        let mut expected = ComponentName::CANONICAL_ORDER.to_vec();
        expected.sort_by_key(|n| n.as_str());
        assert_eq!(names, expected);
    }

    #[test]
    fn clamp_and_record_clamps_above_range_and_logs_it() {
        let mut details = BTreeMap::new();
        let clamped = clamp_and_record(1.4, &mut details, "raw_score");
        assert_eq!(clamped, 1.0);
        assert!(details.contains_key("raw_score_clamped_from"));
    }

    #[test]
    fn clamp_and_record_passes_through_in_range_values_untouched() {
        let mut details = BTreeMap::new();
        let clamped = clamp_and_record(0.42, &mut details, "raw_score");
        assert_eq!(clamped, 0.42);
        assert!(details.is_empty());
    }
}
