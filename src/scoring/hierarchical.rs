//! Hierarchical compatibility gate input (spec.md 4.2, 4.6).
//!
//! Not a `Scorer`: spec.md 4.5's weight tables sum to 1.000 over the
//! twelve named components without a `hierarchical` entry, so this
//! never contributes a weighted addend. The engine's hard-gate stage
//! (spec.md 4.6 step 6) calls [`evaluate`] directly and applies the
//! critical-mismatch cap from its `CompatibilityOutcome`.

use crate::hierarchy::{compatibility, CompatibilityOutcome, LevelDetector};
use crate::models::enums::HierarchicalLevel;
use crate::models::{CandidateProfile, JobPosting};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HierarchicalGateInput {
    pub candidate_level: HierarchicalLevel,
    pub job_level: HierarchicalLevel,
    pub candidate_confidence: f64,
    pub job_confidence: f64,
    pub outcome: CompatibilityOutcome,
}

/// Resolves both sides' level — preferring the job's structured
/// `required_level` when present — and computes their compatibility.
pub fn evaluate(candidate: &CandidateProfile, job: &JobPosting, detector: &LevelDetector) -> HierarchicalGateInput {
    let candidate_detection = detector.detect(&candidate.cv_text, candidate.years_total as f64, most_recent_team_size(candidate));
    let (job_level, job_confidence) = match job.requirements.required_level {
        Some(level) => (level, 1.0),
        None => {
            let years = job.requirements.min_years as f64;
            let detection = detector.detect(&job.text_for_level_detection(), years, None);
            (detection.level, detection.confidence)
        }
    };

    let outcome = compatibility(candidate_detection.level, job_level);

    HierarchicalGateInput {
        candidate_level: candidate_detection.level,
        job_level,
        candidate_confidence: candidate_detection.confidence,
        job_confidence,
        outcome,
    }
}

fn most_recent_team_size(candidate: &CandidateProfile) -> Option<u32> {
    candidate.experiences.first().and_then(|e| e.team_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_candidate, sample_job};

    #[test]
    fn evaluate_uses_job_required_level_when_present() {
        let candidate = sample_candidate();
        let job = sample_job();
        let detector = LevelDetector::new();
        let input = evaluate(&candidate, &job, &detector);
        assert_eq!(input.job_level, job.requirements.required_level.unwrap());
        assert_eq!(input.job_confidence, 1.0);
    }
}
