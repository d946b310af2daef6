//! Listening reason consistency scorer (spec.md 4.4): checks whether
//! the candidate's stated reason for being on the market is actually
//! borne out by the rest of the job/candidate comparison. A candidate
//! who says they're leaving for `COMPENSATION_LOW` but is being offered
//! a pay cut gets flagged as inconsistent rather than taken at face
//! value — this scorer is a sanity check, not a pure preference match.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::enums::{CandidateStatus, ComponentName, ListeningReason, WorkModality};
use crate::models::result::ComponentScore;

use super::{build_score, Scorer, ScoringContext};

const CONSISTENT: f64 = 1.0;
const INCONSISTENT: f64 = 0.5;

fn title_tokens(title: &str) -> std::collections::BTreeSet<String> {
    title.to_lowercase().split_whitespace().map(str::to_string).collect()
}

fn check(reason: ListeningReason, ctx: &ScoringContext<'_>) -> (f64, &'static str) {
    match reason {
        ListeningReason::CompensationLow => {
            let midpoint = (ctx.job.compensation.salary_min.to_f64() + ctx.job.compensation.salary_max.to_f64()) / 2.0;
            match &ctx.candidate.compensation.current_salary {
                Some(current) if midpoint > current.to_f64() => (CONSISTENT, "job_pays_above_current"),
                Some(_) => (INCONSISTENT, "job_does_not_improve_on_current_salary"),
                None => (CONSISTENT, "no_current_salary_on_file"),
            }
        }
        ListeningReason::RoleMismatch => {
            let candidate_tokens = title_tokens(&ctx.candidate.current_title);
            let job_tokens = title_tokens(&ctx.job.title);
            let overlap = candidate_tokens.intersection(&job_tokens).count();
            if overlap < candidate_tokens.len().min(job_tokens.len()) {
                (CONSISTENT, "title_differs_from_current_role")
            } else {
                (INCONSISTENT, "title_matches_current_role_closely")
            }
        }
        ListeningReason::GrowthLack => {
            if ctx.candidate.motivations.contains(&crate::models::enums::Motivation::Growth) {
                (CONSISTENT, "growth_listed_among_motivations")
            } else {
                (INCONSISTENT, "growth_not_among_stated_motivations")
            }
        }
        ListeningReason::FlexibilityLack => {
            if ctx.candidate.preferred_modality != WorkModality::OnSite {
                (CONSISTENT, "candidate_prefers_non_on_site")
            } else {
                (INCONSISTENT, "candidate_prefers_on_site_modality")
            }
        }
        ListeningReason::ManagementIssues => {
            let had_management = ctx
                .candidate
                .experiences
                .iter()
                .any(|e| e.management_level.is_some());
            if had_management {
                (CONSISTENT, "past_experience_included_management_scope")
            } else {
                (INCONSISTENT, "no_past_management_scope_on_file")
            }
        }
        ListeningReason::MarketCuriosity => {
            if ctx.candidate.status == CandidateStatus::Employed {
                (CONSISTENT, "currently_employed_and_just_exploring")
            } else {
                (INCONSISTENT, "not_currently_employed")
            }
        }
        ListeningReason::LocationIssue | ListeningReason::GeneralDissatisfaction => {
            (CONSISTENT, "catch_all_reason_assumed_consistent")
        }
    }
}

pub struct ListeningReasonScorer;

#[async_trait]
impl Scorer for ListeningReasonScorer {
    fn name(&self) -> ComponentName {
        ComponentName::ListeningReason
    }

    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let start = std::time::Instant::now();
        let mut details = BTreeMap::new();

        let Some(reason) = ctx.candidate.primary_listening_reason() else {
            details.insert("reason".to_string(), Value::String("no_listening_reason_on_file".into()));
            return build_score(self.name(), ctx.matrix, 0.5, 0.2, details, start.elapsed().as_millis() as u64);
        };

        let (raw, explanation) = check(reason, ctx);
        details.insert("listening_reason".to_string(), Value::String(format!("{reason:?}")));
        details.insert("explanation".to_string(), Value::String(explanation.into()));

        build_score(self.name(), ctx.matrix, raw, 0.6, details, start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::LevelDetector;
    use crate::matrix::WeightMatrixRegistry;
    use crate::models::money::Money;
    use crate::test_support::{fake_gateway, sample_candidate, sample_job};

    #[tokio::test]
    async fn compensation_low_consistent_when_job_pays_more() {
        let mut candidate = sample_candidate();
        candidate.listening_reasons = vec![ListeningReason::CompensationLow];
        candidate.compensation.current_salary = Some(Money::from_i64(40_000));
        let mut job = sample_job();
        job.compensation.salary_min = Money::from_i64(60_000);
        job.compensation.salary_max = Money::from_i64(70_000);
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = ListeningReasonScorer.score(&ctx).await;
        assert_eq!(result.raw_score, CONSISTENT);
    }

    #[tokio::test]
    async fn compensation_low_inconsistent_when_job_pays_less() {
        let mut candidate = sample_candidate();
        candidate.listening_reasons = vec![ListeningReason::CompensationLow];
        candidate.compensation.current_salary = Some(Money::from_i64(90_000));
        let mut job = sample_job();
        job.compensation.salary_min = Money::from_i64(60_000);
        job.compensation.salary_max = Money::from_i64(70_000);
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = tokio_util::sync::CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let result = ListeningReasonScorer.score(&ctx).await;
        assert_eq!(result.raw_score, INCONSISTENT);
    }
}
