//! `Engine` (C6, spec.md 4.6): the orchestration entry point. Resolves a
//! weight matrix (C5), fans out to the twelve scorers (C4, some of
//! which call C1/C3), applies hard gates (C2/C3 inputs), and asks C7
//! to attach diagnostics.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::diagnostics::DiagnosticsBuilder;
use crate::geo::GeoGateway;
use crate::hierarchy::LevelDetector;
use crate::matrix::{WeightMatrix, WeightMatrixRegistry};
use crate::models::enums::ComponentName;
use crate::models::result::MatchResult;
use crate::models::MatchRequest;
use crate::scoring::{all_scorers, hierarchical, Scorer, ScoringContext};
use crate::transport::TransportPreFilter;

use super::gates;
use super::scheduler;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("engine is at capacity, try again shortly")]
    Busy,
}

/// Back-pressure (spec.md 5): `try_acquire` failure returns `Busy`
/// rather than queuing, the same posture as the teacher's
/// `RateLimiter::is_allowed` returning `false` rather than blocking.
pub struct Engine {
    geo: GeoGateway,
    matrices: WeightMatrixRegistry,
    detector: LevelDetector,
    scorers: Vec<Box<dyn Scorer>>,
    semaphore: Semaphore,
    deadline_total: Duration,
    deadline_per_scorer: Duration,
}

impl Engine {
    pub fn new(
        geo: GeoGateway,
        matrices: WeightMatrixRegistry,
        detector: LevelDetector,
        concurrency_limit: usize,
        deadline_total: Duration,
        deadline_per_scorer: Duration,
    ) -> Self {
        Engine {
            geo,
            matrices,
            detector,
            scorers: all_scorers(),
            semaphore: Semaphore::new(concurrency_limit),
            deadline_total,
            deadline_per_scorer,
        }
    }

    pub fn validate(request: &MatchRequest) -> Result<(), EngineError> {
        if request.candidate.mobility.transport_modes.is_empty() {
            return Err(EngineError::InvalidRequest(
                "candidate must list at least one transport mode".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn match_candidate(&self, request: &MatchRequest) -> Result<MatchResult, EngineError> {
        Self::validate(request)?;
        let _permit = self.semaphore.try_acquire().map_err(|_| EngineError::Busy)?;

        let start = Instant::now();
        let cancel = CancellationToken::new();
        let _drop_guard = cancel.clone().drop_guard();

        tracing::debug!(
            candidate_id = %request.candidate.id,
            job_id = %request.job.id,
            "match_candidate started"
        );

        let listening_reason = request.effective_listening_reason();
        let matrix = self.matrices.resolve(listening_reason);

        let mut result = match tokio::time::timeout(self.deadline_total, self.run(request, matrix, &cancel)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                cancel.cancel();
                tracing::warn!(
                    candidate_id = %request.candidate.id,
                    job_id = %request.job.id,
                    "global deadline exceeded before scorers/gate returned, returning neutral partial result"
                );
                neutral_result(matrix, listening_reason)
            }
        };

        result.total_elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            candidate_id = %request.candidate.id,
            job_id = %request.job.id,
            total_score = result.total_score,
            elapsed_ms = result.total_elapsed_ms,
            "match_candidate finished"
        );
        Ok(result)
    }

    /// Runs the twelve scorers (each already bounded by its own
    /// per-scorer deadline, scheduler.rs) concurrently with the
    /// transport hard gate, which is the one input that can legitimately
    /// run long (C1's geocode retry/backoff loop is bounded only by
    /// `deadline_total`, not `deadline_per_scorer`). Neither side being
    /// slow costs the other anything: spec.md I5's "best-effort partial
    /// scores" means a slow gate must never discard already-finished
    /// scorer output.
    async fn run(&self, request: &MatchRequest, matrix: &WeightMatrix, cancel: &CancellationToken) -> MatchResult {
        let hierarchical_input = hierarchical::evaluate(&request.candidate, &request.job, &self.detector);

        let ctx = ScoringContext {
            candidate: &request.candidate,
            job: &request.job,
            matrix,
            geo: &self.geo,
            detector: &self.detector,
            cancel,
        };

        let (mut scores, transport) = tokio::join!(
            scheduler::run_scorers(&self.scorers, &ctx, self.deadline_per_scorer),
            self.evaluate_transport_gate(request),
        );
        scores.sort_by_key(|s| {
            ComponentName::CANONICAL_ORDER
                .iter()
                .position(|&c| c == s.name)
                .unwrap()
        });

        let raw_total: f64 = scores.iter().map(|s| s.weighted_score).sum();
        let confidence = scores.iter().map(|s| s.confidence * s.weight).sum::<f64>();
        let deadline_exceeded = transport.reason == Some("gate_deadline_exceeded")
            || scores.iter().any(|s| s.details.get("timeout") == Some(&serde_json::Value::Bool(true)));

        let gate_outcome = gates::apply(raw_total, request.hard_gate_mode, &hierarchical_input, &transport, &scores);
        let diagnostics = DiagnosticsBuilder::build(&scores, &gate_outcome.alerts);

        MatchResult {
            total_score: gate_outcome.total,
            confidence,
            listening_reason_used: request.effective_listening_reason(),
            matrix_id: matrix.id.clone(),
            component_scores: scores,
            alerts: gate_outcome.alerts,
            top_contributors: diagnostics.top_contributors,
            strengths: diagnostics.strengths,
            weaknesses: diagnostics.weaknesses,
            suggestions: diagnostics.suggestions,
            total_elapsed_ms: 0,
            hard_gate_triggered: gate_outcome.triggered,
            deadline_exceeded,
        }
    }

    /// Races the transport pre-filter (C3) against `deadline_total`: a
    /// geocode/route call stuck in C1's retry loop falls back to a
    /// neutral-feasible outcome rather than blocking the whole request,
    /// while the location scorer (bounded by `deadline_per_scorer`)
    /// reports its own `confidence=0` independently (spec.md 8 S5).
    async fn evaluate_transport_gate(&self, request: &MatchRequest) -> crate::transport::TransportOutcome {
        let prefilter = TransportPreFilter::new(&self.geo);
        match tokio::time::timeout(
            self.deadline_total,
            prefilter.evaluate(
                &request.candidate.home_address,
                &request.job.location,
                &request.candidate.mobility.transport_modes,
                &request.candidate.mobility.max_travel_time_min,
            ),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(
                    candidate_id = %request.candidate.id,
                    job_id = %request.job.id,
                    "transport gate exceeded the global deadline, treating commute as neutral feasible"
                );
                crate::transport::TransportOutcome {
                    feasible: true,
                    best_mode: None,
                    best_time_min: None,
                    per_mode_scores: Default::default(),
                    location_sub_score: 0.5,
                    reason: Some("gate_deadline_exceeded"),
                }
            }
        }
    }
}

fn neutral_result(matrix: &WeightMatrix, listening_reason: Option<crate::models::enums::ListeningReason>) -> MatchResult {
    let scores = scheduler::neutral_scores(matrix);
    let total: f64 = scores.iter().map(|s| s.weighted_score).sum();
    MatchResult {
        total_score: total,
        confidence: 0.0,
        listening_reason_used: listening_reason,
        matrix_id: matrix.id.clone(),
        component_scores: scores,
        alerts: Vec::new(),
        top_contributors: Vec::new(),
        strengths: Vec::new(),
        weaknesses: Vec::new(),
        suggestions: Vec::new(),
        total_elapsed_ms: 0,
        hard_gate_triggered: None,
        deadline_exceeded: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::provider::FakeGeoProvider;
    use crate::models::enums::{
        AlertKind, CandidateStatus, CompanySize, ContractType, HardGateMode, HierarchicalLevel,
        ListeningReason, Motivation, TransportMode, WorkModality,
    };
    use crate::models::candidate::{Compensation, Experience, Mobility, SectorPreferences, Timing};
    use crate::models::job::{JobCompensation, JobModalityPolicy, JobRequirements, JobTiming};
    use crate::models::money::Money;
    use crate::models::{CandidateProfile, JobPosting, MatchRequest};
    use chrono::NaiveDate;
    use std::collections::{BTreeMap, BTreeSet};
    use uuid::Uuid;

    fn engine() -> Engine {
        Engine::new(
            GeoGateway::new(Arc::new(FakeGeoProvider::new()), 720, 1, 10_000, 100, Duration::from_millis(50)),
            WeightMatrixRegistry::load().unwrap(),
            LevelDetector::new(),
            128,
            Duration::from_millis(175),
            Duration::from_millis(30),
        )
    }

    fn happy_path_request() -> MatchRequest {
        let mut transport_modes = BTreeSet::new();
        transport_modes.insert(TransportMode::PublicTransport);
        let mut max_travel_time_min = BTreeMap::new();
        max_travel_time_min.insert(TransportMode::PublicTransport, 45);

        let candidate = CandidateProfile {
            id: Uuid::new_v4(),
            display_name: "Alex".into(),
            email: "alex@example.com".into(),
            skills: ["python", "django", "postgres"].iter().map(|s| s.to_string()).collect(),
            years_total: 6,
            experiences: vec![Experience {
                title: "Senior Backend Engineer".into(),
                company: "PrevCo".into(),
                sector: "Tech".into(),
                duration_months: 36,
                missions: vec![],
                achievements: vec![],
                technologies: vec!["python".into()],
                team_size: None,
                management_level: None,
            }],
            compensation: Compensation {
                current_salary: Some(Money::from_i64(58_000)),
                desired_salary: Some(Money::from_i64(65_000)),
            },
            home_address: "Paris".into(),
            mobility: Mobility { transport_modes, max_travel_time_min },
            contract_ranking: vec![ContractType::Cdi],
            preferred_modality: WorkModality::Hybrid,
            remote_days_per_week: 2,
            motivations: vec![Motivation::TechnicalChallenge],
            sector_preferences: SectorPreferences {
                preferred: BTreeSet::new(),
                excluded: BTreeSet::new(),
                openness: 3,
            },
            timing: Timing {
                availability_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                notice_period_weeks: 4,
                flexibility_weeks: 2,
                urgency: 3,
            },
            status: CandidateStatus::ActivelySearching,
            listening_reasons: vec![ListeningReason::CompensationLow],
            cv_text: "Senior Software Engineer with 6 years of Python experience".into(),
            current_title: "Senior Software Engineer".into(),
        };

        let job = JobPosting {
            id: Uuid::new_v4(),
            title: "Senior Backend Engineer".into(),
            company: "Acme".into(),
            sector: "Tech".into(),
            company_size: CompanySize::Midcap,
            location: "Paris".into(),
            requirements: JobRequirements {
                required_skills: ["python", "postgres"].iter().map(|s| s.to_string()).collect(),
                preferred_skills: BTreeSet::new(),
                min_years: 5,
                max_years: Some(8),
                required_level: Some(HierarchicalLevel::Senior),
            },
            compensation: JobCompensation {
                salary_min: Money::from_i64(60_000),
                salary_max: Money::from_i64(75_000),
            },
            contract_type: ContractType::Cdi,
            modality_policy: JobModalityPolicy { modality: WorkModality::Hybrid, remote_days_allowed: 2 },
            timing: JobTiming { desired_start_date: None, max_wait_weeks: Some(8), urgency: 3 },
            benefits: BTreeSet::new(),
            position_motivations: vec![Motivation::TechnicalChallenge],
            description_text: "We are looking for a senior backend engineer".into(),
        };

        MatchRequest {
            candidate,
            job,
            listening_reason_override: None,
            hard_gate_mode: HardGateMode::Strict,
        }
    }

    #[tokio::test]
    async fn s1_happy_match_scores_highly_with_no_critical_alerts() {
        let engine = engine();
        let request = happy_path_request();
        let result = engine.match_candidate(&request).await.unwrap();

        assert!(result.total_score >= 0.5, "total_score was {}", result.total_score);
        assert!(!result.alerts.iter().any(|a| a.severity == crate::models::enums::Severity::Critical));
        assert_eq!(result.component_scores.len(), 12);
    }

    #[tokio::test]
    async fn s2_hierarchical_critical_mismatch_caps_total_and_flags_overqualified() {
        let engine = engine();
        let mut request = happy_path_request();
        request.candidate.cv_text = "Chief Financial Officer, CFO, 15 years".into();
        request.candidate.current_title = "CFO".into();
        request.candidate.years_total = 15;
        request.job.requirements.required_level = Some(HierarchicalLevel::Junior);
        request.job.title = "Comptable General".into();

        let result = engine.match_candidate(&request).await.unwrap();

        assert!(result.total_score <= 0.40, "total_score was {}", result.total_score);
        assert!(result.alerts.iter().any(|a| a.kind == AlertKind::CriticalMismatch));
        assert!(result.alerts.iter().any(|a| a.kind == AlertKind::Overqualified));
    }

    #[tokio::test]
    async fn s3_transport_infeasible_caps_total_and_zeroes_location() {
        let engine = engine();
        let mut request = happy_path_request();
        request.candidate.home_address = "Meaux".into();
        request.job.location = "Roissy CDG".into();
        let mut max = BTreeMap::new();
        max.insert(TransportMode::PublicTransport, 45);
        request.candidate.mobility.max_travel_time_min = max;

        let result = engine.match_candidate(&request).await.unwrap();

        assert!(result.total_score <= 0.25, "total_score was {}", result.total_score);
        assert!(result.alerts.iter().any(|a| a.kind == AlertKind::TransportInfeasible));
        let location = result
            .component_scores
            .iter()
            .find(|s| s.name == ComponentName::Location)
            .unwrap();
        assert_eq!(location.raw_score, 0.0);
    }

    #[tokio::test]
    async fn advisory_mode_never_caps_even_on_critical_mismatch() {
        let engine = engine();
        let mut request = happy_path_request();
        request.hard_gate_mode = HardGateMode::Advisory;
        request.candidate.cv_text = "Chief Financial Officer, CFO, 15 years".into();
        request.candidate.years_total = 15;
        request.job.requirements.required_level = Some(HierarchicalLevel::Junior);

        let uncapped = engine.match_candidate(&request).await.unwrap();
        assert!(uncapped.alerts.iter().any(|a| a.kind == AlertKind::CriticalMismatch));
    }

    #[tokio::test]
    async fn weighted_sum_matches_total_score_when_no_gate_triggers() {
        let engine = engine();
        let request = happy_path_request();
        let result = engine.match_candidate(&request).await.unwrap();

        if result.hard_gate_triggered.is_none() {
            let expected: f64 = result.component_scores.iter().map(|s| s.weighted_score).sum();
            assert!((result.total_score - expected).abs() <= 1e-6);
        }
    }

    #[tokio::test]
    async fn deadline_exceeded_returns_best_effort_result_with_flag_set() {
        let engine = Engine::new(
            GeoGateway::new(Arc::new(FakeGeoProvider::with_latency(500)), 720, 1, 10_000, 100, Duration::from_millis(10)),
            WeightMatrixRegistry::load().unwrap(),
            LevelDetector::new(),
            128,
            Duration::from_millis(20),
            Duration::from_millis(5),
        );
        let request = happy_path_request();
        let result = engine.match_candidate(&request).await.unwrap();

        assert!(result.deadline_exceeded);
        // spec.md 8 S5: the slow geo provider only degrades the
        // location-dependent components; the other eleven still report.
        assert_eq!(result.component_scores.len(), 12);
        let location = result
            .component_scores
            .iter()
            .find(|s| s.name == ComponentName::Location)
            .unwrap();
        assert_eq!(location.confidence, 0.0);
        let non_location_with_confidence = result
            .component_scores
            .iter()
            .filter(|s| s.name != ComponentName::Location)
            .filter(|s| s.confidence > 0.0)
            .count();
        assert!(non_location_with_confidence > 0);
    }

    #[tokio::test]
    async fn s6_excluded_sector_scores_zero_and_alerts_without_capping() {
        let engine = engine();
        let mut request = happy_path_request();
        request.candidate.sector_preferences.excluded.insert("defense".to_string());
        request.job.sector = "Defense".to_string();

        let baseline = engine.match_candidate(&happy_path_request()).await.unwrap();
        let result = engine.match_candidate(&request).await.unwrap();

        let sector = result
            .component_scores
            .iter()
            .find(|s| s.name == ComponentName::Sector)
            .unwrap();
        assert_eq!(sector.raw_score, 0.0);
        assert!(result.alerts.iter().any(|a| a.kind == AlertKind::SectorExcluded));
        assert!(result.hard_gate_triggered.is_none());
        assert!(result.total_score < baseline.total_score);
    }

    #[tokio::test]
    async fn invalid_request_with_no_transport_modes_is_rejected() {
        let engine = engine();
        let mut request = happy_path_request();
        request.candidate.mobility.transport_modes.clear();
        let result = engine.match_candidate(&request).await;
        assert!(matches!(result, Err(EngineError::InvalidRequest(_))));
    }
}
