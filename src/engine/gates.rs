//! Hard-gate application (spec.md 4.6 step 5, I2).
//!
//! Pure function of the raw total plus the two gate inputs: never calls
//! out to C1/C2/C3 itself, so it stays trivially testable.

use serde_json::Value;

use crate::models::enums::{AlertKind, ComponentName, HardGateMode, Severity};
use crate::models::result::{Alert, ComponentScore};
use crate::scoring::hierarchical::HierarchicalGateInput;
use crate::transport::TransportOutcome;

const HIERARCHICAL_CAP: f64 = 0.40;
const TRANSPORT_CAP: f64 = 0.25;
const OVERQUALIFIED_STEP_GAP: i32 = 2;

pub struct GateOutcome {
    pub total: f64,
    pub alerts: Vec<Alert>,
    /// The alert kind of whichever cap actually bound `total`, if any —
    /// surfaced on `MatchResult.hard_gate_triggered` (spec.md 3).
    pub triggered: Option<AlertKind>,
}

/// Applies both hard gates to `raw_total` (spec.md 4.6 step 5):
/// hierarchical critical mismatch caps at 0.40, transport infeasibility
/// caps at 0.25, and overqualification (step gap ≥ 2) is WARN-only and
/// never caps. In `ADVISORY` mode every alert still fires, but no cap
/// is applied (spec.md 4.6 step 5, "In ADVISORY mode...").
pub fn apply(
    raw_total: f64,
    mode: HardGateMode,
    hierarchical: &HierarchicalGateInput,
    transport: &TransportOutcome,
    scores: &[ComponentScore],
) -> GateOutcome {
    let mut total = raw_total;
    let mut alerts = Vec::new();
    let mut triggered = None;

    if hierarchical.outcome.critical_mismatch {
        alerts.push(Alert {
            kind: AlertKind::CriticalMismatch,
            message: format!(
                "hierarchical level step gap {} between candidate ({:?}) and job ({:?})",
                hierarchical.outcome.step_gap, hierarchical.candidate_level, hierarchical.job_level
            ),
            severity: Severity::Critical,
        });
        if mode == HardGateMode::Strict {
            total = total.min(HIERARCHICAL_CAP);
            triggered = Some(AlertKind::CriticalMismatch);
        }
    }

    if !transport.feasible {
        alerts.push(Alert {
            kind: AlertKind::TransportInfeasible,
            message: "no transport mode reaches the job location within budget".to_string(),
            severity: Severity::Critical,
        });
        if mode == HardGateMode::Strict {
            total = total.min(TRANSPORT_CAP);
            triggered = triggered.or(Some(AlertKind::TransportInfeasible));
        }
    }

    if hierarchical.outcome.step_gap >= OVERQUALIFIED_STEP_GAP && hierarchical.outcome.overqualified {
        alerts.push(Alert {
            kind: AlertKind::Overqualified,
            message: format!(
                "candidate ({:?}) is {} level(s) above the job's required level ({:?})",
                hierarchical.candidate_level, hierarchical.outcome.step_gap, hierarchical.job_level
            ),
            severity: Severity::Warn,
        });
    }

    // Neither sector exclusion nor a salary mismatch caps `total` (spec.md
    // 8 S6: "no hard cap, total_score reduced accordingly" — the
    // reduction already happened in the weighted sum via the scorer's
    // own raw=0 / below-0.5 score); these are WARN-level alerts fed by
    // the detail maps the two scorers already populate.
    if let Some(sector) = scores.iter().find(|s| s.name == ComponentName::Sector) {
        if sector.details.get("excluded") == Some(&Value::Bool(true)) {
            alerts.push(Alert {
                kind: AlertKind::SectorExcluded,
                message: "job sector is in the candidate's excluded sector list".to_string(),
                severity: Severity::Warn,
            });
        }
    }

    if let Some(salary) = scores.iter().find(|s| s.name == ComponentName::Salary) {
        if salary.details.get("overlaps") == Some(&Value::Bool(false)) {
            alerts.push(Alert {
                kind: AlertKind::SalaryOutsideRange,
                message: "candidate's desired salary band does not overlap the job's range".to_string(),
                severity: Severity::Warn,
            });
        }
    }

    GateOutcome { total, alerts, triggered }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{compatibility, LevelDetector};
    use crate::models::enums::HierarchicalLevel;
    use crate::scoring::hierarchical::evaluate;
    use crate::test_support::{fake_gateway, sample_candidate, sample_job};

    fn feasible_transport() -> TransportOutcome {
        TransportOutcome {
            feasible: true,
            best_mode: None,
            best_time_min: None,
            per_mode_scores: Default::default(),
            location_sub_score: 1.0,
            reason: None,
        }
    }

    fn infeasible_transport() -> TransportOutcome {
        TransportOutcome {
            feasible: false,
            best_mode: None,
            best_time_min: None,
            per_mode_scores: Default::default(),
            location_sub_score: 0.0,
            reason: None,
        }
    }

    fn hierarchical_input(candidate_level: HierarchicalLevel, job_level: HierarchicalLevel) -> HierarchicalGateInput {
        HierarchicalGateInput {
            candidate_level,
            job_level,
            candidate_confidence: 1.0,
            job_confidence: 1.0,
            outcome: compatibility(candidate_level, job_level),
        }
    }

    #[test]
    fn critical_mismatch_caps_total_in_strict_mode() {
        let hierarchical = hierarchical_input(HierarchicalLevel::Executive, HierarchicalLevel::Junior);
        let outcome = apply(0.9, HardGateMode::Strict, &hierarchical, &feasible_transport(), &[]);
        assert!(outcome.total <= HIERARCHICAL_CAP);
        assert_eq!(outcome.triggered, Some(AlertKind::CriticalMismatch));
        assert!(outcome.alerts.iter().any(|a| a.kind == AlertKind::CriticalMismatch));
    }

    #[test]
    fn advisory_mode_emits_alerts_without_capping() {
        let hierarchical = hierarchical_input(HierarchicalLevel::Executive, HierarchicalLevel::Junior);
        let outcome = apply(0.9, HardGateMode::Advisory, &hierarchical, &feasible_transport(), &[]);
        assert_eq!(outcome.total, 0.9);
        assert_eq!(outcome.triggered, None);
        assert!(outcome.alerts.iter().any(|a| a.kind == AlertKind::CriticalMismatch));
    }

    #[test]
    fn transport_infeasible_caps_total_in_strict_mode() {
        let hierarchical = hierarchical_input(HierarchicalLevel::Senior, HierarchicalLevel::Senior);
        let outcome = apply(0.9, HardGateMode::Strict, &hierarchical, &infeasible_transport(), &[]);
        assert!(outcome.total <= TRANSPORT_CAP);
        assert_eq!(outcome.triggered, Some(AlertKind::TransportInfeasible));
    }

    #[test]
    fn overqualification_is_warn_only_and_never_caps() {
        let hierarchical = hierarchical_input(HierarchicalLevel::Manager, HierarchicalLevel::Entry);
        let outcome = apply(0.9, HardGateMode::Strict, &hierarchical, &feasible_transport(), &[]);
        assert_eq!(outcome.total, 0.9);
        assert!(outcome.alerts.iter().any(|a| a.kind == AlertKind::Overqualified));
        assert!(!outcome.alerts.iter().any(|a| a.kind == AlertKind::CriticalMismatch));
    }

    #[tokio::test]
    async fn hierarchical_evaluate_feeds_apply_end_to_end() {
        let candidate = sample_candidate();
        let job = sample_job();
        let detector = LevelDetector::new();
        let _gateway = fake_gateway();
        let hierarchical = evaluate(&candidate, &job, &detector);
        let outcome = apply(0.8, HardGateMode::Strict, &hierarchical, &feasible_transport(), &[]);
        assert!(outcome.total <= 0.8);
    }

    fn component_score(name: ComponentName, details: &[(&str, Value)]) -> ComponentScore {
        ComponentScore {
            name,
            raw_score: 0.0,
            weight: 0.1,
            boost_applied: 0.0,
            weighted_score: 0.0,
            confidence: 0.8,
            details: details.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
            elapsed_ms: 0,
        }
    }

    #[test]
    fn excluded_sector_emits_alert_without_capping() {
        let hierarchical = hierarchical_input(HierarchicalLevel::Senior, HierarchicalLevel::Senior);
        let scores = vec![component_score(ComponentName::Sector, &[("excluded", Value::Bool(true))])];
        let outcome = apply(0.7, HardGateMode::Strict, &hierarchical, &feasible_transport(), &scores);
        assert_eq!(outcome.total, 0.7);
        assert_eq!(outcome.triggered, None);
        assert!(outcome.alerts.iter().any(|a| a.kind == AlertKind::SectorExcluded));
    }

    #[test]
    fn salary_outside_range_emits_alert_without_capping() {
        let hierarchical = hierarchical_input(HierarchicalLevel::Senior, HierarchicalLevel::Senior);
        let scores = vec![component_score(ComponentName::Salary, &[("overlaps", Value::Bool(false))])];
        let outcome = apply(0.7, HardGateMode::Strict, &hierarchical, &feasible_transport(), &scores);
        assert_eq!(outcome.total, 0.7);
        assert!(outcome.alerts.iter().any(|a| a.kind == AlertKind::SalaryOutsideRange));
    }

    #[test]
    fn a_preferred_sector_and_overlapping_salary_emit_neither_alert() {
        let hierarchical = hierarchical_input(HierarchicalLevel::Senior, HierarchicalLevel::Senior);
        let scores = vec![
            component_score(ComponentName::Sector, &[("excluded", Value::Bool(false))]),
            component_score(ComponentName::Salary, &[("overlaps", Value::Bool(true))]),
        ];
        let outcome = apply(0.7, HardGateMode::Strict, &hierarchical, &feasible_transport(), &scores);
        assert!(!outcome.alerts.iter().any(|a| a.kind == AlertKind::SectorExcluded));
        assert!(!outcome.alerts.iter().any(|a| a.kind == AlertKind::SalaryOutsideRange));
    }
}
