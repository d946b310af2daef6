//! Salary progression scorer (spec.md 4.4): rewards the percentage
//! uplift the job's salary midpoint offers over the candidate's current
//! pay, piecewise-linear between the control points the spec names.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::enums::ComponentName;
use crate::models::result::ComponentScore;

use super::{build_score, Scorer, ScoringContext};

/// Control points: `(pct_increase, score)`, linearly interpolated
/// between consecutive points; flat at 1.0 beyond the last.
const CONTROL_POINTS: [(f64, f64); 3] = [(0.0, 0.3), (0.10, 0.7), (0.20, 1.0)];

fn score_for_pct(pct: f64) -> f64 {
    if pct < 0.0 {
        return 0.1;
    }
    if pct >= CONTROL_POINTS[CONTROL_POINTS.len() - 1].0 {
        return 1.0;
    }
    for window in CONTROL_POINTS.windows(2) {
        let (x0, y0) = window[0];
        let (x1, y1) = window[1];
        if pct >= x0 && pct <= x1 {
            let t = (pct - x0) / (x1 - x0);
            return y0 + t * (y1 - y0);
        }
    }
    0.3
}

pub struct SalaryProgressionScorer;

#[async_trait]
impl Scorer for SalaryProgressionScorer {
    fn name(&self) -> ComponentName {
        ComponentName::SalaryProgression
    }

    async fn score(&self, ctx: &ScoringContext<'_>) -> ComponentScore {
        let start = std::time::Instant::now();
        let mut details = BTreeMap::new();

        let Some(current) = ctx.candidate.compensation.current_salary.as_ref().map(|m| m.to_f64())
        else {
            details.insert("reason".to_string(), Value::String("current_salary_missing".into()));
            return build_score(self.name(), ctx.matrix, 0.5, 0.0, details, start.elapsed().as_millis() as u64);
        };

        let job_mid = (ctx.job.compensation.salary_min.to_f64() + ctx.job.compensation.salary_max.to_f64()) / 2.0;
        let pct = if current.abs() > f64::EPSILON {
            (job_mid - current) / current
        } else {
            0.0
        };
        let raw = score_for_pct(pct);

        details.insert("current_salary".to_string(), Value::from(current));
        details.insert("job_midpoint".to_string(), Value::from(job_mid));
        details.insert("pct_increase".to_string(), Value::from(pct));

        build_score(self.name(), ctx.matrix, raw, 0.85, details, start.elapsed().as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_percent_increase_scores_point_three() {
        assert!((score_for_pct(0.0) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn ten_percent_increase_scores_point_seven() {
        assert!((score_for_pct(0.10) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn twenty_percent_and_beyond_scores_one() {
        assert_eq!(score_for_pct(0.20), 1.0);
        assert_eq!(score_for_pct(0.45), 1.0);
    }

    #[test]
    fn negative_increase_scores_point_one() {
        assert_eq!(score_for_pct(-0.05), 0.1);
    }
}
