//! Parallel fan-out over the twelve weighted scorers (spec.md 4.6, 5).
//!
//! Each scorer runs concurrently inside this one task — no `tokio::spawn`
//! per scorer, since `ScoringContext` borrows its inputs and keeping
//! every scorer future on the caller's task avoids the `'static` bound
//! a spawned task would need. `futures::future::join_all` still gives
//! genuine concurrent progress across the scorers' await points, the
//! same fan-out shape the teacher uses for concurrent worker-profile
//! fetches in `handler/labour.rs`.

use std::time::Duration;

use futures::future::join_all;

use crate::models::enums::ComponentName;
use crate::models::result::ComponentScore;
use crate::scoring::{Scorer, ScoringContext};

/// Runs every scorer under its own per-scorer deadline; a scorer that
/// doesn't finish in time is replaced with a neutral substitution
/// (spec.md 5) rather than failing the whole request.
pub async fn run_scorers(
    scorers: &[Box<dyn Scorer>],
    ctx: &ScoringContext<'_>,
    per_scorer_deadline: Duration,
) -> Vec<ComponentScore> {
    let futures = scorers.iter().map(|scorer| async move {
        let name = scorer.name();
        match tokio::time::timeout(per_scorer_deadline, scorer.score(ctx)).await {
            Ok(score) => score,
            Err(_) => {
                tracing::warn!(component = name.as_str(), "scorer exceeded its per-scorer deadline");
                ComponentScore::neutral(name, ctx.matrix.weight(name), "per_scorer_deadline_exceeded")
            }
        }
    });
    join_all(futures).await
}

/// Builds neutral scores for every canonical component, used when the
/// global deadline trips before fan-out completes (spec.md 5).
pub fn neutral_scores(matrix: &crate::matrix::WeightMatrix) -> Vec<ComponentScore> {
    ComponentName::CANONICAL_ORDER
        .iter()
        .map(|&name| ComponentScore::neutral(name, matrix.weight(name), "global_deadline_exceeded"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::LevelDetector;
    use crate::matrix::WeightMatrixRegistry;
    use crate::scoring::all_scorers;
    use crate::test_support::{fake_gateway, sample_candidate, sample_job};
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn run_scorers_returns_one_score_per_scorer() {
        let candidate = sample_candidate();
        let job = sample_job();
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let geo = fake_gateway();
        let detector = LevelDetector::new();
        let cancel = CancellationToken::new();
        let ctx = ScoringContext { candidate: &candidate, job: &job, matrix, geo: &geo, detector: &detector, cancel: &cancel };

        let scorers = all_scorers();
        let scores = run_scorers(&scorers, &ctx, Duration::from_millis(30)).await;
        assert_eq!(scores.len(), 12);
    }

    #[test]
    fn neutral_scores_covers_every_canonical_component() {
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        let scores = neutral_scores(matrix);
        assert_eq!(scores.len(), 12);
        assert!(scores.iter().all(|s| s.confidence == 0.0));
    }
}
