//! `LevelDetector` (C2, spec.md 4.2) and the hierarchical compatibility
//! matrix it feeds (spec.md 4.2, used by the `hierarchical` scorer and by
//! C6's hard gate).

use crate::models::enums::HierarchicalLevel;

use super::patterns::{team_size_signal, title_signal, years_band_signal};

const TIE_BREAK_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct LevelDetection {
    pub level: HierarchicalLevel,
    pub confidence: f64,
    pub signals: Vec<String>,
}

/// Process-lifetime singleton (spec.md 3 Lifecycle): regex families are
/// compiled once in `patterns.rs` behind a `OnceLock`; this struct is
/// zero-sized and exists so callers have an owned handle to construct
/// once at startup, the same shape the teacher gives its DB client.
#[derive(Debug, Default, Clone, Copy)]
pub struct LevelDetector;

impl LevelDetector {
    pub fn new() -> Self {
        // Force the regex families to compile eagerly rather than on
        // first request.
        let _ = title_signal(HierarchicalLevel::Entry, "");
        LevelDetector
    }

    pub fn detect(&self, text: &str, years: f64, structured_team_size: Option<u32>) -> LevelDetection {
        let mut scored: Vec<(HierarchicalLevel, f64, Vec<String>)> = HierarchicalLevel::ALL
            .iter()
            .map(|&level| {
                let mut signals = Vec::new();
                let title = title_signal(level, text);
                if title > 0.0 {
                    signals.push(format!("title pattern matched for {:?}", level));
                }
                let years_w = years_band_signal(level, years);
                if years_w >= 0.999 {
                    signals.push(format!("{:.0} years falls inside the {:?} band", years, level));
                }
                let text_team = team_size_signal(level, text);
                let structured_team = structured_team_size
                    .map(|n| structured_team_weight(level, n))
                    .unwrap_or(0.0);
                let team_w = text_team.max(structured_team);
                if team_w > 0.0 {
                    signals.push(format!("team-size signal matched for {:?}", level));
                }
                (level, title + years_w + team_w, signals)
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap()
                .then(a.0.step().cmp(&b.0.step()))
        });

        let (top_level, top_score, top_signals) = scored[0].clone();
        let (second_level, second_score, _) = scored[1].clone();

        let chosen = if (top_score - second_score).abs() <= TIE_BREAK_MARGIN
            && top_level != second_level
        {
            let (higher, lower) = if top_level.step() > second_level.step() {
                (top_level, second_level)
            } else {
                (second_level, top_level)
            };
            if years_band_signal(higher, years) > 0.0 {
                higher
            } else {
                lower
            }
        } else {
            top_level
        };

        let confidence = if top_score > 0.0 {
            ((top_score - second_score) / top_score).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let signals = if chosen == top_level {
            top_signals
        } else {
            scored
                .iter()
                .find(|(l, _, _)| *l == chosen)
                .map(|(_, _, s)| s.clone())
                .unwrap_or_default()
        };

        LevelDetection {
            level: chosen,
            confidence,
            signals,
        }
    }
}

fn structured_team_weight(level: HierarchicalLevel, team_size: u32) -> f64 {
    match level {
        HierarchicalLevel::Manager if team_size >= 2 && team_size <= 15 => 0.8,
        HierarchicalLevel::Director if team_size > 15 && team_size <= 50 => 0.8,
        HierarchicalLevel::Executive if team_size > 50 => 0.8,
        _ => 0.0,
    }
}

/// One entry of the 6x6 compatibility matrix (spec.md 4.2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompatibilityOutcome {
    pub score: f64,
    pub step_gap: i32,
    pub overqualified: bool,
    pub critical_mismatch: bool,
}

/// Symmetric step-distance table with the asymmetric overqualification
/// penalty (spec.md 4.2): same level 1.0, ±1 0.7, ±2 0.35, ≥±3 0.05;
/// candidate ≥2 steps above the job multiplies by 0.7.
pub fn compatibility(candidate: HierarchicalLevel, job: HierarchicalLevel) -> CompatibilityOutcome {
    let step_gap = (candidate.step() - job.step()).abs();
    let base = match step_gap {
        0 => 1.0,
        1 => 0.7,
        2 => 0.35,
        _ => 0.05,
    };
    let overqualified = candidate.step() - job.step() >= 2;
    let score = if overqualified { base * 0.7 } else { base };
    CompatibilityOutcome {
        score,
        step_gap,
        overqualified,
        critical_mismatch: step_gap >= 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_executive_from_cfo_title_and_years() {
        let detector = LevelDetector::new();
        let detection = detector.detect("Chief Financial Officer, CFO", 15.0, Some(80));
        assert_eq!(detection.level, HierarchicalLevel::Executive);
        assert!(detection.confidence > 0.0);
    }

    #[test]
    fn detects_junior_from_title_alone() {
        let detector = LevelDetector::new();
        let detection = detector.detect("Junior Developer", 2.5, None);
        assert_eq!(detection.level, HierarchicalLevel::Junior);
    }

    #[test]
    fn compatibility_is_symmetric_same_level_is_perfect() {
        let outcome = compatibility(HierarchicalLevel::Senior, HierarchicalLevel::Senior);
        assert_eq!(outcome.score, 1.0);
        assert_eq!(outcome.step_gap, 0);
        assert!(!outcome.critical_mismatch);
    }

    #[test]
    fn compatibility_flags_critical_mismatch_at_three_or_more_steps() {
        let outcome = compatibility(HierarchicalLevel::Executive, HierarchicalLevel::Junior);
        assert!(outcome.step_gap >= 3);
        assert!(outcome.critical_mismatch);
        assert!(outcome.overqualified);
    }

    #[test]
    fn compatibility_penalizes_overqualification_asymmetrically() {
        let over = compatibility(HierarchicalLevel::Manager, HierarchicalLevel::Entry);
        let under = compatibility(HierarchicalLevel::Entry, HierarchicalLevel::Manager);
        assert!(over.score < under.score);
    }
}
