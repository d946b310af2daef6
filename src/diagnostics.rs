//! Diagnostics Builder (C7, spec.md 4.7): derives the human-readable
//! parts of a `MatchResult` from the already-scored components. Pure
//! and synchronous — everything it needs is in `component_scores`.

use crate::models::enums::ComponentName;
use crate::models::result::{Alert, ComponentScore};

const STRENGTH_THRESHOLD: f64 = 0.75;
const WEAKNESS_THRESHOLD: f64 = 0.35;
const MIN_RELEVANT_WEIGHT: f64 = 0.05;
const TOP_CONTRIBUTORS_COUNT: usize = 3;

pub struct Diagnostics {
    pub top_contributors: Vec<ComponentName>,
    pub strengths: Vec<ComponentName>,
    pub weaknesses: Vec<ComponentName>,
    pub suggestions: Vec<String>,
}

pub struct DiagnosticsBuilder;

impl DiagnosticsBuilder {
    pub fn build(scores: &[ComponentScore], alerts: &[Alert]) -> Diagnostics {
        let mut by_weighted: Vec<&ComponentScore> = scores.iter().collect();
        by_weighted.sort_by(|a, b| b.weighted_score.partial_cmp(&a.weighted_score).unwrap());
        let top_contributors = by_weighted
            .iter()
            .take(TOP_CONTRIBUTORS_COUNT)
            .map(|s| s.name)
            .collect();

        let strengths: Vec<ComponentName> = scores
            .iter()
            .filter(|s| s.raw_score >= STRENGTH_THRESHOLD && s.weight >= MIN_RELEVANT_WEIGHT)
            .map(|s| s.name)
            .collect();

        let mut weaknesses: Vec<&ComponentScore> = scores
            .iter()
            .filter(|s| s.raw_score <= WEAKNESS_THRESHOLD && s.weight >= MIN_RELEVANT_WEIGHT)
            .collect();
        weaknesses.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap());

        let suggestions = build_suggestions(&weaknesses, alerts);

        Diagnostics {
            top_contributors,
            strengths,
            weaknesses: weaknesses.into_iter().map(|s| s.name).collect(),
            suggestions,
        }
    }
}

/// Templated, data-driven suggestion text keyed by the highest-weight
/// weakness (spec.md 4.7), plus one line per alert so a STRICT-mode cap
/// always surfaces an actionable explanation.
fn build_suggestions(weaknesses: &[&ComponentScore], alerts: &[Alert]) -> Vec<String> {
    let mut suggestions = Vec::new();

    if let Some(top) = weaknesses.first() {
        suggestions.push(suggestion_for(top));
    }

    for alert in alerts {
        suggestions.push(alert.message.clone());
    }

    suggestions
}

fn suggestion_for(weakness: &ComponentScore) -> String {
    match weakness.name {
        ComponentName::Sector => {
            if weakness.details.get("excluded").and_then(|v| v.as_bool()).unwrap_or(false) {
                "Job sector is in candidate's excluded list.".to_string()
            } else {
                "Candidate has little stated affinity for this sector.".to_string()
            }
        }
        ComponentName::Location => "Commute is at or beyond the candidate's stated travel budget.".to_string(),
        ComponentName::Salary => "Job's salary range falls below the candidate's expectations.".to_string(),
        ComponentName::SalaryProgression => "Job offers little salary uplift over the candidate's current pay.".to_string(),
        ComponentName::Experience => "Candidate's years of experience fall outside the job's required range.".to_string(),
        ComponentName::WorkModality => "Candidate's preferred work modality conflicts with the job's policy.".to_string(),
        ComponentName::Contract => "Job's contract type ranks low in the candidate's preferences.".to_string(),
        ComponentName::Timing => "Candidate's availability does not line up with the job's desired start date.".to_string(),
        ComponentName::Motivations => "Candidate's stated motivations don't overlap with what the role offers.".to_string(),
        ComponentName::Semantic => "Candidate's skills show limited overlap with the job's requirements.".to_string(),
        ComponentName::ListeningReason => "Candidate's stated reason for job-seeking isn't well supported by this match.".to_string(),
        ComponentName::CandidateStatus => "Candidate's current status may slow down the hiring process.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn score(name: ComponentName, raw: f64, weight: f64) -> ComponentScore {
        ComponentScore {
            name,
            raw_score: raw,
            weight,
            boost_applied: 0.0,
            weighted_score: raw * weight,
            confidence: 1.0,
            details: BTreeMap::new(),
            elapsed_ms: 1,
        }
    }

    #[test]
    fn top_contributors_are_the_three_largest_weighted_scores() {
        let scores = vec![
            score(ComponentName::Semantic, 0.9, 0.20),
            score(ComponentName::Salary, 0.8, 0.15),
            score(ComponentName::Experience, 0.7, 0.15),
            score(ComponentName::Location, 0.2, 0.10),
        ];
        let diagnostics = DiagnosticsBuilder::build(&scores, &[]);
        assert_eq!(diagnostics.top_contributors.len(), 3);
        assert_eq!(diagnostics.top_contributors[0], ComponentName::Semantic);
    }

    #[test]
    fn weaknesses_ignore_low_weight_components() {
        let scores = vec![
            score(ComponentName::Semantic, 0.1, 0.02),
            score(ComponentName::Location, 0.1, 0.10),
        ];
        let diagnostics = DiagnosticsBuilder::build(&scores, &[]);
        assert_eq!(diagnostics.weaknesses, vec![ComponentName::Location]);
    }

    #[test]
    fn suggestion_for_excluded_sector_names_the_exclusion() {
        let mut sector_score = score(ComponentName::Sector, 0.0, 0.08);
        sector_score.details.insert("excluded".to_string(), serde_json::Value::Bool(true));
        let diagnostics = DiagnosticsBuilder::build(&[sector_score], &[]);
        assert!(diagnostics.suggestions[0].contains("excluded list"));
    }
}
