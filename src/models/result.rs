//! `MatchResult`, `ComponentScore`, `Alert` (spec.md 3, 6).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::{AlertKind, ComponentName, ListeningReason, Severity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentScore {
    pub name: ComponentName,
    pub raw_score: f64,
    pub weight: f64,
    /// Reserved for future boost mechanisms layered on top of the raw
    /// score (spec.md 3); no scorer in this engine currently sets it.
    pub boost_applied: f64,
    pub weighted_score: f64,
    pub confidence: f64,
    pub details: BTreeMap<String, Value>,
    pub elapsed_ms: u64,
}

impl ComponentScore {
    pub fn neutral(name: ComponentName, weight: f64, reason: &'static str) -> Self {
        let mut details = BTreeMap::new();
        details.insert("timeout".to_string(), Value::Bool(true));
        details.insert("reason".to_string(), Value::String(reason.to_string()));
        ComponentScore {
            name,
            raw_score: 0.5,
            weight,
            boost_applied: 0.0,
            weighted_score: 0.5 * weight,
            confidence: 0.0,
            details,
            elapsed_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub total_score: f64,
    pub confidence: f64,
    pub listening_reason_used: Option<ListeningReason>,
    pub matrix_id: String,
    pub component_scores: Vec<ComponentScore>,
    pub alerts: Vec<Alert>,
    pub top_contributors: Vec<ComponentName>,
    pub strengths: Vec<ComponentName>,
    pub weaknesses: Vec<ComponentName>,
    pub suggestions: Vec<String>,
    pub total_elapsed_ms: u64,
    pub hard_gate_triggered: Option<AlertKind>,
    #[serde(default)]
    pub deadline_exceeded: bool,
}
