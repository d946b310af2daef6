//! `MatchRequest` (spec.md 3, 6).

use serde::{Deserialize, Serialize};

use super::candidate::CandidateProfile;
use super::enums::{HardGateMode, ListeningReason};
use super::job::JobPosting;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    pub candidate: CandidateProfile,
    pub job: JobPosting,
    #[serde(default)]
    pub listening_reason_override: Option<ListeningReason>,
    #[serde(default = "default_hard_gate_mode")]
    pub hard_gate_mode: HardGateMode,
}

fn default_hard_gate_mode() -> HardGateMode {
    HardGateMode::Strict
}

impl MatchRequest {
    /// The listening reason C5 resolves a matrix from: the request-level
    /// override if present, else the candidate's most salient reason
    /// (spec.md 4.6 step 1).
    pub fn effective_listening_reason(&self) -> Option<ListeningReason> {
        self.listening_reason_override
            .or_else(|| self.candidate.primary_listening_reason())
    }
}
