//! `CandidateProfile` and its nested value records (spec.md 3).

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{CandidateStatus, ContractType, ListeningReason, TransportMode, WorkModality};
use super::money::Money;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub sector: String,
    pub duration_months: u32,
    pub missions: Vec<String>,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
    pub team_size: Option<u32>,
    pub management_level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mobility {
    pub transport_modes: BTreeSet<TransportMode>,
    /// Minutes the candidate is willing to travel, per mode.
    pub max_travel_time_min: BTreeMap<TransportMode, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compensation {
    pub current_salary: Option<Money>,
    pub desired_salary: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorPreferences {
    pub preferred: BTreeSet<String>,
    pub excluded: BTreeSet<String>,
    /// 1 (narrow) .. 5 (wide open to unfamiliar sectors).
    pub openness: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timing {
    pub availability_date: NaiveDate,
    pub notice_period_weeks: u32,
    pub flexibility_weeks: u32,
    /// 1 (no rush) .. 5 (urgent).
    pub urgency: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,

    pub skills: BTreeSet<String>,

    pub years_total: u32,
    pub experiences: Vec<Experience>,

    pub compensation: Compensation,

    pub home_address: String,
    pub mobility: Mobility,

    /// Ordered most-preferred first.
    pub contract_ranking: Vec<ContractType>,

    pub preferred_modality: WorkModality,
    pub remote_days_per_week: u8,

    /// Ordered most-important first, closed set of ~8 tokens.
    pub motivations: Vec<super::enums::Motivation>,

    pub sector_preferences: SectorPreferences,

    pub timing: Timing,

    pub status: CandidateStatus,

    /// Ordered most-salient first.
    pub listening_reasons: Vec<ListeningReason>,

    /// Free text the Hierarchical Level Detector (C2) mines alongside the
    /// structured fields above; produced upstream by CV parsing, out of
    /// scope here (spec.md 1).
    pub cv_text: String,
    pub current_title: String,
}

impl CandidateProfile {
    pub fn primary_listening_reason(&self) -> Option<ListeningReason> {
        self.listening_reasons.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CandidateProfile {
        CandidateProfile {
            id: Uuid::nil(),
            display_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            skills: BTreeSet::new(),
            years_total: 6,
            experiences: vec![],
            compensation: Compensation {
                current_salary: None,
                desired_salary: None,
            },
            home_address: "Paris".into(),
            mobility: Mobility::default(),
            contract_ranking: vec![ContractType::Cdi],
            preferred_modality: WorkModality::Hybrid,
            remote_days_per_week: 2,
            motivations: vec![],
            sector_preferences: SectorPreferences {
                preferred: BTreeSet::new(),
                excluded: BTreeSet::new(),
                openness: 3,
            },
            timing: Timing {
                availability_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                notice_period_weeks: 4,
                flexibility_weeks: 2,
                urgency: 3,
            },
            status: CandidateStatus::ActivelySearching,
            listening_reasons: vec![ListeningReason::CompensationLow],
            cv_text: String::new(),
            current_title: "Senior Engineer".into(),
        }
    }

    #[test]
    fn primary_listening_reason_is_first_in_list() {
        let c = sample();
        assert_eq!(
            c.primary_listening_reason(),
            Some(ListeningReason::CompensationLow)
        );
    }
}
