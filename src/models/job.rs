//! `JobPosting` (spec.md 3).

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{
    CompanySize, ContractType, HierarchicalLevel, Motivation, WorkModality,
};
use super::money::Money;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequirements {
    pub required_skills: BTreeSet<String>,
    pub preferred_skills: BTreeSet<String>,
    pub min_years: u32,
    pub max_years: Option<u32>,
    /// When absent, C2 infers the level from `JobPosting::text_for_level_detection`.
    pub required_level: Option<HierarchicalLevel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCompensation {
    pub salary_min: Money,
    pub salary_max: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobModalityPolicy {
    pub modality: WorkModality,
    pub remote_days_allowed: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTiming {
    pub desired_start_date: Option<NaiveDate>,
    pub max_wait_weeks: Option<u32>,
    /// 1 (no rush) .. 5 (urgent).
    pub urgency: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub sector: String,
    pub company_size: CompanySize,
    pub location: String,

    pub requirements: JobRequirements,
    pub compensation: JobCompensation,
    pub contract_type: ContractType,
    pub modality_policy: JobModalityPolicy,
    pub timing: JobTiming,
    pub benefits: BTreeSet<String>,

    /// Ordered most-important first, closed set of ~8 tokens (spec.md 3).
    pub position_motivations: Vec<Motivation>,

    /// Free text the Hierarchical Level Detector (C2) mines when
    /// `requirements.required_level` is absent; typically the job
    /// description, produced upstream by parsing (spec.md 1, out of scope).
    pub description_text: String,
}

impl JobPosting {
    pub fn text_for_level_detection(&self) -> String {
        format!("{} {}", self.title, self.description_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JobPosting {
        JobPosting {
            id: Uuid::nil(),
            title: "Senior Backend Engineer".into(),
            company: "Acme".into(),
            sector: "Tech".into(),
            company_size: CompanySize::Midcap,
            location: "Paris".into(),
            requirements: JobRequirements {
                required_skills: BTreeSet::new(),
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
            modality_policy: JobModalityPolicy {
                modality: WorkModality::Hybrid,
                remote_days_allowed: 2,
            },
            timing: JobTiming {
                desired_start_date: None,
                max_wait_weeks: Some(8),
                urgency: 3,
            },
            benefits: BTreeSet::new(),
            position_motivations: vec![],
            description_text: "senior engineer role".into(),
        }
    }

    #[test]
    fn text_for_level_detection_combines_title_and_description() {
        let job = sample();
        let text = job.text_for_level_detection();
        assert!(text.contains("Senior Backend Engineer"));
        assert!(text.contains("senior engineer role"));
    }
}
