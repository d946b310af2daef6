//! Shared fixture builders for unit tests across `scoring`, `engine`, and
//! `transport`. Mirrors the teacher's habit of a small `sample()` builder
//! colocated with the first test module that needs one; centralized here
//! once enough scorer tests needed the same shape to avoid ~12 copies of
//! the same literal.

#![cfg(test)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::geo::provider::FakeGeoProvider;
use crate::geo::GeoGateway;
use crate::models::candidate::{Compensation, Mobility, SectorPreferences, Timing};
use crate::models::enums::{
    CandidateStatus, CompanySize, ContractType, HierarchicalLevel, ListeningReason, TransportMode,
    WorkModality,
};
use crate::models::job::{JobCompensation, JobModalityPolicy, JobRequirements, JobTiming};
use crate::models::money::Money;
use crate::models::{CandidateProfile, JobPosting};

pub fn fake_gateway() -> GeoGateway {
    GeoGateway::new(
        Arc::new(FakeGeoProvider::new()),
        720,
        1,
        10_000,
        100,
        Duration::from_millis(50),
    )
}

pub fn sample_candidate() -> CandidateProfile {
    let mut transport_modes = BTreeSet::new();
    transport_modes.insert(TransportMode::PublicTransport);
    let mut max_travel_time_min = BTreeMap::new();
    max_travel_time_min.insert(TransportMode::PublicTransport, 45);

    CandidateProfile {
        id: Uuid::nil(),
        display_name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        skills: BTreeSet::new(),
        years_total: 6,
        experiences: vec![],
        compensation: Compensation {
            current_salary: Some(Money::from_i64(58_000)),
            desired_salary: Some(Money::from_i64(65_000)),
        },
        home_address: "Paris".into(),
        mobility: Mobility {
            transport_modes,
            max_travel_time_min,
        },
        contract_ranking: vec![ContractType::Cdi, ContractType::Freelance],
        preferred_modality: WorkModality::Hybrid,
        remote_days_per_week: 2,
        motivations: vec![crate::models::enums::Motivation::TechnicalChallenge],
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
        cv_text: "Senior Software Engineer with 6 years of experience".into(),
        current_title: "Senior Software Engineer".into(),
    }
}

pub fn sample_job() -> JobPosting {
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
        position_motivations: vec![crate::models::enums::Motivation::TechnicalChallenge],
        description_text: "We are looking for a senior backend engineer".into(),
    }
}
