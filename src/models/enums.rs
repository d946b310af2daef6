//! Closed enumerations shared across candidate, job and request records.

use serde::{Deserialize, Serialize};

/// Travel mode a candidate is willing to use to reach a job site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportMode {
    Car,
    PublicTransport,
    Bike,
    Walk,
    Remote,
}

/// Ordinal seniority level, used both as scorer input and hard-gate signal.
///
/// Ordering is the step axis the hierarchical compatibility matrix walks;
/// `as usize` is the step index (0..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HierarchicalLevel {
    Entry,
    Junior,
    Senior,
    Manager,
    Director,
    Executive,
}

impl HierarchicalLevel {
    pub const ALL: [HierarchicalLevel; 6] = [
        HierarchicalLevel::Entry,
        HierarchicalLevel::Junior,
        HierarchicalLevel::Senior,
        HierarchicalLevel::Manager,
        HierarchicalLevel::Director,
        HierarchicalLevel::Executive,
    ];

    pub fn step(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractType {
    Cdi,
    Cdd,
    Freelance,
    Interim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkModality {
    OnSite,
    Hybrid,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Motivation {
    Compensation,
    Growth,
    WorkLifeBalance,
    Leadership,
    TechnicalChallenge,
    CompanyMission,
    Stability,
    Autonomy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateStatus {
    Employed,
    ActivelySearching,
    Student,
    Freelancer,
    BetweenJobs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListeningReason {
    CompensationLow,
    RoleMismatch,
    GrowthLack,
    LocationIssue,
    FlexibilityLack,
    MarketCuriosity,
    ManagementIssues,
    GeneralDissatisfaction,
}

impl ListeningReason {
    /// The five reasons the Weight Matrix Registry carries an adaptive
    /// matrix for (spec.md 4.5). The other three resolve to the base matrix.
    pub fn has_adaptive_matrix(self) -> bool {
        matches!(
            self,
            ListeningReason::CompensationLow
                | ListeningReason::RoleMismatch
                | ListeningReason::GrowthLack
                | ListeningReason::LocationIssue
                | ListeningReason::FlexibilityLack
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanySize {
    Startup,
    Sme,
    Midcap,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HardGateMode {
    Strict,
    Advisory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    CriticalMismatch,
    Overqualified,
    TransportInfeasible,
    SalaryOutsideRange,
    SectorExcluded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warn,
    Critical,
}

/// Canonical key order for the twelve *weighted* scoring components —
/// exactly the twelve named in the base weight table (spec.md 4.5).
///
/// Hierarchical level compatibility (spec.md 4.2) is deliberately absent:
/// the base/adaptive weight tables in spec.md 4.5 sum to 1.000 over these
/// twelve names without it, and spec.md 4.6 only ever consumes the
/// hierarchical step-gap as a hard-gate input, never as a weighted addend
/// of `raw_total`. See DESIGN.md for this Open-Question resolution.
///
/// The engine iterates in this fixed order when summing weighted scores
/// so that floating-point sums are deterministic (spec.md 4.6, Ordering
/// guarantees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentName {
    Semantic,
    Salary,
    SalaryProgression,
    Experience,
    Location,
    WorkModality,
    Sector,
    Contract,
    Timing,
    Motivations,
    ListeningReason,
    CandidateStatus,
}

impl ComponentName {
    /// The fixed canonical order used for every deterministic sum.
    pub const CANONICAL_ORDER: [ComponentName; 12] = [
        ComponentName::Semantic,
        ComponentName::Salary,
        ComponentName::Experience,
        ComponentName::Location,
        ComponentName::Motivations,
        ComponentName::Sector,
        ComponentName::Contract,
        ComponentName::Timing,
        ComponentName::WorkModality,
        ComponentName::SalaryProgression,
        ComponentName::ListeningReason,
        ComponentName::CandidateStatus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentName::Semantic => "semantic",
            ComponentName::Salary => "salary",
            ComponentName::SalaryProgression => "salary_progression",
            ComponentName::Experience => "experience",
            ComponentName::Location => "location",
            ComponentName::WorkModality => "work_modality",
            ComponentName::Sector => "sector",
            ComponentName::Contract => "contract",
            ComponentName::Timing => "timing",
            ComponentName::Motivations => "motivations",
            ComponentName::ListeningReason => "listening_reason",
            ComponentName::CandidateStatus => "candidate_status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_covers_all_twelve_components() {
        let mut seen: Vec<ComponentName> = ComponentName::CANONICAL_ORDER.to_vec();
        seen.sort_by_key(|c| c.as_str());
        let mut all = [
            ComponentName::Semantic,
            ComponentName::Salary,
            ComponentName::SalaryProgression,
            ComponentName::Experience,
            ComponentName::Location,
            ComponentName::WorkModality,
            ComponentName::Sector,
            ComponentName::Contract,
            ComponentName::Timing,
            ComponentName::Motivations,
            ComponentName::ListeningReason,
            ComponentName::CandidateStatus,
        ];
        all.sort_by_key(|c| c.as_str());
        assert_eq!(seen.len(), 12);
        assert_eq!(&seen[..], &all[..]);
    }

    #[test]
    fn hierarchical_level_steps_are_contiguous() {
        for (i, level) in HierarchicalLevel::ALL.iter().enumerate() {
            assert_eq!(level.step(), i as i32);
        }
    }
}
