//! Base and adaptive weight matrices as plain data (spec.md 4.5, 9 —
//! "weights defined in code scattered across files → centralize as
//! data"). Weights are listed in `ComponentName::CANONICAL_ORDER`.
//!
//! **Open Question resolution (spec.md 9, bullet 1):** the source carries
//! conflicting LOCATION boosts for the location-issue matrix (0.20 vs
//! 0.25 in different files). This crate picks **0.20** as the canonical
//! `adaptive_location_issue_v1` value; `WeightMatrixRegistry::load()`
//! rejects a second definition under the same id (see DESIGN.md).

use crate::models::enums::ComponentName;

pub struct MatrixDef {
    pub id: &'static str,
    /// Weights in `ComponentName::CANONICAL_ORDER` order.
    pub weights: [f64; 12],
}

pub const BASE_V1: MatrixDef = MatrixDef {
    id: "base_v1",
    weights: [
        0.24, // semantic
        0.19, // salary
        0.14, // experience
        0.09, // location
        0.08, // motivations
        0.06, // sector
        0.05, // contract
        0.04, // timing
        0.04, // work_modality
        0.03, // salary_progression
        0.02, // listening_reason
        0.02, // candidate_status
    ],
};

pub const ADAPTIVE_COMPENSATION_LOW_V1: MatrixDef = MatrixDef {
    id: "adaptive_compensation_low_v1",
    weights: [
        0.195, // semantic
        0.320, // salary
        0.113, // experience
        0.073, // location
        0.065, // motivations
        0.048, // sector
        0.040, // contract
        0.032, // timing
        0.032, // work_modality
        0.050, // salary_progression
        0.016, // listening_reason
        0.016, // candidate_status
    ],
};

pub const ADAPTIVE_ROLE_MISMATCH_V1: MatrixDef = MatrixDef {
    id: "adaptive_role_mismatch_v1",
    weights: [
        0.340, // semantic
        0.141, // salary
        0.200, // experience
        0.067, // location
        0.059, // motivations
        0.045, // sector
        0.036, // contract
        0.030, // timing
        0.030, // work_modality
        0.022, // salary_progression
        0.015, // listening_reason
        0.015, // candidate_status
    ],
};

pub const ADAPTIVE_GROWTH_LACK_V1: MatrixDef = MatrixDef {
    id: "adaptive_growth_lack_v1",
    weights: [
        0.166, // semantic
        0.132, // salary
        0.098, // experience
        0.063, // location
        0.260, // motivations
        0.042, // sector
        0.035, // contract
        0.028, // timing
        0.028, // work_modality
        0.120, // salary_progression
        0.014, // listening_reason
        0.014, // candidate_status
    ],
};

pub const ADAPTIVE_LOCATION_ISSUE_V1: MatrixDef = MatrixDef {
    id: "adaptive_location_issue_v1",
    weights: [
        0.211, // semantic
        0.167, // salary
        0.123, // experience
        0.200, // location
        0.070, // motivations
        0.053, // sector
        0.044, // contract
        0.035, // timing
        0.035, // work_modality
        0.026, // salary_progression
        0.018, // listening_reason
        0.018, // candidate_status
    ],
};

pub const ADAPTIVE_FLEXIBILITY_LACK_V1: MatrixDef = MatrixDef {
    id: "adaptive_flexibility_lack_v1",
    weights: [
        0.178, // semantic
        0.140, // salary
        0.103, // experience
        0.067, // location
        0.059, // motivations
        0.044, // sector
        0.037, // contract
        0.140, // timing
        0.180, // work_modality
        0.022, // salary_progression
        0.015, // listening_reason
        0.015, // candidate_status
    ],
};

pub const ALL: &[&MatrixDef] = &[
    &BASE_V1,
    &ADAPTIVE_COMPENSATION_LOW_V1,
    &ADAPTIVE_ROLE_MISMATCH_V1,
    &ADAPTIVE_GROWTH_LACK_V1,
    &ADAPTIVE_LOCATION_ISSUE_V1,
    &ADAPTIVE_FLEXIBILITY_LACK_V1,
];

/// Sanity assertion the tests exercise: every entry lines up with
/// `ComponentName::CANONICAL_ORDER`, in the same order each file lists.
pub const EXPECTED_ORDER: [ComponentName; 12] = ComponentName::CANONICAL_ORDER;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_matrix_sums_to_one_within_tolerance() {
        for def in ALL {
            let sum: f64 = def.weights.iter().sum();
            assert!(
                (sum - 1.0).abs() <= 1e-6,
                "{} sums to {} not 1.0",
                def.id,
                sum
            );
        }
    }

    #[test]
    fn expected_order_has_twelve_entries() {
        assert_eq!(EXPECTED_ORDER.len(), 12);
    }
}
