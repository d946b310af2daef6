//! `WeightMatrixRegistry` (C5, spec.md 4.5): validates every matrix at
//! load time (I4) and resolves a listening reason to a matrix at request
//! time. Validation failures are fatal at startup only (spec.md 7), never
//! at request time.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::models::enums::{ComponentName, ListeningReason};

use super::data;

#[derive(Debug, Clone)]
pub struct WeightMatrix {
    pub id: String,
    weights: HashMap<ComponentName, f64>,
}

impl WeightMatrix {
    pub fn weight(&self, component: ComponentName) -> f64 {
        *self.weights.get(&component).unwrap_or(&0.0)
    }

    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }
}

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("matrix {id} weights sum to {sum}, not 1.000 (+/- 1e-6)")]
    SumMismatch { id: String, sum: f64 },
    #[error("duplicate matrix id {0}")]
    DuplicateId(String),
    #[error("no matrix registered under id {0}")]
    UnknownId(String),
    #[error("failed to read matrix config file {path}: {source}")]
    Io { path: String, source: String },
    #[error("failed to parse matrix config file {path}: {source}")]
    Parse { path: String, source: String },
    #[error("matrix {id} override references unknown component {component}")]
    UnknownComponent { id: String, component: String },
    #[error("matrix {id} override is missing component {component}")]
    MissingComponent { id: String, component: String },
}

/// Wire shape of a `MATRIX_CONFIG_PATH` override file (spec.md 6): a flat
/// JSON document naming a subset of matrix ids to replace wholesale.
#[derive(Debug, Deserialize)]
struct MatrixOverrideFile {
    matrices: Vec<MatrixOverrideDef>,
}

#[derive(Debug, Deserialize)]
struct MatrixOverrideDef {
    id: String,
    weights: HashMap<String, f64>,
}

pub struct WeightMatrixRegistry {
    matrices: HashMap<String, WeightMatrix>,
}

const SUM_TOLERANCE: f64 = 1e-6;

impl WeightMatrixRegistry {
    /// Loads the canonical matrix set (`matrix::data`), validating I1/I4
    /// at construction. A failed validation aborts process startup
    /// (`main.rs`), per spec.md 7 "Data inconsistency ... fatal at
    /// startup only".
    pub fn load() -> Result<Self, MatrixError> {
        let mut matrices = HashMap::new();
        for def in data::ALL {
            if matrices.contains_key(def.id) {
                return Err(MatrixError::DuplicateId(def.id.to_string()));
            }
            let sum: f64 = def.weights.iter().sum();
            if (sum - 1.0).abs() > SUM_TOLERANCE {
                return Err(MatrixError::SumMismatch {
                    id: def.id.to_string(),
                    sum,
                });
            }
            let mut weights = HashMap::new();
            for (component, weight) in ComponentName::CANONICAL_ORDER.iter().zip(def.weights.iter())
            {
                weights.insert(*component, *weight);
            }
            matrices.insert(
                def.id.to_string(),
                WeightMatrix {
                    id: def.id.to_string(),
                    weights,
                },
            );
        }
        tracing::info!(matrix_count = matrices.len(), "weight matrix registry loaded");
        Ok(WeightMatrixRegistry { matrices })
    }

    /// Loads the canonical matrix set, then applies the optional
    /// `MATRIX_CONFIG_PATH` override file on top (spec.md 6, I6): each
    /// named matrix id is replaced wholesale, validated against I1/I4
    /// exactly like the canonical set. `None` is equivalent to `load()`.
    pub fn load_with_config(matrix_config_path: Option<&str>) -> Result<Self, MatrixError> {
        let mut registry = Self::load()?;
        if let Some(path) = matrix_config_path {
            registry.apply_overrides_from_file(path)?;
        }
        Ok(registry)
    }

    fn apply_overrides_from_file(&mut self, path: &str) -> Result<(), MatrixError> {
        let contents = std::fs::read_to_string(path).map_err(|e| MatrixError::Io {
            path: path.to_string(),
            source: e.to_string(),
        })?;
        let file: MatrixOverrideFile = serde_json::from_str(&contents).map_err(|e| MatrixError::Parse {
            path: path.to_string(),
            source: e.to_string(),
        })?;

        for def in file.matrices {
            let sum: f64 = def.weights.values().sum();
            if (sum - 1.0).abs() > SUM_TOLERANCE {
                return Err(MatrixError::SumMismatch { id: def.id, sum });
            }

            let known: std::collections::HashSet<&str> =
                ComponentName::CANONICAL_ORDER.iter().map(|c| c.as_str()).collect();
            if let Some(unknown) = def.weights.keys().find(|k| !known.contains(k.as_str())) {
                return Err(MatrixError::UnknownComponent {
                    id: def.id,
                    component: unknown.clone(),
                });
            }

            let mut weights = HashMap::new();
            for component in ComponentName::CANONICAL_ORDER {
                let key = component.as_str();
                let Some(&w) = def.weights.get(key) else {
                    return Err(MatrixError::MissingComponent {
                        id: def.id,
                        component: key.to_string(),
                    });
                };
                weights.insert(component, w);
            }

            tracing::info!(matrix_id = %def.id, path, "weight matrix overridden from MATRIX_CONFIG_PATH");
            self.matrices.insert(def.id.clone(), WeightMatrix { id: def.id, weights });
        }
        Ok(())
    }

    fn matrix_id_for(reason: ListeningReason) -> &'static str {
        match reason {
            ListeningReason::CompensationLow => "adaptive_compensation_low_v1",
            ListeningReason::RoleMismatch => "adaptive_role_mismatch_v1",
            ListeningReason::GrowthLack => "adaptive_growth_lack_v1",
            ListeningReason::LocationIssue => "adaptive_location_issue_v1",
            ListeningReason::FlexibilityLack => "adaptive_flexibility_lack_v1",
            ListeningReason::MarketCuriosity
            | ListeningReason::ManagementIssues
            | ListeningReason::GeneralDissatisfaction => "base_v1",
        }
    }

    /// Pure function of its input (spec.md 8 "Idempotence of matrix
    /// resolution"): the adaptive matrix for `reason` if one exists,
    /// else the base matrix.
    pub fn resolve(&self, reason: Option<ListeningReason>) -> &WeightMatrix {
        let id = reason
            .map(Self::matrix_id_for)
            .unwrap_or("base_v1");
        self.matrices
            .get(id)
            .or_else(|| self.matrices.get("base_v1"))
            .expect("base_v1 must always be loaded")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_succeeds_on_the_canonical_matrix_set() {
        let registry = WeightMatrixRegistry::load().unwrap();
        assert_eq!(registry.matrices.len(), 6);
    }

    #[test]
    fn resolve_with_no_reason_returns_base_matrix() {
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(None);
        assert_eq!(matrix.id, "base_v1");
    }

    #[test]
    fn resolve_compensation_low_returns_the_adaptive_matrix() {
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(Some(ListeningReason::CompensationLow));
        assert_eq!(matrix.id, "adaptive_compensation_low_v1");
        assert!(matrix.weight(ComponentName::Salary) >= 0.30);
    }

    #[test]
    fn resolve_is_idempotent() {
        let registry = WeightMatrixRegistry::load().unwrap();
        let a = registry.resolve(Some(ListeningReason::GrowthLack)).id.clone();
        let b = registry.resolve(Some(ListeningReason::GrowthLack)).id.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn resolve_for_a_reason_without_an_adaptive_matrix_returns_base() {
        let registry = WeightMatrixRegistry::load().unwrap();
        let matrix = registry.resolve(Some(ListeningReason::MarketCuriosity));
        assert_eq!(matrix.id, "base_v1");
    }

    #[test]
    fn every_matrix_weight_sums_to_one() {
        let registry = WeightMatrixRegistry::load().unwrap();
        for matrix in registry.matrices.values() {
            assert!((matrix.sum() - 1.0).abs() <= SUM_TOLERANCE);
        }
    }

    fn scratch_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("match_engine_matrix_{tag}_{}.json", std::process::id()))
    }

    #[test]
    fn load_with_config_none_behaves_like_plain_load() {
        let registry = WeightMatrixRegistry::load_with_config(None).unwrap();
        assert_eq!(registry.matrices.len(), 6);
    }

    #[test]
    fn load_with_config_applies_a_valid_override_file() {
        let path = scratch_path("valid");
        std::fs::write(
            &path,
            r#"{"matrices":[{"id":"base_v1","weights":{
                "semantic":0.30,"salary":0.09,"salary_progression":0.05,"experience":0.10,
                "location":0.10,"work_modality":0.08,"sector":0.08,"contract":0.05,
                "timing":0.05,"motivations":0.05,"listening_reason":0.03,"candidate_status":0.02
            }}]}"#,
        )
        .unwrap();

        let registry = WeightMatrixRegistry::load_with_config(Some(path.to_str().unwrap())).unwrap();
        let matrix = registry.resolve(None);
        assert_eq!(matrix.id, "base_v1");
        assert!((matrix.weight(ComponentName::Semantic) - 0.30).abs() < 1e-9);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_with_config_rejects_a_sum_mismatched_override() {
        let path = scratch_path("sum_mismatch");
        std::fs::write(
            &path,
            r#"{"matrices":[{"id":"base_v1","weights":{
                "semantic":0.90,"salary":0.09,"salary_progression":0.05,"experience":0.10,
                "location":0.10,"work_modality":0.08,"sector":0.08,"contract":0.05,
                "timing":0.05,"motivations":0.05,"listening_reason":0.03,"candidate_status":0.02
            }}]}"#,
        )
        .unwrap();

        let result = WeightMatrixRegistry::load_with_config(Some(path.to_str().unwrap()));
        assert!(matches!(result, Err(MatrixError::SumMismatch { .. })));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_with_config_rejects_an_unknown_component() {
        let path = scratch_path("unknown_component");
        std::fs::write(&path, r#"{"matrices":[{"id":"base_v1","weights":{"not_a_component":1.0}}]}"#).unwrap();

        let result = WeightMatrixRegistry::load_with_config(Some(path.to_str().unwrap()));
        assert!(matches!(result, Err(MatrixError::UnknownComponent { .. })));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_with_config_surfaces_io_errors_for_a_missing_file() {
        let result = WeightMatrixRegistry::load_with_config(Some("/nonexistent/matrix_override.json"));
        assert!(matches!(result, Err(MatrixError::Io { .. })));
    }
}
