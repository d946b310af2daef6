//! `TransportPreFilter` (C3, spec.md 4.3): geo + multi-modal travel-time
//! feasibility check consumed as a hard gate before expensive scoring.

use std::collections::{BTreeMap, BTreeSet};

use crate::geo::{GeoGateway, GeocodeOutcome};
use crate::models::enums::TransportMode;

#[derive(Debug, Clone, PartialEq)]
pub struct TransportOutcome {
    pub feasible: bool,
    pub best_mode: Option<TransportMode>,
    pub best_time_min: Option<u32>,
    pub per_mode_scores: BTreeMap<TransportMode, f64>,
    pub location_sub_score: f64,
    pub reason: Option<&'static str>,
}

pub struct TransportPreFilter<'a> {
    gateway: &'a GeoGateway,
}

impl<'a> TransportPreFilter<'a> {
    pub fn new(gateway: &'a GeoGateway) -> Self {
        TransportPreFilter { gateway }
    }

    pub async fn evaluate(
        &self,
        home_address: &str,
        job_location: &str,
        transport_modes: &BTreeSet<TransportMode>,
        max_travel_time_min: &BTreeMap<TransportMode, u32>,
    ) -> TransportOutcome {
        let home = self.gateway.geocode(home_address).await;
        let job = self.gateway.geocode(job_location).await;

        let (home_coord, job_coord) = match (home, job) {
            (Ok(GeocodeOutcome::Known { coord: h, .. }), Ok(GeocodeOutcome::Known { coord: j, .. })) => {
                (h, j)
            }
            _ => {
                tracing::warn!(
                    home_address,
                    job_location,
                    "transport pre-filter: address ambiguous or geocode unavailable"
                );
                return TransportOutcome {
                    feasible: true,
                    best_mode: None,
                    best_time_min: None,
                    per_mode_scores: BTreeMap::new(),
                    location_sub_score: 0.5,
                    reason: Some("address_ambiguous"),
                };
            }
        };

        let remote_available = transport_modes.contains(&TransportMode::Remote);
        let mut per_mode_scores = BTreeMap::new();
        let mut best_mode = None;
        let mut best_time = None;
        let mut best_score = 0.0f64;

        for &mode in transport_modes {
            if mode == TransportMode::Remote {
                continue;
            }
            let Some(&max_time) = max_travel_time_min.get(&mode) else {
                continue;
            };
            let minutes = match self
                .gateway
                .travel_time(home_address, home_coord, job_location, job_coord, mode)
                .await
            {
                Ok(minutes) => minutes,
                Err(err) => {
                    tracing::warn!(?mode, error = %err, "travel_time call failed, treating mode as infeasible");
                    continue;
                }
            };
            let score = if minutes <= max_time && max_time > 0 {
                1.0 - (minutes as f64 / max_time as f64)
            } else {
                0.0
            };
            per_mode_scores.insert(mode, score);
            if best_mode.is_none() || score > best_score {
                best_score = score;
                best_mode = Some(mode);
                best_time = Some(minutes);
            }
        }

        let any_mode_feasible = per_mode_scores.values().any(|&s| s > 0.0);
        let feasible = any_mode_feasible || remote_available;
        let location_sub_score = per_mode_scores
            .values()
            .copied()
            .fold(0.0f64, f64::max);

        TransportOutcome {
            feasible,
            best_mode,
            best_time_min: best_time,
            per_mode_scores,
            location_sub_score,
            reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::provider::FakeGeoProvider;
    use std::sync::Arc;
    use std::time::Duration;

    fn gateway() -> GeoGateway {
        GeoGateway::new(
            Arc::new(FakeGeoProvider::new()),
            720,
            1,
            10_000,
            100,
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn feasible_when_travel_time_is_within_budget() {
        let gw = gateway();
        let prefilter = TransportPreFilter::new(&gw);
        let mut modes = BTreeSet::new();
        modes.insert(TransportMode::Car);
        let mut max = BTreeMap::new();
        max.insert(TransportMode::Car, 120);

        let outcome = prefilter.evaluate("Paris", "Lyon", &modes, &max).await;
        assert!(outcome.feasible);
        assert!(outcome.location_sub_score > 0.0);
    }

    #[tokio::test]
    async fn infeasible_when_every_mode_exceeds_its_budget_and_no_remote() {
        let gw = gateway();
        let prefilter = TransportPreFilter::new(&gw);
        let mut modes = BTreeSet::new();
        modes.insert(TransportMode::PublicTransport);
        let mut max = BTreeMap::new();
        max.insert(TransportMode::PublicTransport, 45);

        let outcome = prefilter.evaluate("Meaux", "Roissy CDG", &modes, &max).await;
        assert!(!outcome.feasible);
        assert_eq!(outcome.location_sub_score, 0.0);
    }

    #[tokio::test]
    async fn remote_mode_makes_an_otherwise_infeasible_commute_feasible() {
        let gw = gateway();
        let prefilter = TransportPreFilter::new(&gw);
        let mut modes = BTreeSet::new();
        modes.insert(TransportMode::PublicTransport);
        modes.insert(TransportMode::Remote);
        let mut max = BTreeMap::new();
        max.insert(TransportMode::PublicTransport, 45);

        let outcome = prefilter.evaluate("Meaux", "Roissy CDG", &modes, &max).await;
        assert!(outcome.feasible);
    }

    #[tokio::test]
    async fn ambiguous_address_yields_neutral_feasible_result() {
        let gw = gateway();
        let prefilter = TransportPreFilter::new(&gw);
        let mut modes = BTreeSet::new();
        modes.insert(TransportMode::Car);
        let mut max = BTreeMap::new();
        max.insert(TransportMode::Car, 60);

        let outcome = prefilter
            .evaluate("Nowhereville", "Lyon", &modes, &max)
            .await;
        assert!(outcome.feasible);
        assert_eq!(outcome.location_sub_score, 0.5);
        assert_eq!(outcome.reason, Some("address_ambiguous"));
    }
}
