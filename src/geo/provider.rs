//! The `GeoProvider` capability trait (spec.md 4.1, 9 — "external
//! geocoding/routing provider modeled as a capability interface").
//!
//! Production code talks to a real vendor through `HttpGeoProvider`; tests
//! plug in `FakeGeoProvider`, deterministic and clock-free, the same role
//! the teacher's DB-pool-lazy test fixtures play for `DBClient`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::enums::TransportMode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// `geocode()`'s first-class low-confidence result (spec.md 4.1(e)):
/// `UNKNOWN_ADDRESS` is data, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeocodeOutcome {
    Known { coord: Coordinate, confidence: f64 },
    Unknown,
}

#[derive(Debug, Error, Clone)]
pub enum GeoError {
    #[error("geo provider quota exhausted")]
    QuotaExhausted,
    #[error("geo provider network error: {0}")]
    Network(String),
    #[error("geo provider rejected request: {0}")]
    Provider(String),
}

/// Raw vendor calls, one geocode and one route lookup. Confidence
/// thresholding into `GeocodeOutcome` and caching live in `GeoGateway`,
/// not here, so `FakeGeoProvider` stays a pure data table.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    async fn geocode_raw(&self, address: &str) -> Result<(Coordinate, f64), GeoError>;

    async fn travel_time_raw(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TransportMode,
        at_time: Option<DateTime<Utc>>,
    ) -> Result<u32, GeoError>;
}

/// Thin client hitting a configurable vendor base URL. The wire format of
/// any real geocoding/routing vendor is out of scope (spec.md 1); this
/// exists so `GeoGateway` has a production-shaped implementation to wire
/// in `main.rs`. No close teacher analogue — built directly from spec.md
/// 4.1's "external geocoding/routing provider" contract, with
/// `FakeGeoProvider` alongside it for the same reason the rest of this
/// crate keeps a deterministic double next to each external-facing type.
pub struct HttpGeoProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpGeoProvider {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        HttpGeoProvider {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl GeoProvider for HttpGeoProvider {
    async fn geocode_raw(&self, address: &str) -> Result<(Coordinate, f64), GeoError> {
        let mut req = self
            .client
            .get(format!("{}/geocode", self.base_url))
            .query(&[("address", address)]);
        if let Some(key) = &self.api_key {
            req = req.query(&[("key", key.as_str())]);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| GeoError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(GeoError::Provider(format!(
                "geocode returned status {}",
                resp.status()
            )));
        }
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| GeoError::Network(e.to_string()))?;
        let lat = body["lat"].as_f64().ok_or_else(|| {
            GeoError::Provider("missing lat in geocode response".to_string())
        })?;
        let lon = body["lon"].as_f64().ok_or_else(|| {
            GeoError::Provider("missing lon in geocode response".to_string())
        })?;
        let confidence = body["confidence"].as_f64().unwrap_or(0.0);
        Ok((Coordinate { lat, lon }, confidence))
    }

    async fn travel_time_raw(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TransportMode,
        _at_time: Option<DateTime<Utc>>,
    ) -> Result<u32, GeoError> {
        let resp = self
            .client
            .get(format!("{}/route", self.base_url))
            .query(&[
                ("from_lat", from.lat.to_string()),
                ("from_lon", from.lon.to_string()),
                ("to_lat", to.lat.to_string()),
                ("to_lon", to.lon.to_string()),
                ("mode", format!("{:?}", mode)),
            ])
            .send()
            .await
            .map_err(|e| GeoError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(GeoError::Provider(format!(
                "route returned status {}",
                resp.status()
            )));
        }
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| GeoError::Network(e.to_string()))?;
        body["minutes"]
            .as_u64()
            .map(|m| m as u32)
            .ok_or_else(|| GeoError::Provider("missing minutes in route response".to_string()))
    }
}

/// Deterministic fake used throughout the test suite: a fixed address
/// book plus a straight-line-distance-derived travel time, scaled per
/// mode so `CAR` < `PUBLIC_TRANSPORT` < `BIKE` < `WALK`.
pub struct FakeGeoProvider {
    book: Vec<(String, Coordinate, f64)>,
    sleep_ms: Option<u64>,
}

impl FakeGeoProvider {
    pub fn new() -> Self {
        FakeGeoProvider {
            book: vec![
                ("paris".to_string(), Coordinate { lat: 48.8566, lon: 2.3522 }, 0.95),
                ("meaux".to_string(), Coordinate { lat: 48.9606, lon: 2.8780 }, 0.9),
                (
                    "roissy cdg".to_string(),
                    Coordinate { lat: 49.0097, lon: 2.5479 },
                    0.9,
                ),
                ("lyon".to_string(), Coordinate { lat: 45.7640, lon: 4.8357 }, 0.9),
            ],
            sleep_ms: None,
        }
    }

    /// Used by S5 (deadline-exceeded scenario): injects an artificial
    /// delay into every call so the engine's global deadline trips.
    pub fn with_latency(sleep_ms: u64) -> Self {
        let mut p = Self::new();
        p.sleep_ms = Some(sleep_ms);
        p
    }

    fn lookup(&self, address: &str) -> Option<(Coordinate, f64)> {
        let normalized = address.trim().to_lowercase();
        self.book
            .iter()
            .find(|(key, _, _)| normalized.contains(key.as_str()))
            .map(|(_, coord, conf)| (*coord, *conf))
    }
}

impl Default for FakeGeoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeoProvider for FakeGeoProvider {
    async fn geocode_raw(&self, address: &str) -> Result<(Coordinate, f64), GeoError> {
        if let Some(ms) = self.sleep_ms {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        }
        match self.lookup(address) {
            Some((coord, confidence)) => Ok((coord, confidence)),
            None => Ok((Coordinate { lat: 0.0, lon: 0.0 }, 0.1)),
        }
    }

    async fn travel_time_raw(
        &self,
        from: Coordinate,
        to: Coordinate,
        mode: TransportMode,
        _at_time: Option<DateTime<Utc>>,
    ) -> Result<u32, GeoError> {
        if let Some(ms) = self.sleep_ms {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        }
        let dlat = from.lat - to.lat;
        let dlon = from.lon - to.lon;
        let km = ((dlat * dlat + dlon * dlon).sqrt()) * 111.0;
        let minutes_per_km = match mode {
            TransportMode::Car => 1.2,
            TransportMode::PublicTransport => 1.6,
            TransportMode::Bike => 3.0,
            TransportMode::Walk => 9.0,
            TransportMode::Remote => 0.0,
        };
        Ok((km * minutes_per_km).round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fake_provider_resolves_known_addresses_with_high_confidence() {
        let provider = FakeGeoProvider::new();
        let (_, confidence) = provider.geocode_raw("12 rue de Paris").await.unwrap();
        assert!(confidence >= 0.4);
    }

    #[tokio::test]
    async fn fake_provider_reports_low_confidence_for_unknown_address() {
        let provider = FakeGeoProvider::new();
        let (_, confidence) = provider.geocode_raw("Nowhereville").await.unwrap();
        assert!(confidence < 0.4);
    }

    #[tokio::test]
    async fn car_is_faster_than_walk_between_the_same_two_points() {
        let provider = FakeGeoProvider::new();
        let paris = provider.geocode_raw("Paris").await.unwrap().0;
        let meaux = provider.geocode_raw("Meaux").await.unwrap().0;
        let car = provider
            .travel_time_raw(paris, meaux, TransportMode::Car, None)
            .await
            .unwrap();
        let walk = provider
            .travel_time_raw(paris, meaux, TransportMode::Walk, None)
            .await
            .unwrap();
        assert!(car < walk);
    }
}
