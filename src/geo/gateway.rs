//! `GeoGateway` (C1, spec.md 4.1): the production-facing entry point that
//! wraps a `GeoProvider` with caching, quota enforcement, and bounded
//! retry. Scorers and the Transport Pre-Filter (C3) only ever see this
//! type, never the raw provider.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Timelike, Utc};
use rand::Rng;
use tokio::sync::Mutex;

use super::cache::{GeoCache, RouteKey};
use super::provider::{Coordinate, GeoError, GeoProvider, GeocodeOutcome};
use crate::models::enums::TransportMode;

const RETRY_ATTEMPTS: u32 = 3;
const RETRY_BASE_MS: u64 = 100;
const RETRY_FACTOR: u64 = 2;
const LOW_CONFIDENCE_THRESHOLD: f64 = 0.4;

pub struct GeoGateway {
    provider: Arc<dyn GeoProvider>,
    cache: GeoCache,
    daily_quota_remaining: AtomicU64,
    rps_limit: u32,
    rps_window: Mutex<VecDeque<Instant>>,
    external_call_deadline: Duration,
}

impl GeoGateway {
    pub fn new(
        provider: Arc<dyn GeoProvider>,
        geocode_ttl_hours: u64,
        route_ttl_hours: u64,
        daily_quota: u64,
        rps_limit: u32,
        external_call_deadline: Duration,
    ) -> Self {
        GeoGateway {
            provider,
            cache: GeoCache::new(geocode_ttl_hours, route_ttl_hours),
            daily_quota_remaining: AtomicU64::new(daily_quota),
            rps_limit,
            rps_window: Mutex::new(VecDeque::new()),
            external_call_deadline,
        }
    }

    /// Atomic budget decrement; degrades to `QUOTA_EXHAUSTED` rather than
    /// blocking (spec.md 4.1(c), 5 "Shared-resource policy").
    fn try_acquire_daily_quota(&self) -> bool {
        loop {
            let remaining = self.daily_quota_remaining.load(Ordering::SeqCst);
            if remaining == 0 {
                return false;
            }
            if self
                .daily_quota_remaining
                .compare_exchange(
                    remaining,
                    remaining - 1,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                )
                .is_ok()
            {
                return true;
            }
        }
    }

    async fn try_acquire_rps(&self) -> bool {
        let mut window = self.rps_window.lock().await;
        let now = Instant::now();
        while let Some(&front) = window.front() {
            if now.duration_since(front) > Duration::from_secs(1) {
                window.pop_front();
            } else {
                break;
            }
        }
        if window.len() >= self.rps_limit as usize {
            return false;
        }
        window.push_back(now);
        true
    }

    async fn acquire_quota(&self) -> Result<(), GeoError> {
        if !self.try_acquire_daily_quota() {
            tracing::warn!("geo provider daily quota exhausted");
            return Err(GeoError::QuotaExhausted);
        }
        if !self.try_acquire_rps().await {
            tracing::warn!("geo provider per-second budget exhausted");
            return Err(GeoError::QuotaExhausted);
        }
        Ok(())
    }

    /// Bounded exponential backoff with jitter (spec.md 4.1(d)): 3
    /// attempts, 100ms base, 2x factor.
    async fn call_with_retry<F, Fut, T>(&self, f: F) -> Result<T, GeoError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, GeoError>>,
    {
        let mut attempt = 0;
        loop {
            let result =
                tokio::time::timeout(self.external_call_deadline, f()).await;
            match result {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(err)) if attempt + 1 >= RETRY_ATTEMPTS => return Err(err),
                Ok(Err(err)) => {
                    tracing::warn!(attempt, error = %err, "geo provider call failed, retrying");
                }
                Err(_) if attempt + 1 >= RETRY_ATTEMPTS => {
                    return Err(GeoError::Network("external call deadline exceeded".into()));
                }
                Err(_) => {
                    tracing::warn!(attempt, "geo provider call timed out, retrying");
                }
            }
            let backoff_ms = RETRY_BASE_MS * RETRY_FACTOR.pow(attempt);
            let jitter_ms = rand::rng().random_range(0..=backoff_ms / 2);
            tokio::time::sleep(Duration::from_millis(backoff_ms + jitter_ms)).await;
            attempt += 1;
        }
    }

    pub async fn geocode(&self, address: &str) -> Result<GeocodeOutcome, GeoError> {
        self.acquire_quota().await?;
        self.cache
            .get_or_fetch_geocode(address, || async {
                let (coord, confidence) = self
                    .call_with_retry(|| self.provider.geocode_raw(address))
                    .await?;
                if confidence < LOW_CONFIDENCE_THRESHOLD {
                    tracing::warn!(address, confidence, "geocode confidence below threshold");
                    Ok(GeocodeOutcome::Unknown)
                } else {
                    Ok(GeocodeOutcome::Known { coord, confidence })
                }
            })
            .await
    }

    pub async fn travel_time(
        &self,
        from_address: &str,
        from_coord: Coordinate,
        to_address: &str,
        to_coord: Coordinate,
        mode: TransportMode,
    ) -> Result<u32, GeoError> {
        if mode == TransportMode::Remote {
            return Ok(0);
        }
        self.acquire_quota().await?;
        let key = RouteKey {
            from: GeoCache::normalize_address(from_address),
            to: GeoCache::normalize_address(to_address),
            mode,
            hour_bucket: Utc::now().hour() as u8,
        };
        self.cache
            .get_or_fetch_route(key, || async {
                self.call_with_retry(|| self.provider.travel_time_raw(from_coord, to_coord, mode, None))
                    .await
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::provider::FakeGeoProvider;

    fn gateway(provider: FakeGeoProvider) -> GeoGateway {
        GeoGateway::new(
            Arc::new(provider),
            720,
            1,
            10_000,
            100,
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn geocode_returns_unknown_for_low_confidence_address() {
        let gw = gateway(FakeGeoProvider::new());
        let outcome = gw.geocode("Nowhereville").await.unwrap();
        assert_eq!(outcome, GeocodeOutcome::Unknown);
    }

    #[tokio::test]
    async fn geocode_returns_known_for_a_cataloged_address() {
        let gw = gateway(FakeGeoProvider::new());
        let outcome = gw.geocode("Paris").await.unwrap();
        assert!(matches!(outcome, GeocodeOutcome::Known { .. }));
    }

    #[tokio::test]
    async fn quota_exhaustion_returns_an_error_rather_than_blocking() {
        let gw = GeoGateway::new(
            Arc::new(FakeGeoProvider::new()),
            720,
            1,
            0,
            100,
            Duration::from_millis(50),
        );
        let result = gw.geocode("Paris").await;
        assert!(matches!(result, Err(GeoError::QuotaExhausted)));
    }

    #[tokio::test]
    async fn external_call_deadline_trips_on_a_slow_provider() {
        let gw = gateway(FakeGeoProvider::with_latency(500));
        let start = Instant::now();
        let result = gw.geocode("Paris").await;
        assert!(result.is_err());
        assert!(start.elapsed() < Duration::from_millis(2000));
    }
}
