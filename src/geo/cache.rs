//! Geocode/route cache with per-key single-flight coalescing (spec.md 4.1,
//! 5). Generalizes the teacher's `Arc<ConnectionManager>`-backed
//! `CacheHelper` get/set/TTL shape (`db/cache.rs`) to an in-process cache,
//! since the core has no required external dependency; an optional
//! Redis-backed L2 is described in spec.md 6 and would sit behind the
//! same `get_or_fetch_*` calls, selected by `Config::redis_enabled`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{OnceCell, RwLock};

use super::provider::{GeoError, GeocodeOutcome};
use crate::models::enums::TransportMode;

#[derive(Debug, Clone)]
struct CachedValue<T: Clone> {
    value: T,
    expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub from: String,
    pub to: String,
    pub mode: TransportMode,
    /// Hour-of-day bucket (0..24), per the Redis key format in spec.md 6.
    pub hour_bucket: u8,
}

type GeocodeCell = Arc<OnceCell<CachedValue<GeocodeOutcome>>>;
type RouteCell = Arc<OnceCell<CachedValue<u32>>>;

pub struct GeoCache {
    geocode: RwLock<HashMap<String, GeocodeCell>>,
    routes: RwLock<HashMap<RouteKey, RouteCell>>,
    geocode_ttl: Duration,
    route_ttl: Duration,
}

impl GeoCache {
    pub fn new(geocode_ttl_hours: u64, route_ttl_hours: u64) -> Self {
        GeoCache {
            geocode: RwLock::new(HashMap::new()),
            routes: RwLock::new(HashMap::new()),
            geocode_ttl: Duration::from_secs(geocode_ttl_hours * 3600),
            route_ttl: Duration::from_secs(route_ttl_hours * 3600),
        }
    }

    pub fn normalize_address(address: &str) -> String {
        address.trim().to_lowercase()
    }

    pub async fn get_or_fetch_geocode<F, Fut>(
        &self,
        address: &str,
        fetch: F,
    ) -> Result<GeocodeOutcome, GeoError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<GeocodeOutcome, GeoError>>,
    {
        let key = Self::normalize_address(address);
        loop {
            let cell = {
                let mut map = self.geocode.write().await;
                map.entry(key.clone())
                    .or_insert_with(|| Arc::new(OnceCell::new()))
                    .clone()
            };
            let ttl = self.geocode_ttl;
            let cached = cell
                .get_or_try_init(|| async {
                    let value = fetch().await?;
                    Ok::<_, GeoError>(CachedValue {
                        value,
                        expires_at: Instant::now() + ttl,
                    })
                })
                .await?;
            if cached.expires_at > Instant::now() {
                tracing::debug!(address = %key, "geocode cache hit");
                return Ok(cached.value);
            }
            tracing::debug!(address = %key, "geocode cache expired, evicting");
            self.geocode.write().await.remove(&key);
        }
    }

    pub async fn get_or_fetch_route<F, Fut>(
        &self,
        key: RouteKey,
        fetch: F,
    ) -> Result<u32, GeoError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<u32, GeoError>>,
    {
        loop {
            let cell = {
                let mut map = self.routes.write().await;
                map.entry(key.clone())
                    .or_insert_with(|| Arc::new(OnceCell::new()))
                    .clone()
            };
            let ttl = self.route_ttl;
            let cached = cell
                .get_or_try_init(|| async {
                    let value = fetch().await?;
                    Ok::<_, GeoError>(CachedValue {
                        value,
                        expires_at: Instant::now() + ttl,
                    })
                })
                .await?;
            if cached.expires_at > Instant::now() {
                tracing::debug!(from = %key.from, to = %key.to, "route cache hit");
                return Ok(cached.value);
            }
            tracing::debug!(from = %key.from, to = %key.to, "route cache expired, evicting");
            self.routes.write().await.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::provider::Coordinate;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn concurrent_lookups_for_the_same_address_coalesce_into_one_fetch() {
        let cache = Arc::new(GeoCache::new(720, 1));
        let calls = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch_geocode("12 rue de Paris", || {
                        let calls = calls.clone();
                        async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            Ok(GeocodeOutcome::Known {
                                coord: Coordinate { lat: 48.85, lon: 2.35 },
                                confidence: 0.9,
                            })
                        }
                    })
                    .await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn address_normalization_is_case_and_whitespace_insensitive() {
        assert_eq!(
            GeoCache::normalize_address("  12 Rue De Paris  "),
            GeoCache::normalize_address("12 rue de paris")
        );
    }
}
