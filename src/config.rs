// config.rs
//! Ambient configuration knobs (spec.md 6), sourced from environment
//! variables the same way the teacher's `Config::init()` does: required
//! knobs `.expect()`, everything else `unwrap_or_else` to a documented
//! default.

#[derive(Debug, Clone)]
pub struct Config {
    pub deadline_ms_total: u64,
    pub deadline_ms_per_scorer: u64,
    pub deadline_ms_per_external_call: u64,
    pub concurrency_limit: usize,

    pub geo_provider_base_url: String,
    pub geo_provider_api_key: Option<String>,
    pub geo_provider_daily_quota: u64,
    pub geo_provider_rps: u32,

    pub cache_geocode_ttl_hours: u64,
    pub cache_route_ttl_hours: u64,

    pub hard_gate_default: crate::models::enums::HardGateMode,
    pub matrix_config_path: Option<String>,

    pub redis_url: Option<String>,
    pub redis_enabled: bool,

    pub port: u16,
}

impl Config {
    pub fn init() -> Config {
        let deadline_ms_total = env_parse("DEADLINE_MS_TOTAL", 175);
        let deadline_ms_per_scorer = env_parse("DEADLINE_MS_PER_SCORER", 30);
        let deadline_ms_per_external_call = env_parse("DEADLINE_MS_PER_EXTERNAL_CALL", 50);
        let concurrency_limit = env_parse("CONCURRENCY_LIMIT", 128usize);

        let geo_provider_base_url = std::env::var("GEO_PROVIDER_BASE_URL")
            .unwrap_or_else(|_| "https://geo.internal".to_string());
        let geo_provider_api_key = std::env::var("GEO_PROVIDER_API_KEY").ok();
        let geo_provider_daily_quota = env_parse("GEO_PROVIDER_DAILY_QUOTA", 10_000u64);
        let geo_provider_rps = env_parse("GEO_PROVIDER_RPS", 10u32);

        let cache_geocode_ttl_hours = env_parse("CACHE_GEOCODE_TTL_HOURS", 720u64);
        let cache_route_ttl_hours = env_parse("CACHE_ROUTE_TTL_HOURS", 1u64);

        let hard_gate_default = match std::env::var("HARD_GATE_DEFAULT") {
            Ok(v) if v.eq_ignore_ascii_case("advisory") => {
                crate::models::enums::HardGateMode::Advisory
            }
            _ => crate::models::enums::HardGateMode::Strict,
        };
        let matrix_config_path = std::env::var("MATRIX_CONFIG_PATH").ok();

        let redis_url = std::env::var("REDIS_URL").ok();
        let redis_enabled = redis_url.is_some();

        let port: u16 = env_parse("PORT", 8080u16);

        if redis_enabled {
            tracing::info!("redis L2 geo cache ENABLED");
        } else {
            tracing::info!("redis L2 geo cache DISABLED (set REDIS_URL to enable)");
        }

        Config {
            deadline_ms_total,
            deadline_ms_per_scorer,
            deadline_ms_per_external_call,
            concurrency_limit,
            geo_provider_base_url,
            geo_provider_api_key,
            geo_provider_daily_quota,
            geo_provider_rps,
            cache_geocode_ttl_hours,
            cache_route_ttl_hours,
            hard_gate_default,
            matrix_config_path,
            redis_url,
            redis_enabled,
            port,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_parse_falls_back_to_default_when_unset() {
        std::env::remove_var("SOME_KNOB_NOT_SET_IN_TESTS");
        let value: u64 = env_parse("SOME_KNOB_NOT_SET_IN_TESTS", 42);
        assert_eq!(value, 42);
    }
}
