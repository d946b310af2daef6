// main.rs
mod handler;
mod routes;
mod service;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use match_engine::config::Config;
use match_engine::engine::Engine;
use match_engine::geo::{GeoGateway, HttpGeoProvider};
use match_engine::hierarchy::LevelDetector;
use match_engine::matrix::WeightMatrixRegistry;

use routes::create_router;
use service::MatchService;

#[derive(Clone)]
pub struct AppState {
    pub match_service: MatchService,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let provider = Arc::new(HttpGeoProvider::new(
            config.geo_provider_base_url.clone(),
            config.geo_provider_api_key.clone(),
        ));
        let geo = GeoGateway::new(
            provider,
            config.cache_geocode_ttl_hours,
            config.cache_route_ttl_hours,
            config.geo_provider_daily_quota,
            config.geo_provider_rps,
            Duration::from_millis(config.deadline_ms_per_external_call),
        );

        // Fatal at startup only (spec.md 7): a matrix failing I1/I4, or a
        // MATRIX_CONFIG_PATH override that does, must never surface at
        // request time.
        let matrices = WeightMatrixRegistry::load_with_config(config.matrix_config_path.as_deref())
            .unwrap_or_else(|err| {
                tracing::error!(error = %err, "weight matrix registry failed validation");
                std::process::exit(1);
            });

        let detector = LevelDetector::new();

        let engine = Arc::new(Engine::new(
            geo,
            matrices,
            detector,
            config.concurrency_limit,
            Duration::from_millis(config.deadline_ms_total),
            Duration::from_millis(config.deadline_ms_per_scorer),
        ));

        AppState {
            match_service: MatchService::new(engine),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::init();
    let app_state = Arc::new(AppState::new(&config));
    let port = config.port;

    let app = create_router(app_state);

    tracing::info!(port, "match engine listening");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to bind listener");
            std::process::exit(1);
        });

    axum::serve(listener, app).await.unwrap();
}
