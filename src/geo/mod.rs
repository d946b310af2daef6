//! Geo/Routing Gateway (C1, spec.md 4.1).

pub mod cache;
pub mod gateway;
pub mod provider;

pub use cache::GeoCache;
pub use gateway::GeoGateway;
pub use provider::{Coordinate, GeoError, GeoProvider, GeocodeOutcome, HttpGeoProvider};
