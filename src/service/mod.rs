// service/mod.rs
pub mod error;
pub mod match_service;

pub use error::MatchServiceError;
pub use match_service::MatchService;
