//! Adaptive Weighted Scoring Engine: a bidirectional candidate/job
//! matching core (spec.md 1-2).
//!
//! The crate's public surface is [`Engine`] plus the value records it
//! consumes and returns. Everything else (geo, hierarchy, matrix,
//! scoring, transport, diagnostics) is an implementation detail wired
//! together by `Engine::new`.

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod geo;
pub mod hierarchy;
pub mod matrix;
pub mod models;
pub mod scoring;
pub mod transport;

#[cfg(test)]
pub mod test_support;

pub use engine::{Engine, EngineError};
pub use models::{CandidateProfile, JobPosting, MatchRequest};
pub use models::result::MatchResult;
