//! Adaptive Scoring Engine (C6, spec.md 4.6): orchestrates C2–C5 and C7
//! around the twelve C4 scorers.

pub mod engine;
pub mod gates;
pub mod scheduler;

pub use engine::{Engine, EngineError};
