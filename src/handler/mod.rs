// handler/mod.rs
pub mod match_handler;

pub use match_handler::{health_check, match_candidate};
