// Middleware module
pub mod rate_limit;

pub use rate_limit::*;

// Re-export commonly used middleware
use crate::middleware::rate_limit::RateLimiter;
pub mod main_middleware;