//! Admission control for inbound requests.
//!
//! This crate provides a token-bucket [`RateLimiter`] shared by every
//! concurrent request. Admission is non-blocking: [`RateLimiter::allow`]
//! either consumes a token or reports that none is available, and the caller
//! surfaces the refusal immediately.
//!
//! ```
//! use vista_rate_limit::{RateLimitConfig, RateLimiter};
//!
//! let limiter = RateLimiter::new(&RateLimitConfig::default()).unwrap();
//! assert!(limiter.allow());
//! assert!(!limiter.allow());
//! ```

mod config;
mod error;
mod limiter;

pub use config::RateLimitConfig;
pub use error::{RateLimitError, RateLimitErrorKind};
pub use limiter::RateLimiter;
