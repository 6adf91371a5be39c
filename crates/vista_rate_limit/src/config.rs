//! Rate limit configuration.

use crate::{RateLimitError, RateLimitErrorKind};
use serde::{Deserialize, Serialize};

/// Token bucket parameters.
///
/// ```toml
/// [rate_limit]
/// requests_per_second = 5.0
/// burst = 10
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Tokens added to the bucket per second
    pub requests_per_second: f64,
    /// Bucket capacity; the most requests admitted back to back
    pub burst: u32,
}

impl RateLimitConfig {
    /// Create a configuration from a rate and a burst.
    pub fn new(requests_per_second: f64, burst: u32) -> Self {
        Self {
            requests_per_second,
            burst,
        }
    }

    /// One request per second, burst of one.
    pub fn conservative() -> Self {
        Self::new(1.0, 1)
    }

    /// Five requests per second, burst of ten.
    pub fn high_throughput() -> Self {
        Self::new(5.0, 10)
    }

    /// Check that the rate is positive and finite and the burst is non-zero.
    pub fn validate(&self) -> Result<(), RateLimitError> {
        if !self.requests_per_second.is_finite() || self.requests_per_second <= 0.0 {
            return Err(RateLimitError::new(RateLimitErrorKind::InvalidRate(
                self.requests_per_second.to_string(),
            )));
        }
        if self.burst == 0 {
            return Err(RateLimitError::new(RateLimitErrorKind::InvalidBurst));
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::conservative()
    }
}
