//! Token bucket rate limiter built on governor.
//!
//! Governor implements GCRA, which admits exactly the same traffic as a token
//! bucket with the same rate and capacity while keeping its state in a single
//! atomic. Concurrent callers can never be admitted beyond the configured
//! burst plus what has been refilled since.

use crate::{RateLimitConfig, RateLimitError, RateLimitErrorKind};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::{debug, instrument};

// Type alias for our direct rate limiter
type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Process-wide admission gate.
///
/// Construct once at startup and share behind an `Arc`; every method takes
/// `&self` and is safe to call from any number of tasks.
///
/// # Example
///
/// ```
/// use vista_rate_limit::{RateLimitConfig, RateLimiter};
///
/// let limiter = RateLimiter::new(&RateLimitConfig::high_throughput()).unwrap();
/// let admitted = (0..20).filter(|_| limiter.allow()).count();
/// assert_eq!(admitted, 10);
/// ```
pub struct RateLimiter {
    limiter: DirectRateLimiter,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a limiter whose bucket starts full.
    ///
    /// # Errors
    ///
    /// Returns an error when the rate is not a positive finite number, the
    /// burst is zero, or the rate is too high or too low to express as a
    /// refill period.
    #[instrument(skip(config), fields(rps = config.requests_per_second, burst = config.burst))]
    pub fn new(config: &RateLimitConfig) -> Result<Self, RateLimitError> {
        config.validate()?;

        let burst = NonZeroU32::new(config.burst)
            .ok_or_else(|| RateLimitError::new(RateLimitErrorKind::InvalidBurst))?;

        let invalid_rate = || {
            RateLimitError::new(RateLimitErrorKind::InvalidRate(
                config.requests_per_second.to_string(),
            ))
        };

        // One token every `period`
        let period = Duration::try_from_secs_f64(1.0 / config.requests_per_second)
            .map_err(|_| invalid_rate())?;
        let quota = Quota::with_period(period)
            .ok_or_else(invalid_rate)?
            .allow_burst(burst);

        debug!(?period, "Created rate limiter");

        Ok(Self {
            limiter: GovernorRateLimiter::direct(quota),
            config: *config,
        })
    }

    /// Try to consume one token without waiting.
    ///
    /// Returns `false` when the bucket is empty; nothing is consumed in that case.
    pub fn allow(&self) -> bool {
        match self.limiter.check() {
            Ok(()) => true,
            Err(_) => {
                debug!("Rate limit exceeded");
                false
            }
        }
    }

    /// The configuration this limiter was built from.
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
