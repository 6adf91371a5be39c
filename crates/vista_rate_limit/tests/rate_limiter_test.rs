//! Tests for the admission rate limiter.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use vista_rate_limit::{RateLimitConfig, RateLimitErrorKind, RateLimiter};

#[test]
fn test_burst_one_admits_then_denies_then_refills() {
    let limiter = RateLimiter::new(&RateLimitConfig::conservative()).unwrap();

    assert!(limiter.allow(), "first call in a quiet window is admitted");
    assert!(!limiter.allow(), "immediate second call is denied");

    thread::sleep(Duration::from_millis(1100));
    assert!(limiter.allow(), "admitted again after one refill interval");
}

#[test]
fn test_fast_refill_interval() {
    // 20 tokens per second -> one every 50ms
    let limiter = RateLimiter::new(&RateLimitConfig::new(20.0, 1)).unwrap();

    assert!(limiter.allow());
    assert!(!limiter.allow());

    thread::sleep(Duration::from_millis(80));
    assert!(limiter.allow());
    assert!(!limiter.allow());
}

#[test]
fn test_high_throughput_burst() {
    let limiter = RateLimiter::new(&RateLimitConfig::high_throughput()).unwrap();

    for i in 0..10 {
        assert!(limiter.allow(), "call {} within burst should be admitted", i);
    }
    assert!(!limiter.allow(), "call beyond burst should be denied");
}

#[test]
fn test_denials_do_not_go_negative() {
    // One token every 100ms
    let limiter = RateLimiter::new(&RateLimitConfig::new(10.0, 1)).unwrap();
    assert!(limiter.allow());

    // Hammer the empty bucket; refusals must not borrow future tokens
    for _ in 0..1000 {
        let _ = limiter.allow();
    }

    thread::sleep(Duration::from_millis(150));
    assert!(limiter.allow(), "a refilled token is available after denials");
}

#[test]
fn test_concurrent_callers_never_exceed_burst() {
    // One token every 100 seconds: nothing refills during the test
    let limiter = Arc::new(RateLimiter::new(&RateLimitConfig::new(0.01, 10)).unwrap());
    let admitted = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let limiter = limiter.clone();
            let admitted = admitted.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    if limiter.allow() {
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(admitted.load(Ordering::SeqCst), 10);
}

#[test]
fn test_invalid_configs_are_rejected() {
    let err = RateLimiter::new(&RateLimitConfig::new(0.0, 1)).unwrap_err();
    assert!(matches!(err.kind(), RateLimitErrorKind::InvalidRate(_)));

    let err = RateLimiter::new(&RateLimitConfig::new(1.0, 0)).unwrap_err();
    assert_eq!(err.kind(), &RateLimitErrorKind::InvalidBurst);
}

#[test]
fn test_rates_without_a_refill_period_are_rejected() {
    // 1e-20/s needs a period longer than Duration can hold
    let tiny = RateLimitConfig::new(1e-20, 1);
    assert!(tiny.validate().is_ok());
    let err = RateLimiter::new(&tiny).unwrap_err();
    assert!(matches!(err.kind(), RateLimitErrorKind::InvalidRate(_)));

    // 1e20/s rounds to a zero period
    let err = RateLimiter::new(&RateLimitConfig::new(1e20, 1)).unwrap_err();
    assert!(matches!(err.kind(), RateLimitErrorKind::InvalidRate(_)));
}

#[test]
fn test_config_deserializes() {
    let config: RateLimitConfig =
        serde_json::from_str(r#"{"requests_per_second": 5.0, "burst": 10}"#).unwrap();
    assert_eq!(config, RateLimitConfig::high_throughput());
}
