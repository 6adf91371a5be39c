//! Metrics for analysis provider calls.
//!
//! Instruments are registered on the global OpenTelemetry meter. Without an
//! installed meter provider they are no-ops.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;
use vista_error::{VistaError, VistaErrorKind};

static METRICS: OnceLock<ProviderMetrics> = OnceLock::new();

/// Request, error and latency instruments labelled by provider.
#[derive(Clone)]
pub struct ProviderMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Completed provider calls
    pub requests: Counter<u64>,
    /// Failed provider calls
    pub errors: Counter<u64>,
    /// Provider call duration in seconds
    pub duration: Histogram<f64>,
}

impl ProviderMetrics {
    fn init() -> Self {
        let meter = global::meter("vista");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("vista.provider.requests")
                .with_description("Completed analysis provider calls")
                .build(),
            errors: meter
                .u64_counter("vista.provider.errors")
                .with_description("Failed analysis provider calls")
                .build(),
            duration: meter
                .f64_histogram("vista.provider.duration")
                .with_unit("seconds")
                .with_description("Analysis provider call duration")
                .build(),
        }
    }

    /// Get the global provider metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful call.
    pub fn record_request(&self, provider: &str, duration_secs: f64) {
        let labels = &[KeyValue::new("provider", provider.to_string())];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed call.
    pub fn record_error(&self, provider: &str, error: &VistaError) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("error_type", classify_error(error)),
        ];
        self.errors.add(1, labels);
    }
}

impl Default for ProviderMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}

/// Classify an error for metrics labelling.
///
/// Returns one of: "validation", "provider", "cancelled", "config", "server".
pub fn classify_error(error: &VistaError) -> &'static str {
    match error.kind() {
        VistaErrorKind::Validation(_) => "validation",
        VistaErrorKind::Provider(_) => "provider",
        VistaErrorKind::Context(_) => "cancelled",
        VistaErrorKind::Config(_) => "config",
        VistaErrorKind::Server(_) => "server",
    }
}
