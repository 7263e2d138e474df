//! Metrics for generation backend calls.

use creativerse_error::GenerationErrorKind;
use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};
use std::sync::OnceLock;

static METRICS: OnceLock<GatewayMetrics> = OnceLock::new();

/// Request, error and latency instruments labelled by backend route.
#[derive(Clone)]
pub struct GatewayMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Completed backend requests
    pub requests: Counter<u64>,
    /// Failed backend requests, after retries
    pub errors: Counter<u64>,
    /// Request duration in seconds, retries included
    pub duration: Histogram<f64>,
}

impl GatewayMetrics {
    fn init() -> Self {
        let meter = global::meter("creativerse_gateway");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("gateway.requests")
                .with_description("Completed generation backend requests")
                .build(),
            errors: meter
                .u64_counter("gateway.errors")
                .with_description("Failed generation backend requests")
                .build(),
            duration: meter
                .f64_histogram("gateway.duration")
                .with_unit("seconds")
                .with_description("Generation backend call duration")
                .build(),
        }
    }

    /// Get the global gateway metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful request.
    pub fn record_request(&self, route: &str, duration_secs: f64) {
        let labels = &[KeyValue::new("route", route.to_string())];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed request.
    pub fn record_error(&self, route: &str, kind: &GenerationErrorKind) {
        let labels = &[
            KeyValue::new("route", route.to_string()),
            KeyValue::new("error_type", classify_error(kind)),
        ];
        self.errors.add(1, labels);
    }
}

/// Short label for an error kind.
pub fn classify_error(kind: &GenerationErrorKind) -> &'static str {
    match kind {
        GenerationErrorKind::Network(_) => "network",
        GenerationErrorKind::HttpStatus { status_code: 429, .. } => "rate_limit",
        GenerationErrorKind::HttpStatus { status_code, .. } if *status_code >= 500 => "server",
        GenerationErrorKind::HttpStatus { .. } => "invalid_request",
        GenerationErrorKind::ContentRejected(_) => "content_rejected",
        GenerationErrorKind::MalformedResponse(_) => "malformed_response",
        GenerationErrorKind::OptionCountMismatch { .. } => "option_count",
        GenerationErrorKind::Misconfigured(_) => "misconfigured",
    }
}
