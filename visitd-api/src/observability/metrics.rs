//! Prometheus metrics for visitd
//!
//! HTTP request counts and latencies, exposed to an external scrape
//! collector via the /metrics endpoint. The service never reads its own
//! metrics.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// HTTP request instruments backed by a private registry.
///
/// Constructed once at startup and carried in `AppState`, so tests run
/// against a fresh registry instead of process-wide statics.
pub struct Metrics {
    registry: Registry,

    /// Total HTTP requests, labeled by method and endpoint.
    pub http_requests_total: IntCounterVec,

    /// HTTP request duration in seconds, labeled by method and endpoint.
    pub http_request_duration_seconds: HistogramVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "endpoint"],
        )
        .expect("failed to create http_requests_total");

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            ),
            &["method", "endpoint"],
        )
        .expect("failed to create http_request_duration_seconds");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("failed to register http_requests_total");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("failed to register http_request_duration_seconds");

        Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
        }
    }

    /// Gather all metrics and encode them in Prometheus text format.
    pub fn gather(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .expect("failed to encode metrics");
        String::from_utf8(buffer).expect("metrics are valid UTF-8")
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_tracks_per_label_increments() {
        let metrics = Metrics::new();

        metrics
            .http_requests_total
            .with_label_values(&["POST", "/api/count"])
            .inc();

        assert_eq!(
            metrics
                .http_requests_total
                .with_label_values(&["POST", "/api/count"])
                .get(),
            1
        );
        assert_eq!(
            metrics
                .http_requests_total
                .with_label_values(&["GET", "/api/count"])
                .get(),
            0
        );
    }

    #[test]
    fn gather_renders_text_exposition() {
        let metrics = Metrics::new();

        metrics
            .http_requests_total
            .with_label_values(&["GET", "/api/count"])
            .inc();
        metrics
            .http_request_duration_seconds
            .with_label_values(&["GET", "/api/count"])
            .observe(0.01);

        let output = metrics.gather();
        assert!(output.contains("http_requests_total"));
        assert!(output.contains("http_request_duration_seconds"));
    }

    #[test]
    fn registries_are_independent() {
        let a = Metrics::new();
        let b = Metrics::new();

        a.http_requests_total
            .with_label_values(&["GET", "/api/count"])
            .inc();

        assert_eq!(
            b.http_requests_total
                .with_label_values(&["GET", "/api/count"])
                .get(),
            0
        );
    }
}
