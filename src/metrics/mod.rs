//! Metrics collection for observability

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use tracing::error;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> = Lazy::new(|| {
    Arc::new(Metrics::new().expect("Failed to initialize metrics"))
});

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // Build generation metrics
    pub build_requests: CounterVec,
    pub build_duration: HistogramVec,
    pub advisory_warnings: CounterVec,

    // Model provider metrics
    pub model_requests: CounterVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        let build_requests = register_counter_vec_with_registry!(
            Opts::new("build_requests_total", "Total build generation requests"),
            &["status"],
            registry
        )?;

        let build_duration = register_histogram_vec_with_registry!(
            "build_request_duration_seconds",
            "Build generation request duration in seconds",
            &["endpoint"],
            registry
        )?;

        let advisory_warnings = register_counter_vec_with_registry!(
            Opts::new(
                "build_advisory_warnings_total",
                "Advisory validation findings by kind"
            ),
            &["kind"],
            registry
        )?;

        let model_requests = register_counter_vec_with_registry!(
            Opts::new("model_requests_total", "Total model provider requests"),
            &["status"],
            registry
        )?;

        Ok(Self {
            registry,
            build_requests,
            build_duration,
            advisory_warnings,
            model_requests,
        })
    }

    /// Record a build request outcome
    pub fn record_build(&self, success: bool) {
        let status = if success { "success" } else { "error" };
        self.build_requests.with_label_values(&[status]).inc();
    }

    /// Export all metrics in Prometheus text format
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            error!("Failed to encode metrics: {}", e);
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialize() {
        let metrics = Metrics::new().unwrap();
        metrics.record_build(true);
        metrics.record_build(false);
        metrics
            .advisory_warnings
            .with_label_values(&["budget_drift"])
            .inc();

        let exported = metrics.export();
        assert!(exported.contains("build_requests_total"));
        assert!(exported.contains("build_advisory_warnings_total"));
    }

    #[test]
    fn test_global_metrics_handle() {
        METRICS.model_requests.with_label_values(&["success"]).inc();
        let exported = METRICS.export();
        assert!(exported.contains("model_requests_total"));
    }
}
