//! # Prometheus Metrics
//!
//! Operational counters for the payload service, scraped by Prometheus at
//! `/metrics` on the metrics port.
//!
//! All metrics live in a dedicated [`prometheus::Registry`] with the `pix`
//! namespace, so they do not collide with the default global registry.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the service.
#[derive(Clone)]
pub struct PixMetrics {
    registry: Registry,
    /// Payloads built successfully.
    pub payloads_generated_total: IntCounter,
    /// Payloads decoded with a valid checksum.
    pub payloads_decoded_total: IntCounter,
    /// Payment requests refused by validation.
    pub validation_failures_total: IntCounter,
    /// Payloads that failed to decode or verify.
    pub decode_failures_total: IntCounter,
    /// SVG QR codes rendered.
    pub qr_renders_total: IntCounter,
    /// Time spent validating and encoding a payload, in seconds.
    pub encode_latency_seconds: Histogram,
}

fn counter(registry: &Registry, name: &str, help: &str) -> IntCounter {
    let counter = IntCounter::new(name, help).expect("metric creation");
    registry
        .register(Box::new(counter.clone()))
        .expect("metric registration");
    counter
}

impl PixMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("pix".into()), None)
            .expect("failed to create prometheus registry");

        let payloads_generated_total = counter(
            &registry,
            "payloads_generated_total",
            "Total number of payloads built",
        );
        let payloads_decoded_total = counter(
            &registry,
            "payloads_decoded_total",
            "Total number of payloads decoded and verified",
        );
        let validation_failures_total = counter(
            &registry,
            "validation_failures_total",
            "Total number of payment requests refused by validation",
        );
        let decode_failures_total = counter(
            &registry,
            "decode_failures_total",
            "Total number of payloads that failed to decode or verify",
        );
        let qr_renders_total = counter(
            &registry,
            "qr_renders_total",
            "Total number of SVG QR codes rendered",
        );

        let encode_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "encode_latency_seconds",
                "Payload validation and encoding latency in seconds",
            )
            .buckets(vec![
                0.000_001, 0.000_005, 0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005,
            ]),
        )
        .expect("metric creation");
        registry
            .register(Box::new(encode_latency_seconds.clone()))
            .expect("metric registration");

        Self {
            registry,
            payloads_generated_total,
            payloads_decoded_total,
            validation_failures_total,
            decode_failures_total,
            qr_renders_total,
            encode_latency_seconds,
        }
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Default for PixMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<PixMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposition_uses_pix_namespace() {
        let metrics = PixMetrics::new();
        metrics.payloads_generated_total.inc();
        metrics.encode_latency_seconds.observe(0.000_02);

        let text = metrics.encode().unwrap();
        assert!(text.contains("pix_payloads_generated_total 1"));
        assert!(text.contains("pix_decode_failures_total 0"));
        assert!(text.contains("pix_encode_latency_seconds_count 1"));
    }

    #[test]
    fn instances_do_not_share_counters() {
        let a = PixMetrics::new();
        let b = PixMetrics::new();
        a.qr_renders_total.inc();
        assert_eq!(a.qr_renders_total.get(), 1);
        assert_eq!(b.qr_renders_total.get(), 0);
    }
}
