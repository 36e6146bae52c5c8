//! Prometheus metrics definitions for JewelAI
//!
//! All metrics use the `jewelai_` prefix.

use prometheus::{
    CounterVec, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge},
};
use std::sync::Arc;

/// Prometheus metrics for the analytics service
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Model package status (0=degraded, 1=loaded)
    pub model_loaded: GenericGauge<AtomicF64>,
    /// Number of inventory rows served by the analytics endpoints
    pub inventory_items: GenericGauge<AtomicF64>,
    /// Predictions by outcome (ok, error, unavailable)
    pub predictions_total: CounterVec,
    /// Encode + scale + ensemble time in seconds
    pub prediction_latency_seconds: Histogram,
    /// API requests by endpoint
    pub api_requests_total: CounterVec,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let model_loaded = Gauge::with_opts(Opts::new(
            "jewelai_model_loaded",
            "Ensemble model package status (0=degraded, 1=loaded)",
        ))?;
        registry.register(Box::new(model_loaded.clone()))?;

        let inventory_items = Gauge::with_opts(Opts::new(
            "jewelai_inventory_items",
            "Inventory rows loaded at startup",
        ))?;
        registry.register(Box::new(inventory_items.clone()))?;

        let predictions_total = CounterVec::new(
            Opts::new("jewelai_predictions_total", "Total sales predictions by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(predictions_total.clone()))?;

        let prediction_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "jewelai_prediction_latency_seconds",
                "Sales prediction latency in seconds",
            )
            .buckets(vec![
                0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1,
            ]),
        )?;
        registry.register(Box::new(prediction_latency_seconds.clone()))?;

        let api_requests_total = CounterVec::new(
            Opts::new("jewelai_api_requests_total", "Total API requests by endpoint"),
            &["endpoint"],
        )?;
        registry.register(Box::new(api_requests_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            model_loaded,
            inventory_items,
            predictions_total,
            prediction_latency_seconds,
            api_requests_total,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn inc_predictions(&self, outcome: &str) {
        self.predictions_total.with_label_values(&[outcome]).inc();
    }

    pub fn predictions(&self, outcome: &str) -> f64 {
        self.predictions_total.with_label_values(&[outcome]).get()
    }

    pub fn observe_prediction_latency(&self, seconds: f64) {
        self.prediction_latency_seconds.observe(seconds);
    }

    pub fn inc_requests(&self, endpoint: &str) {
        self.api_requests_total.with_label_values(&[endpoint]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.model_loaded.set(1.0);
        let output = metrics.render();
        assert!(output.contains("jewelai_model_loaded 1"));
    }

    #[test]
    fn test_prediction_counter() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.inc_predictions("ok");
        metrics.inc_predictions("ok");
        metrics.inc_predictions("unavailable");
        assert_eq!(metrics.predictions("ok"), 2.0);
        let output = metrics.render();
        assert!(output.contains("jewelai_predictions_total"));
        assert!(output.contains("unavailable"));
    }

    #[test]
    fn test_latency_histogram() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.observe_prediction_latency(0.0003);
        assert_eq!(metrics.prediction_latency_seconds.get_sample_count(), 1);
    }
}
