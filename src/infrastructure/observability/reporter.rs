//! Periodic metrics snapshots as structured JSON on stdout.

use crate::infrastructure::observability::metrics::Metrics;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Metrics snapshot for JSON output
#[derive(Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub model_loaded: bool,
    pub inventory_items: u64,
    pub predictions: PredictionSnapshot,
}

#[derive(Serialize)]
pub struct PredictionSnapshot {
    pub ok: u64,
    pub error: u64,
    pub unavailable: u64,
    pub mean_latency_ms: f64,
}

/// Outputs metrics as structured JSON logs on a configurable interval.
pub struct MetricsReporter {
    metrics: Metrics,
    start_time: Instant,
    interval: Duration,
}

impl MetricsReporter {
    pub fn new(metrics: Metrics, interval_seconds: u64) -> Self {
        Self {
            metrics,
            start_time: Instant::now(),
            interval: Duration::from_secs(interval_seconds.max(1)),
        }
    }

    /// Run the reporter in a loop, outputting metrics periodically
    pub async fn run(self) {
        info!(
            "MetricsReporter: Starting JSON metrics (interval: {:?})",
            self.interval
        );

        loop {
            tokio::time::sleep(self.interval).await;

            let snapshot = self.collect_snapshot();
            match serde_json::to_string(&snapshot) {
                Ok(json) => {
                    // Prefixed so log shippers can filter it
                    println!("METRICS_JSON:{}", json);
                    info!(
                        "Predictions ok={} error={} unavailable={} | Uptime: {}s",
                        snapshot.predictions.ok,
                        snapshot.predictions.error,
                        snapshot.predictions.unavailable,
                        snapshot.uptime_seconds
                    );
                }
                Err(e) => warn!("Failed to serialize metrics: {}", e),
            }
        }
    }

    pub fn collect_snapshot(&self) -> MetricsSnapshot {
        let latency = &self.metrics.prediction_latency_seconds;
        let samples = latency.get_sample_count();
        let mean_latency_ms = if samples > 0 {
            latency.get_sample_sum() / samples as f64 * 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            model_loaded: self.metrics.model_loaded.get() > 0.0,
            inventory_items: self.metrics.inventory_items.get() as u64,
            predictions: PredictionSnapshot {
                ok: self.metrics.predictions("ok") as u64,
                error: self.metrics.predictions("error") as u64,
                unavailable: self.metrics.predictions("unavailable") as u64,
                mean_latency_ms,
            },
        }
    }
}
