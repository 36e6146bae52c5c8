//! Observability for JewelAI
//!
//! 1. **Prometheus text**: rendered on demand for the `/metrics` endpoint
//! 2. **Structured JSON Logs**: optional periodic snapshot on stdout (for Loki, Fluentd, CloudWatch)

pub mod metrics;
pub mod reporter;

pub use metrics::Metrics;
pub use reporter::MetricsReporter;
