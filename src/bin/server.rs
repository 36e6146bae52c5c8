//! JewelAI Server - inventory analytics and sales prediction API
//!
//! Serves the dashboard endpoints over the precomputed tables in `DATA_DIR`
//! and, when the ensemble bundle loads, live sales predictions.
//!
//! # Usage
//! ```sh
//! DATA_DIR=output PORT=8000 cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `HOST`, `PORT` - Bind address (default: 0.0.0.0:8000)
//! - `CORS_ORIGINS` - Comma separated dashboard origins
//! - `DATA_DIR`, `MODEL_FILE` - Artifact locations
//! - `OBSERVABILITY_ENABLED` - Enable JSON metrics snapshots on stdout (default: false)
//! - `OBSERVABILITY_INTERVAL` - Interval in seconds between snapshots (default: 60)

use anyhow::{Context, Result};
use jewelai::application::bootstrap::ServicesBootstrap;
use jewelai::config::Config;
use jewelai::infrastructure::observability::MetricsReporter;
use jewelai::interfaces::http;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("JewelAI Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: DataDir={}, Model={}, Origins={:?}",
        config.data.data_dir.display(),
        config.data.model_path().display(),
        config.server.cors_origins
    );

    let services = ServicesBootstrap::init(&config)?;
    info!(
        "Loaded {} inventory items (model loaded: {})",
        services.analytics.item_count(),
        services.predictor.is_available()
    );

    if config.observability.enabled {
        let reporter =
            MetricsReporter::new(services.metrics.clone(), config.observability.interval_seconds);
        tokio::spawn(async move {
            reporter.run().await;
        });
        info!(
            "Metrics reporter started (interval: {}s)",
            config.observability.interval_seconds
        );
    } else {
        info!("Metrics reporting disabled.");
    }

    let app = http::router(services, &config.server.cors_origins)?;
    let addr = config.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}. Press Ctrl+C to shutdown.", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    info!("Shutdown signal received. Exiting...");
}
