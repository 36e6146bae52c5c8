//! Dashboard REST API.

pub mod dto;
pub mod error;
pub mod handlers;

pub use error::ApiError;

use crate::application::bootstrap::ServicesHandle;
use anyhow::{Context, Result};
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// CORS for the configured dashboard origins, with credentials.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub fn router(state: ServicesHandle, cors_origins: &[String]) -> Result<Router> {
    let app = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/api/kpis/summary", get(handlers::kpi_summary))
        .route("/api/inventory/categories", get(handlers::inventory_categories))
        .route("/api/inventory/items", get(handlers::inventory_items))
        .route("/api/analytics/performance", get(handlers::analytics_performance))
        .route("/api/analytics/predictions", get(handlers::prediction_comparison))
        .route("/api/market/trends", get(handlers::market_trends))
        .route("/api/predict/sales", post(handlers::predict_sales))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins)?)
        .with_state(state);
    Ok(app)
}
