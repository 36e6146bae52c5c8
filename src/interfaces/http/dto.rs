//! Request and response payloads of the dashboard API.

use crate::application::ml::PredictionResult;
use crate::domain::ml::encoder::PredictionRequest;
use serde::{Deserialize, Serialize};

/// Endpoints advertised by `GET /`.
pub const ADVERTISED_ENDPOINTS: &[&str] = &[
    "/api/kpis/summary",
    "/api/inventory/categories",
    "/api/inventory/items",
    "/api/analytics/performance",
    "/api/analytics/predictions",
    "/api/market/trends",
    "/api/predict/sales",
    "/health",
    "/metrics",
];

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [&'static str],
}

impl Default for RootResponse {
    fn default() -> Self {
        Self {
            message: "JewelAI API is running",
            version: env!("CARGO_PKG_VERSION"),
            endpoints: ADVERTISED_ENDPOINTS,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub data_loaded: bool,
    pub model_loaded: bool,
    pub inventory_items: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemsQuery {
    pub category: Option<String>,
    pub risk_min: Option<f64>,
    pub risk_max: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictionsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub predicted_sales: f64,
    /// Ensemble weights in base-model order
    pub confidence: Vec<f64>,
    pub input: PredictionRequest,
    pub category: String,
    pub weight_grams: f64,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            predicted_sales: result.predicted_sales,
            confidence: result.weights,
            category: result.request.category.clone(),
            weight_grams: result.request.net_weight,
            input: result.request,
        }
    }
}
