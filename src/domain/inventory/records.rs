use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of the inventory turnover table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub label_no: String,
    pub category: String,
    pub predicted_potential_sales: f64,
    pub days_to_sell: f64,
    pub inventory_risk_score: f64,
    pub turnover_category: String,
}

/// Held-out actual vs ensemble prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub actual_sales: f64,
    pub ensemble_prediction: f64,
    #[serde(default)]
    pub product_category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleScores {
    pub r2_score: f64,
    pub rmse: f64,
    pub mae: f64,
    pub mape: f64,
}

/// Evaluation report written by the training run. Only the ensemble block
/// has a fixed shape; the other sections are passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleMetrics {
    pub ensemble: EnsembleScores,
    #[serde(default)]
    pub base_models: Value,
    #[serde(default)]
    pub training_info: Value,
}

/// Everything the reporting endpoints read, loaded once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySnapshot {
    pub items: Vec<InventoryItem>,
    pub predictions: Vec<PredictionRecord>,
    pub metrics: EnsembleMetrics,
}
