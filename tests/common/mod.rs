#![allow(dead_code)]

use jewelai::infrastructure::persistence::dataset_store::{
    METRICS_FILE, PREDICTIONS_FILE, TURNOVER_FILE,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn temp_dir(tag: &str) -> PathBuf {
    let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "jewelai_it_{}_{}_{}",
        std::process::id(),
        unique_id,
        tag
    ));
    fs::create_dir_all(&dir).expect("Failed to create test temp dir");
    dir
}

pub fn write_datasets(dir: &Path) {
    fs::write(
        dir.join(TURNOVER_FILE),
        "label_no,category,predicted_potential_sales,days_to_sell,inventory_risk_score,turnover_category\n\
         L001,GOLD RINGS,60000,5,20,Fast\n\
         L002,GOLD RINGS,40000,8,46,Medium\n\
         L003,GOLD CHAINS,90000,35,55,Slow\n",
    )
    .unwrap();
    fs::write(
        dir.join(PREDICTIONS_FILE),
        "actual_sales,ensemble_prediction,product_category\n\
         1000,950,GOLD RINGS\n\
         2000,2100,\n\
         3000,2900,GOLD CHAINS\n",
    )
    .unwrap();
    fs::write(
        dir.join(METRICS_FILE),
        json!({
            "ensemble": {"r2_score": 0.91, "rmse": 1200.5, "mae": 800.0, "mape": 12.5},
            "base_models": {"ridge": {"r2_score": 0.85}, "lasso": {"r2_score": 0.8}},
            "training_info": {"n_samples": 1500, "n_features": 4}
        })
        .to_string(),
    )
    .unwrap();
}

/// Two inline linear models over four columns.
///
/// For RING, 6.5 g, 22 karat on a Saturday: ridge = 7000, lasso = 250,
/// ensemble = 0.7 * 7000 + 0.3 * 250 = 4975.
pub fn linear_bundle_json() -> serde_json::Value {
    json!({
        "feature_columns": ["net_weight", "price_per_gram", "product_category_GOLD RINGS", "is_weekend"],
        "scaler": {"mean": [0.0, 6000.0, 0.0, 0.0], "scale": [1.0, 500.0, 1.0, 1.0]},
        "base_models": [
            {"name": "ridge", "kind": "linear", "coefficients": [1000.0, 0.0, 500.0, 0.0], "intercept": 0.0},
            {"name": "lasso", "kind": "linear", "coefficients": [0.0, 100.0, 0.0, 200.0], "intercept": 50.0}
        ],
        "weights": [0.7, 0.3]
    })
}

pub fn write_bundle(dir: &Path, bundle: &serde_json::Value) -> PathBuf {
    let path = dir.join("ensemble_model.json");
    fs::write(&path, serde_json::to_string_pretty(bundle).unwrap()).unwrap();
    path
}
